//! End-to-end tests feeding realistic records through the engine.

use approx::assert_relative_eq;
use tally_config::FacetChartConfig;
use tally_core::{Buckets, GridInfo};
use tally_engine::prelude::*;

const STATEMENTS: &str = r#"[
  {"asset":"0xeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee","symbol":"WEI","decimals":18,
   "timestamp":1572639538,"amountIn":"2000000000000000000","amountOut":"0",
   "gasOut":"0","endBal":"2000000000000000000",
   "sender":"0x054993ab0f2b1acc0fdc65405ee203b4271bebe6",
   "recipient":"0xf503017d7baf7fbc0fff7492b751025c6a78179b"},
  {"asset":"0xeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee","symbol":"WEI","decimals":18,
   "timestamp":1572640000,"amountIn":"0","amountOut":"500000000000000000",
   "gasOut":"21000000000000","endBal":"1499979000000000000",
   "sender":"0xf503017d7baf7fbc0fff7492b751025c6a78179b",
   "recipient":"0x054993AB0F2B1ACC0FDC65405EE203B4271BEBE6"},
  {"asset":"0xeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee","symbol":"WEI","decimals":18,
   "timestamp":1572660966,"amountIn":"1000000000000000000","amountOut":"0",
   "gasOut":"0","endBal":"2499979000000000000",
   "sender":"0x0000000000000000000000000000000000000000",
   "recipient":"0xf503017d7baf7fbc0fff7492b751025c6a78179b"},
  {"asset":"0x6b175474e89094c44da98b954eedeac495271d0f","symbol":"DAI","decimals":18,
   "timestamp":1576868456,"amountIn":"1234500000000000000000","amountOut":"",
   "gasOut":"35000000000000","endBal":"1234500000000000000000",
   "sender":"0x9759a6ac90977b93b58547b4a71c78317f391a28",
   "recipient":"0xf503017d7baf7fbc0fff7492b751025c6a78179b"},
  {"asset":"0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48","symbol":"USDC","decimals":6,
   "timestamp":1576868456,"amountIn":"1500000","amountOut":"250000",
   "gasOut":"42000000000000","endBal":"1250000",
   "sender":"0x9759a6ac90977b93b58547b4a71c78317f391a28",
   "recipient":"0xf503017d7baf7fbc0fff7492b751025c6a78179b"}
]"#;

fn statements() -> Vec<Statement> {
    serde_json::from_str(STATEMENTS).unwrap()
}

fn totals<'a>(buckets: &'a Buckets, name: &str) -> Vec<(&'a str, f64)> {
    buckets
        .series(name)
        .unwrap_or_else(|| panic!("missing series {name}"))
        .iter()
        .map(|b| (b.bucket_key.as_str(), b.total))
        .collect()
}

#[test]
fn test_asset_series_from_statements() {
    let mut buckets = Buckets::with_grid_info(GridInfo::time_grid());
    rebuild_asset_series(&mut buckets, &statements(), &FacetChartConfig::default());

    assert_eq!(buckets.series.len(), 18);
    assert_eq!(
        totals(&buckets, "0xeeeeeeeeeeee_WEI.frequency"),
        vec![("20191101", 2.0), ("20191102", 1.0)]
    );
    assert_eq!(
        totals(&buckets, "0xeeeeeeeeeeee_WEI.volume"),
        vec![("20191101", 2.5), ("20191102", 1.0)]
    );
    assert_eq!(
        totals(&buckets, "0xeeeeeeeeeeee_WEI.netAmount"),
        vec![("20191101", 1.5), ("20191102", 1.0)]
    );
    assert_eq!(
        totals(&buckets, "0xeeeeeeeeeeee_WEI.neighbors"),
        vec![("20191101", 2.0), ("20191102", 1.0)]
    );

    let end_bal = totals(&buckets, "0xeeeeeeeeeeee_WEI.endBal");
    assert_relative_eq!(end_bal[0].1, 1.499979);
    assert_relative_eq!(end_bal[1].1, 2.499979);

    let gas = totals(&buckets, "0xa0b86991c621_USDC.gasOut");
    assert_relative_eq!(gas[0].1, 0.000042);
    assert_eq!(totals(&buckets, "0xa0b86991c621_USDC.volume"), vec![("20191220", 1.75)]);
    assert_eq!(totals(&buckets, "0x6b175474e890_DAI.volume"), vec![("20191220", 1234.5)]);

    assert_eq!(buckets.grid_info.bucket_count, 2);
    assert_eq!(buckets.grid_info.size, 86_400);
    assert!(buckets.series0.is_empty());
}

#[test]
fn test_asset_series_by_symbol() {
    let mut buckets = Buckets::with_grid_info(GridInfo::time_grid());
    rebuild_asset_series(&mut buckets, &statements(), &FacetChartConfig::new("symbol", 8));

    let mut prefixes: Vec<_> = buckets
        .series_names()
        .filter_map(|name| name.strip_suffix(".frequency"))
        .collect();
    prefixes.sort_unstable();
    assert_eq!(prefixes, vec!["DAI", "USDC", "WEI"]);
}

#[test]
fn test_rebuild_shrinks_with_input() {
    let mut all = statements();
    let mut buckets = Buckets::with_grid_info(GridInfo::time_grid());
    rebuild_asset_series(&mut buckets, &all, &FacetChartConfig::new("address", 8));
    assert_eq!(buckets.series.len(), 18);

    all.retain(|s| s.symbol == "DAI");
    rebuild_asset_series(&mut buckets, &all, &FacetChartConfig::new("address", 8));
    assert_eq!(buckets.series.len(), 6);
    assert!(buckets.series("0x6b175474.volume").is_some());
    assert_eq!(buckets.grid_info.bucket_count, 1);
}

#[test]
fn test_chunk_history_mixes_paths() {
    let mut index = Buckets::with_grid_info(GridInfo::block_grid());
    for (range, n) in [
        ("000000000-000099999", 100),
        ("000100000-000149999", 50),
        ("000150000-000312000", 75),
    ] {
        let record = IndexRecord {
            range: range.into(),
            n_addresses: n,
            n_appearances: n * 4,
            file_size: n * 1024,
        };
        update_index_bucket(&mut index, &record).unwrap();
    }
    assert_eq!(
        totals(&index, "nAddresses"),
        vec![
            ("000000000", 100.0),
            ("000000001", 125.0),
            ("000000002", 75.0),
            ("000000003", 75.0),
        ]
    );
    assert_eq!(index.grid_info.max_block, 312_000);
    assert_eq!(index.grid_info.rows, 1);

    let mut stats = Buckets::with_grid_info(GridInfo::block_grid());
    let dated = StatsRecord {
        range: "000000000-000046146".into(),
        ratio: 2.0,
        apps_per_block: 1.0,
        addrs_per_block: 0.5,
        apps_per_addr: 2.0,
        range_dates: Some(RangeDates {
            first_date: "2015-07-30 15:26:28 UTC".into(),
            last_date: "2015-08-07 03:00:00 UTC".into(),
        }),
    };
    update_stats_bucket(&mut stats, &dated).unwrap();
    assert_eq!(stats.series("ratio").unwrap().len(), 9);
    assert_eq!(stats.grid_info.bucket_count, 9);
    assert_eq!(stats.grid_info.max_block, 46_146);
}

#[test]
fn test_malformed_records_leave_state() {
    let mut buckets = Buckets::with_grid_info(GridInfo::block_grid());
    update_index_bucket(
        &mut buckets,
        &IndexRecord {
            range: "0-10".into(),
            n_addresses: 1,
            n_appearances: 1,
            file_size: 1,
        },
    )
    .unwrap();
    let before = buckets.clone();

    for bad in ["", "10", "10-", "-10", "a-b", "20-10", "1-2-3"] {
        let record = IndexRecord {
            range: bad.into(),
            ..Default::default()
        };
        assert!(update_index_bucket(&mut buckets, &record).is_err(), "{bad:?}");
        assert_eq!(buckets, before, "{bad:?}");
    }
}
