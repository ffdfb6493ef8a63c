//! Collection-level tests: concurrent ingest, wire shape, and view loading.

use std::sync::Arc;
use std::thread;

use tally_config::ViewConfig;
use tally_core::GridInfo;
use tally_engine::{IndexRecord, RangeDates, Statement, StatsRecord};
use tally_facets::prelude::*;

// =============================================================================
// TEST DATA GENERATORS
// =============================================================================

const ASSETS: [(&str, &str); 3] = [
    ("0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa", "AAA"),
    ("0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb", "BBB"),
    ("0xcccccccccccccccccccccccccccccccccccccccc", "CCC"),
];

fn statement(i: u64) -> Statement {
    let (asset, symbol) = ASSETS[(i % 3) as usize];
    Statement {
        asset: asset.into(),
        symbol: symbol.into(),
        decimals: 18,
        timestamp: 1_572_566_400 + (i as i64 % 10) * 86_400,
        amount_in: "1000000000000000000".into(),
        sender: format!("0x{:040x}", i % 4 + 1),
        ..Default::default()
    }
}

fn index(i: u64) -> IndexRecord {
    IndexRecord {
        range: format!("{:09}-{:09}", i * 50_000, i * 50_000 + 49_999),
        n_addresses: 10,
        n_appearances: 20,
        file_size: 30,
    }
}

// =============================================================================
// CONCURRENCY
// =============================================================================

#[test]
fn test_concurrent_statements_match_sequential_rebuild() {
    let concurrent = Arc::new(ExportsCollection::new(ViewConfig::new()));
    let handles: Vec<_> = (0..4)
        .map(|t| {
            let exports = Arc::clone(&concurrent);
            thread::spawn(move || {
                for i in 0..25 {
                    exports.add_statement(Some(statement(t * 25 + i)));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    // Series depend only on the set of statements, not arrival order, for
    // every metric except endBal, which is constant here.
    let sequential = ExportsCollection::new(ViewConfig::new());
    for i in 0..100 {
        sequential.add_statement(Some(statement(i)));
    }

    assert_eq!(concurrent.statements().len(), 100);
    assert_eq!(
        concurrent.get_buckets("assetcharts"),
        sequential.get_buckets("assetcharts")
    );
}

#[test]
fn test_concurrent_index_updates() {
    let chunks = Arc::new(ChunksCollection::new());
    let handles: Vec<_> = (0..4)
        .map(|t| {
            let chunks = Arc::clone(&chunks);
            thread::spawn(move || {
                for i in 0..10 {
                    chunks.add_index(Some(index(t * 10 + i)));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let buckets = chunks.get_buckets("index");
    let series = buckets.series("nAddresses").unwrap();
    assert_eq!(series.len(), 20);
    assert!(series.iter().all(|b| b.total == 20.0));
    assert_eq!(buckets.grid_info.bucket_count, 20);
    assert_eq!(buckets.grid_info.max_block, 1_999_999);
}

// =============================================================================
// FAILURE ABSORPTION
// =============================================================================

#[test]
fn test_malformed_records_never_surface() {
    let chunks = ChunksCollection::new();
    chunks.add_index(Some(index(0)));
    chunks.add_stats(Some(StatsRecord {
        range: "0-10".into(),
        ratio: 1.0,
        ..Default::default()
    }));
    let index_before = chunks.get_buckets("index");
    let stats_before = chunks.get_buckets("stats");

    chunks.add_index(Some(IndexRecord {
        range: "ten-twenty".into(),
        ..Default::default()
    }));
    chunks.add_stats(Some(StatsRecord {
        range: "0-10".into(),
        range_dates: Some(RangeDates {
            first_date: "2020-02-01".into(),
            last_date: "2020-01-01".into(),
        }),
        ..Default::default()
    }));

    assert_eq!(chunks.get_buckets("index"), index_before);
    assert_eq!(chunks.get_buckets("stats"), stats_before);
    assert_eq!(chunks.index_records().len(), 2);
    assert_eq!(chunks.stats_records().len(), 2);
}

#[test]
fn test_unknown_selectors_use_collection_grid() {
    let chunks = ChunksCollection::new();
    let exports = ExportsCollection::new(ViewConfig::new());
    assert_eq!(chunks.get_buckets("").grid_info, GridInfo::block_grid());
    assert_eq!(exports.get_buckets("").grid_info, GridInfo::time_grid());
}

// =============================================================================
// WIRE SHAPE AND CONFIG
// =============================================================================

#[test]
fn test_assetcharts_wire_shape() {
    let exports = ExportsCollection::new(ViewConfig::new());
    exports.add_statement(Some(statement(0)));

    let json = serde_json::to_value(exports.get_buckets("assetcharts")).unwrap();
    let bucket = &json["series"]["0xaaaaaaaaaaaa_AAA.frequency"][0];
    assert_eq!(bucket["bucketIndex"], "20191101");
    assert_eq!(bucket["total"], 1.0);
    assert_eq!(json["series0"], serde_json::json!([]));
    assert_eq!(json["gridInfo"]["size"], 86_400);
    assert_eq!(json["gridInfo"]["columns"], 4);
    assert_eq!(json["gridInfo"]["bucketCount"], 1);
}

#[test]
fn test_view_from_json_drives_series_names() {
    let view = ViewConfig::from_json_str(
        r#"{"facets":{"assetcharts":{"name":"Charts",
            "facetChartConfig":{"seriesStrategy":"symbol","seriesPrefixLen":12}}}}"#,
    )
    .unwrap();
    let exports = ExportsCollection::new(view);
    for i in 0..3 {
        exports.add_statement(Some(statement(i)));
    }

    let buckets = exports.get_buckets("assetcharts");
    let mut ids: Vec<_> = buckets
        .series_names()
        .filter_map(|name| name.strip_suffix(".neighbors"))
        .collect();
    ids.sort_unstable();
    assert_eq!(ids, vec!["AAA", "BBB", "CCC"]);
}
