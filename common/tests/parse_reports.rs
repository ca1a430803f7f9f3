// Parsing captured nodetool reports end to end

use nodetop_common::{
    CacheKind, ClusterStatus, InfoSnapshot, MetricsHistory, NodeState, Ownership, SeriesKey,
    TableStatsSnapshot, HISTORY_CAPACITY,
};

const STATUS: &str = include_str!("data/status.txt");
const CFSTATS: &str = include_str!("data/cfstats.txt");
const INFO: &str = include_str!("data/info.txt");

const GARBAGE: &str = "error: connection refused\n\
                       ==================\n\
                       \t\t\x07 ~~ 12 34 56\n\
                       Note: nothing to see here\n";

#[test]
fn test_status_two_datacenters_fifteen_nodes_each() {
    let status = ClusterStatus::parse(STATUS);

    assert_eq!(status.datacenters.len(), 2);
    assert_eq!(status.datacenters[0].name, "DC1");
    assert_eq!(status.datacenters[1].name, "DC2");
    assert_eq!(status.datacenters[0].nodes.len(), 15);
    assert_eq!(status.datacenters[1].nodes.len(), 15);

    let first = &status.datacenters[0].nodes[0];
    assert_eq!(first.state, NodeState::UP_NORMAL);
    assert_eq!(first.address, "10.0.0.6");
    assert_eq!(first.load, "35.32 GB");
    assert_eq!(first.token_count, 256);
    assert_eq!(first.ownership, Ownership::Unknown);
    assert_eq!(first.ownership.to_string(), "?");
    assert_eq!(first.host_id, "99ca9b90-ba59-4411-be56-aafcabedc9c6");
    assert_eq!(first.rack, "5AB");

    let second = &status.datacenters[0].nodes[1];
    assert_eq!(second.ownership, Ownership::Share("50%".to_string()));
    assert_eq!(second.rack, "5AE");

    // Input order is preserved
    assert_eq!(status.datacenters[1].nodes[0].address, "10.1.0.4");
    assert_eq!(status.datacenters[1].nodes[14].address, "10.1.0.3");
}

#[test]
fn test_status_percent_up_normal() {
    let status = ClusterStatus::parse(STATUS);
    // 14 of 15 up in DC1, 8 of 15 in DC2
    assert_eq!(status.node_count(), 30);
    assert_eq!(status.up_normal_count(), 22);
    assert_eq!(status.percent_up_normal(), 73);
}

#[test]
fn test_cfstats_two_keyspaces() {
    let stats = TableStatsSnapshot::parse(CFSTATS);

    assert_eq!(stats.keyspaces.len(), 2);

    let traces = &stats.keyspaces[0];
    assert_eq!(traces.name, "system_traces");
    assert_eq!(traces.read_count, 0);
    assert!(traces.read_latency_ms.is_nan());
    assert_eq!(traces.write_count, 0);
    assert!(traces.write_latency_ms.is_nan());
    assert_eq!(traces.pending_flushes, 0);

    let system = &stats.keyspaces[1];
    assert_eq!(system.name, "system");
    assert_eq!(system.read_count, 2711500);
    assert_eq!(system.read_latency_ms, 1.4712197562234925);
    assert_eq!(system.write_count, 627466930);
    assert_eq!(system.write_latency_ms, 0.03867109357779222);
    assert_eq!(system.pending_flushes, 1);

    // One NaN keyspace makes the mean NaN
    assert!(stats.avg_read_latency().is_nan());
    assert!(stats.avg_write_latency().is_nan());
}

#[test]
fn test_info_scalars_and_caches() {
    let info = InfoSnapshot::parse(INFO);

    assert_eq!(info.id, "db28e0b4-b502-4c37-9c3a-45579987df89");
    assert!(info.gossip_active);
    assert!(info.thrift_active);
    assert!(info.native_transport_active);
    assert_eq!(info.load, "49.11 GB");
    assert_eq!(info.generation_number, 1422527983);
    assert_eq!(info.uptime_secs, 5186606);
    assert!((info.heap_usage_percent - 46.599418898433555).abs() < 1e-9);
    assert_eq!(info.data_center, "DC1");
    assert_eq!(info.rack, "5AB");
    assert_eq!(info.exception_count, 108);

    let key = info.cache(CacheKind::Key);
    assert_eq!(key.entries, 3319);
    assert_eq!(key.size, "65.05 MB");
    assert_eq!(key.capacity, "100 MB");
    assert_eq!(key.hits, 23999063);
    assert_eq!(key.requests, 29014197);
    assert_eq!(key.recent_hit_rate, 0.827);
    assert_eq!(key.save_period_secs, 14400);

    let row = info.cache(CacheKind::Row);
    assert_eq!(row.entries, 0);
    assert_eq!(row.size, "0 bytes");
    assert_eq!(row.capacity, "0 bytes");
    assert_eq!(row.hits, 0);
    assert_eq!(row.requests, 0);
    assert!(row.recent_hit_rate.is_nan());
    assert_eq!(row.save_period_secs, 7200);

    let counter = info.cache(CacheKind::Counter);
    assert_eq!(counter.capacity, "50 MB");
    assert!(counter.recent_hit_rate.is_nan());
}

#[test]
fn test_garbage_yields_empty_snapshots() {
    assert!(ClusterStatus::parse(GARBAGE).datacenters.is_empty());
    assert!(TableStatsSnapshot::parse(GARBAGE).keyspaces.is_empty());
    assert_eq!(InfoSnapshot::parse(GARBAGE), InfoSnapshot::default());

    assert!(ClusterStatus::parse("").datacenters.is_empty());
    assert_eq!(ClusterStatus::parse(GARBAGE).percent_up_normal(), 0);
}

#[test]
fn test_reports_fed_to_the_wrong_parser_are_harmless() {
    assert!(ClusterStatus::parse(INFO).datacenters.is_empty());
    assert!(TableStatsSnapshot::parse(STATUS).keyspaces.is_empty());
    assert_eq!(InfoSnapshot::parse(CFSTATS).id, "");
}

#[test]
fn test_history_keeps_most_recent_window() {
    let info = InfoSnapshot::parse(INFO);
    let mut history = MetricsHistory::new();
    for cycle in 0..(HISTORY_CAPACITY + 9) {
        history.append(SeriesKey::HeapUsage, info.heap_usage_percent + cycle as f64);
    }
    let series = history.series(SeriesKey::HeapUsage);
    assert_eq!(series.len(), HISTORY_CAPACITY);
    assert_eq!(series[0], info.heap_usage_percent + 9.0);
    assert!(series.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_snapshots_serialize_for_export() {
    let status = serde_json::to_value(ClusterStatus::parse(STATUS)).unwrap();
    let first = &status["datacenters"][0]["nodes"][0];
    assert_eq!(first["state"], "UN");
    assert!(first["ownership"].is_null());
    assert_eq!(status["datacenters"][0]["nodes"][1]["ownership"], "50%");

    // NaN has no JSON spelling
    let info = serde_json::to_value(InfoSnapshot::parse(INFO)).unwrap();
    assert!(info["row_cache"]["recent_hit_rate"].is_null());
    assert_eq!(info["key_cache"]["entries"], 3319);
}
