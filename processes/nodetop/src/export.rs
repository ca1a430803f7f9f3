//! JSON export of a dashboard state for `--once`

use serde_json::{json, Map, Value};

use nodetop_common::SeriesKey;

use crate::data::DashboardState;

/// Snapshots plus the scalars the dashboard derives from them
///
/// NaN and infinite values serialize as `null`.
pub fn snapshot_json(state: &DashboardState) -> Value {
    let table_stats = state.table_stats.as_ref();
    let latest: Map<String, Value> = SeriesKey::ALL
        .iter()
        .map(|&key| (key.label().to_string(), json!(state.history.latest(key))))
        .collect();
    json!({
        "hostname": state.hostname,
        "node": state.node_description(),
        "cycle": state.cycle,
        "updated_at": state.updated_at,
        "derived": {
            "percent_up_normal": state.percent_up_normal(),
            "avg_read_latency_ms": table_stats.map(|t| t.avg_read_latency()),
            "avg_write_latency_ms": table_stats.map(|t| t.avg_write_latency()),
            "total_pending_flushes": table_stats.map(|t| t.total_pending_flushes()),
            "heap_usage_percent": state.info.as_ref().map(|i| i.heap_usage_percent),
        },
        "latest": latest,
        "status": state.status,
        "table_stats": state.table_stats,
        "info": state.info,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use nodetop_common::{ClusterStatus, InfoSnapshot, TableStatsSnapshot};

    #[test]
    fn test_waiting_state_exports_nulls() {
        let value = snapshot_json(&DashboardState::waiting("cass-01"));
        assert_eq!(value["hostname"], "cass-01");
        assert_eq!(value["cycle"], 0);
        assert!(value["node"].is_null());
        assert!(value["status"].is_null());
        assert_eq!(value["derived"]["percent_up_normal"], 0);
        assert_eq!(value["latest"].as_object().unwrap().len(), SeriesKey::ALL.len());
        assert!(value["latest"]["Heap Used"].is_null());
    }

    #[test]
    fn test_export_latest_sample_per_series() {
        let mut state = DashboardState::waiting("cass-01");
        state.history.append(SeriesKey::HeapUsage, 10.0);
        state.history.append(SeriesKey::HeapUsage, 25.0);
        state.history.append(SeriesKey::ReadLatency, f64::NAN);

        let value = snapshot_json(&state);
        assert_eq!(value["latest"]["Heap Used"], 25.0);
        assert!(value["latest"]["Read Latency"].is_null());
        assert!(value["latest"]["Num UN Nodes"].is_null());
    }

    #[test]
    fn test_export_snapshots() {
        let state = DashboardState {
            cycle: 1,
            status: Some(ClusterStatus::parse(
                "Datacenter: DC1\nUN  10.0.0.1  1 GB  256  ?  a1  r1\nDN  10.0.0.2  1 GB  256  50%  a2  r1\n",
            )),
            table_stats: Some(TableStatsSnapshot::parse(
                "Keyspace: ks\n\tRead Latency: NaN ms.\n\tPending Flushes: 2\n",
            )),
            info: Some(InfoSnapshot::parse(
                "Heap Memory (MB) : 50.00 / 200.00\nData Center : DC1\nRack : r1\n",
            )),
            ..DashboardState::waiting("cass-01")
        };

        let value = snapshot_json(&state);
        assert_eq!(value["derived"]["percent_up_normal"], 50);
        assert!(value["derived"]["avg_read_latency_ms"].is_null());
        assert_eq!(value["derived"]["total_pending_flushes"], 2);
        assert_eq!(value["derived"]["heap_usage_percent"], 25.0);
        assert_eq!(value["status"]["datacenters"][0]["nodes"][0]["state"], "UN");
        assert!(value["status"]["datacenters"][0]["nodes"][0]["ownership"].is_null());
        assert_eq!(value["table_stats"]["keyspaces"][0]["name"], "ks");
        assert!(value["node"].as_str().unwrap().starts_with("DC1::r1::cass-01"));
    }
}
