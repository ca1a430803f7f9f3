use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

use nodetop_common::{ClusterStatus, InfoSnapshot, MetricsHistory, TableStatsSnapshot};

use super::format::format_flag;

const UNKNOWN_HOST: &str = "Unknown";

/// Everything the dashboard draws, published whole after each poll cycle
#[derive(Debug, Clone, Default, Serialize)]
pub struct DashboardState {
    pub cycle: u64,
    pub hostname: String,
    pub status: Option<ClusterStatus>,
    pub table_stats: Option<TableStatsSnapshot>,
    pub info: Option<InfoSnapshot>,
    pub history: MetricsHistory,
    pub updated_at: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
}

impl DashboardState {
    /// State before the first cycle completes
    pub fn waiting(hostname: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            ..Self::default()
        }
    }

    pub fn has_data(&self) -> bool {
        self.status.is_some() || self.table_stats.is_some() || self.info.is_some()
    }

    /// `<dc>::<rack>::<host> | ✔ GOSSIP ✘ THRIFT ✔ NATIVE`
    pub fn node_description(&self) -> Option<String> {
        self.info.as_ref().map(|info| {
            format!(
                "{}::{}::{} | {} GOSSIP {} THRIFT {} NATIVE",
                info.data_center,
                info.rack,
                self.hostname,
                format_flag(info.gossip_active),
                format_flag(info.thrift_active),
                format_flag(info.native_transport_active),
            )
        })
    }

    pub fn percent_up_normal(&self) -> u8 {
        self.status.as_ref().map(ClusterStatus::percent_up_normal).unwrap_or(0)
    }
}

/// Local host name, or `Unknown` if it cannot be read
pub fn local_hostname() -> String {
    match hostname::get() {
        Ok(name) => name.to_string_lossy().into_owned(),
        Err(e) => {
            warn!("Failed to read hostname: {e}");
            UNKNOWN_HOST.to_string()
        }
    }
}
