//! Single-writer poll cycle
//!
//! The poller is the only owner of the metric history. Each cycle fetches
//! the three reports, parses them and publishes a complete `DashboardState`
//! through a watch channel, so readers only ever see whole cycles.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use tokio::sync::{watch, Notify};
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

use nodetop_common::{ClusterStatus, InfoSnapshot, MetricsHistory, SeriesKey, TableStatsSnapshot};

use crate::data::DashboardState;
use crate::source::{FetchError, Report, ReportSource};

pub struct Poller {
    source: Box<dyn ReportSource>,
    history: MetricsHistory,
    hostname: String,
    cycle: u64,
    latest: Arc<DashboardState>,
}

impl Poller {
    pub fn new(source: Box<dyn ReportSource>, hostname: String) -> Self {
        let latest = Arc::new(DashboardState::waiting(hostname.clone()));
        Self {
            source,
            history: MetricsHistory::new(),
            hostname,
            cycle: 0,
            latest,
        }
    }

    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// Last published state
    pub fn latest(&self) -> Arc<DashboardState> {
        self.latest.clone()
    }

    /// Run one full cycle
    ///
    /// On error nothing is appended to the history and the previously
    /// published state is left as it was.
    pub async fn poll_once(&mut self) -> Result<Arc<DashboardState>, FetchError> {
        let started = Instant::now();

        let status = ClusterStatus::parse(&self.source.fetch(Report::Status).await?);
        let table_stats = TableStatsSnapshot::parse(&self.source.fetch(Report::TableStats).await?);
        let info = InfoSnapshot::parse(&self.source.fetch(Report::Info).await?);

        self.history.append(SeriesKey::ReadLatency, table_stats.avg_read_latency());
        self.history.append(SeriesKey::WriteLatency, table_stats.avg_write_latency());
        self.history.append(SeriesKey::Exceptions, info.exception_count as f64);
        self.history.append(SeriesKey::HeapUsage, info.heap_usage_percent);
        self.history.append(
            SeriesKey::PercentUpNormal,
            f64::from(status.percent_up_normal()),
        );
        self.cycle += 1;

        info!(
            cycle = self.cycle,
            nodes = status.node_count(),
            keyspaces = table_stats.keyspaces.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Poll cycle complete"
        );

        self.latest = Arc::new(DashboardState {
            cycle: self.cycle,
            hostname: self.hostname.clone(),
            status: Some(status),
            table_stats: Some(table_stats),
            info: Some(info),
            history: self.history.clone(),
            updated_at: Some(Utc::now()),
            last_error: None,
        });
        Ok(self.latest.clone())
    }

    /// Republish the previous state with the error attached
    fn record_failure(&mut self, err: &FetchError) -> Arc<DashboardState> {
        let mut state = (*self.latest).clone();
        state.last_error = Some(err.to_string());
        self.latest = Arc::new(state);
        self.latest.clone()
    }

    /// Poll on `interval` until every receiver is gone
    ///
    /// A `refresh` notification runs a cycle immediately and restarts the
    /// interval. With `fail_fast` the first fetch error ends the loop.
    pub async fn run(
        mut self,
        interval: Duration,
        fail_fast: bool,
        tx: watch::Sender<Arc<DashboardState>>,
        refresh: Arc<Notify>,
    ) -> Result<(), FetchError> {
        info!(
            source = self.source.description(),
            interval_secs = interval.as_secs_f64(),
            "Starting poller"
        );

        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                _ = refresh.notified() => {
                    debug!("Manual refresh requested");
                    ticker.reset();
                }
                _ = tx.closed() => {
                    debug!("Dashboard closed, stopping poller");
                    return Ok(());
                }
            }

            let state = match self.poll_once().await {
                Ok(state) => state,
                Err(e) => {
                    error!(cycle = self.cycle, "Poll cycle failed: {e}");
                    if fail_fast {
                        return Err(e);
                    }
                    self.record_failure(&e)
                }
            };

            if tx.send(state).is_err() {
                debug!("Dashboard closed, stopping poller");
                return Ok(());
            }
        }
    }
}
