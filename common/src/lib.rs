//! Nodetop common library
//!
//! Turns the free-form text of `nodetool status`, `nodetool cfstats` and
//! `nodetool info` into typed snapshots, and keeps the bounded metric history
//! the dashboard charts. Everything here is pure: no I/O, no shared state.
//!
//! ```
//! use nodetop_common::{ClusterStatus, InfoSnapshot};
//!
//! let status = ClusterStatus::parse("Datacenter: DC1\nUN  10.0.0.1  1 GB  256  ?  a1  r1\n");
//! assert_eq!(status.percent_up_normal(), 100);
//!
//! let info = InfoSnapshot::parse("Heap Memory (MB) : 50.00 / 200.00");
//! assert_eq!(info.heap_usage_percent, 25.0);
//! ```

pub mod history;
pub mod info;
pub mod pattern;
pub mod reading;
pub mod status;
pub mod table_stats;

// Flattened re-exports
pub use self::history::{BoundedSeries, MetricsHistory, SeriesKey, HISTORY_CAPACITY};
pub use self::info::{CacheKind, CacheStats, InfoSnapshot};
pub use self::pattern::LineShape;
pub use self::reading::Reading;
pub use self::status::{Availability, ClusterStatus, Datacenter, Mode, Node, NodeState, Ownership};
pub use self::table_stats::{Keyspace, TableStatsSnapshot};
