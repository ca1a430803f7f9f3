//! # nodetop
//!
//! A terminal dashboard for a single Cassandra node, fed by `nodetool`.
//!
//! Every refresh the poller runs `nodetool status`, `nodetool cfstats` and
//! `nodetool info`, parses them with `nodetop_common`, appends the derived
//! metrics to a bounded history and publishes one immutable
//! [`DashboardState`]. The TUI only ever reads published states.
//!
//! ## Usage
//!
//! ```bash
//! # Watch the local node, refreshing every 10 seconds
//! nodetop
//!
//! # Replay captured reports from a directory
//! nodetop --replay ./captures
//!
//! # Print one cycle as JSON and exit
//! nodetop --once
//! ```
//!
//! ### As a library
//!
//! ```no_run
//! use nodetop::{source::FileSource, Poller};
//!
//! # async fn example() -> Result<(), nodetop::source::FetchError> {
//! let mut poller = Poller::new(Box::new(FileSource::new("captures")), "cass-01".into());
//! let state = poller.poll_once().await?;
//! println!("{:?}", state.node_description());
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod events;
pub mod export;
pub mod poller;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::{App, View};
pub use config::NodetopConfig;
pub use data::DashboardState;
pub use poller::Poller;
pub use source::{FetchError, FileSource, NodetoolSource, Report, ReportSource};
