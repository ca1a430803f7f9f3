//! Where report text comes from.
//!
//! A source hands back the complete text of one report or an error; the
//! grammar does not support partial or streamed output.

mod file;
mod nodetool;

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

pub use file::FileSource;
pub use nodetool::NodetoolSource;

use crate::config::NodetopConfig;

/// The three reports a poll cycle needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Report {
    Status,
    TableStats,
    Info,
}

impl Report {
    /// nodetool sub-command producing this report
    pub fn command(&self) -> &'static str {
        match self {
            Report::Status => "status",
            Report::TableStats => "cfstats",
            Report::Info => "info",
        }
    }

    /// File name of a captured copy of this report
    pub fn file_name(&self) -> &'static str {
        match self {
            Report::Status => "status.txt",
            Report::TableStats => "cfstats.txt",
            Report::Info => "info.txt",
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.command())
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("`{command}` failed ({status}): {stderr}")]
    ExitStatus {
        command: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("`{command}` timed out after {}s", timeout.as_secs_f64())]
    Timeout { command: String, timeout: Duration },

    #[error("Cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A provider of raw report text
#[async_trait]
pub trait ReportSource: Send {
    /// Complete text of `report`, or why it could not be obtained
    async fn fetch(&mut self, report: Report) -> Result<String, FetchError>;

    /// Human readable description, shown in the status bar
    fn description(&self) -> &str;
}

/// Replay captured files when `replay_dir` is set, otherwise run nodetool
pub fn from_config(config: &NodetopConfig) -> Box<dyn ReportSource> {
    match config.replay_dir {
        Some(ref dir) => Box::new(FileSource::new(dir)),
        None => Box::new(NodetoolSource::from_config(config)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_names() {
        let commands: Vec<_> = [Report::Status, Report::TableStats, Report::Info]
            .iter()
            .map(Report::command)
            .collect();
        assert_eq!(commands, vec!["status", "cfstats", "info"]);
        assert_eq!(Report::TableStats.file_name(), "cfstats.txt");
        assert_eq!(Report::Info.to_string(), "info");
    }

    #[test]
    fn test_source_selection() {
        let mut config = NodetopConfig::try_load(None).unwrap();
        assert_eq!(from_config(&config).description(), "nodetool");

        config.replay_dir = Some(PathBuf::from("captures"));
        assert_eq!(from_config(&config).description(), "replay: captures");
    }
}
