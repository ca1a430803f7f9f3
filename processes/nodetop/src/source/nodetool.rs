//! Reports from the nodetool binary.

use std::process::Stdio;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

use super::{FetchError, Report, ReportSource};
use crate::config::NodetopConfig;

/// Runs `<command> <args..> <sub-command>` once per report.
#[derive(Debug)]
pub struct NodetoolSource {
    command: String,
    args: Vec<String>,
    timeout: Duration,
    description: String,
}

impl NodetoolSource {
    pub fn new(command: &str, args: Vec<String>, timeout: Duration) -> Self {
        let description = std::iter::once(command)
            .chain(args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ");
        Self {
            command: command.to_string(),
            args,
            timeout,
            description,
        }
    }

    pub fn from_config(config: &NodetopConfig) -> Self {
        Self::new(
            &config.nodetool_command,
            config.nodetool_args.clone(),
            config.command_timeout(),
        )
    }

    fn command_line(&self, report: Report) -> String {
        format!("{} {}", self.description, report.command())
    }
}

#[async_trait]
impl ReportSource for NodetoolSource {
    async fn fetch(&mut self, report: Report) -> Result<String, FetchError> {
        let command_line = self.command_line(report);
        let started = Instant::now();

        let mut command = Command::new(&self.command);
        command
            .args(&self.args)
            .arg(report.command())
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let output = tokio::time::timeout(self.timeout, command.output())
            .await
            .map_err(|_| FetchError::Timeout {
                command: command_line.clone(),
                timeout: self.timeout,
            })?
            .map_err(|source| FetchError::Spawn {
                command: command_line.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!(command = %command_line, status = %output.status, "nodetool failed");
            return Err(FetchError::ExitStatus {
                command: command_line,
                status: output.status,
                stderr,
            });
        }

        debug!(
            command = %command_line,
            bytes = output.stdout.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "nodetool finished"
        );
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn description(&self) -> &str {
        &self.description
    }
}
