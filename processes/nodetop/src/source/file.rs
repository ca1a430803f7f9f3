//! Replay of captured reports.
//!
//! Reads `status.txt`, `cfstats.txt` and `info.txt` from a directory on every
//! fetch, so the files can be swapped while the dashboard runs.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use super::{FetchError, Report, ReportSource};

/// A source that reads report text from captured files.
#[derive(Debug)]
pub struct FileSource {
    dir: PathBuf,
    description: String,
}

impl FileSource {
    /// Create a new file source reading from the given directory.
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref().to_path_buf();
        let description = format!("replay: {}", dir.display());
        Self { dir, description }
    }
}

#[async_trait]
impl ReportSource for FileSource {
    async fn fetch(&mut self, report: Report) -> Result<String, FetchError> {
        let path = self.dir.join(report.file_name());
        debug!(%report, path = %path.display(), "Reading captured report");
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
            Err(source) => Err(FetchError::Read { path, source }),
        }
    }

    fn description(&self) -> &str {
        &self.description
    }
}
