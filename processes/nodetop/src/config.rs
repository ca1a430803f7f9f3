//! Layered configuration: embedded defaults, optional file, environment

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

const DEFAULT_CONFIG: &str = include_str!("../config.default.toml");
const DEFAULT_CONFIG_NAME: &str = "nodetop";
const ENV_PREFIX: &str = "NODETOP";

#[derive(Debug, Clone, Deserialize)]
pub struct NodetopConfig {
    pub nodetool_command: String,
    #[serde(default)]
    pub nodetool_args: Vec<String>,
    pub refresh_secs: u64,
    pub command_timeout_secs: u64,
    pub fail_fast: bool,
    pub log_file: PathBuf,
    #[serde(default)]
    pub replay_dir: Option<PathBuf>,
}

impl NodetopConfig {
    /// Load defaults, then `path` (or `nodetop.toml` if present), then `NODETOP_*`
    ///
    /// An explicitly named file must exist; the implicit one is optional.
    pub fn try_load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };

        let full = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .list_separator(" ")
                    .with_list_parse_key("nodetool_args"),
            )
            .build()?;
        Ok(full.try_deserialize()?)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_secs.max(1))
    }

    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs.max(1))
    }
}
