//! RON configuration for the docmeta CLI.
//!
//! Read from `./docmeta.ron` unless `--config` points elsewhere. Every field is
//! optional; a missing file means defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use docmeta_core::{NumberFormat, PipelineSettings, ProgressEstimator, DEFAULT_MAX_UPLOAD_BYTES};
use docmeta_engine::UploadSettings;
use docmeta_logging::LogDestination;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_CONFIG_FILENAME: &str = "docmeta.ron";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum ProgressMode {
    /// Advance a fixed step on every clock tick.
    FixedStep,
    /// Follow the bytes actually written to the connection.
    ByteCount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum LogTarget {
    File,
    Terminal,
    Both,
    Off,
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::File => LogDestination::File,
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::Both => LogDestination::Both,
            LogTarget::Off => LogDestination::Off,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server_url: String,
    pub tick_interval_ms: u64,
    pub progress_mode: ProgressMode,
    pub progress_step: u8,
    pub progress_ceiling: u8,
    pub max_upload_bytes: Option<u64>,
    pub connect_timeout_secs: Option<u64>,
    pub export_dir: PathBuf,
    pub log_destination: LogTarget,
    pub log_file: PathBuf,
    pub thousands_separator: Option<char>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_url: UploadSettings::default().server_url,
            tick_interval_ms: 100,
            progress_mode: ProgressMode::FixedStep,
            progress_step: 5,
            progress_ceiling: 90,
            max_upload_bytes: Some(DEFAULT_MAX_UPLOAD_BYTES),
            connect_timeout_secs: None,
            export_dir: PathBuf::from("."),
            log_destination: LogTarget::File,
            log_file: PathBuf::from(docmeta_logging::DEFAULT_LOG_FILE),
            thousands_separator: Some(','),
        }
    }
}

impl AppConfig {
    pub fn pipeline_settings(&self) -> PipelineSettings {
        let estimator = match self.progress_mode {
            ProgressMode::FixedStep => ProgressEstimator::FixedStep {
                step: self.progress_step,
                ceiling: self.progress_ceiling,
            },
            ProgressMode::ByteCount => ProgressEstimator::ByteCount {
                ceiling: self.progress_ceiling,
            },
        };
        PipelineSettings {
            estimator,
            max_upload_bytes: self.max_upload_bytes,
            number_format: NumberFormat {
                grouping_separator: self.thousands_separator,
            },
        }
    }

    pub fn upload_settings(&self) -> UploadSettings {
        UploadSettings {
            server_url: self.server_url.clone(),
            connect_timeout: self.connect_timeout_secs.map(Duration::from_secs),
            ..UploadSettings::default()
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
}

pub fn parse_config(text: &str, path: &Path) -> Result<AppConfig, ConfigError> {
    ron::from_str(text).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

/// Loads the config file; `Ok(None)` when it does not exist.
pub fn load_config(path: &Path) -> Result<Option<AppConfig>, ConfigError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    parse_config(&text, path).map(Some)
}
