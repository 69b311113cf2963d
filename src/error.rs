// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

/// Failure loading a [`ReportConfig`](crate::config::ReportConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config from '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config is not valid JSON for this schema: {0}")]
    Parse(#[from] serde_json::Error),
}
