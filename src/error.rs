use std::path::PathBuf;

use thiserror::Error;

/// Startup errors for orderdesk
#[derive(Debug, Error)]
pub enum OrderDeskError {
    #[error("Cannot read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
