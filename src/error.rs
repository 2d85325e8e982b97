//! Error types for the I/O edges of the explorer.
//!
//! The analytics engine itself never fails; these cover loading, config,
//! export and chart rendering.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config TOML: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Chart error: {0}")]
    Chart(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

pub type Result<T> = std::result::Result<T, Error>;
