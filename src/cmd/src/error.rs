use std::net::AddrParseError;
use std::result;

use metrics_exporter_prometheus::BuildError;
use thiserror::Error;
use tracing::subscriber::SetGlobalDefaultError;

pub type Result<T> = result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("config: {0:?}")]
    Config(#[from] config::ConfigError),
    #[error("IP Address Parse Error: {0:?}")]
    AddrParseError(#[from] AddrParseError),
    #[error("StdIO: {0:?}")]
    StdIO(#[from] std::io::Error),
    #[error("metrics: {0:?}")]
    Metrics(#[from] BuildError),
    #[error("SetGlobalDefaultError: {0:?}")]
    SetGlobalDefaultError(#[from] SetGlobalDefaultError),
    #[error("file not found: {0}")]
    FileNotFound(String),
}
