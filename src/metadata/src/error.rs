use std::result;

use thiserror::Error;

pub type Result<T> = result::Result<T, MetadataError>;

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("serde: {0:?}")]
    Serde(#[from] serde_json::Error),
    #[error("io {0}")]
    Io(#[from] std::io::Error),
}
