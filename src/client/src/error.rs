use std::result;

use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = result::Result<T, ClientError>;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("http: {0:?}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {0}: {1:?}")]
    Status(StatusCode, Option<String>),
}
