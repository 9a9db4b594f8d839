use std::collections::BTreeMap;
use std::result;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use common::http::ApiError;
use metadata::error::MetadataError;
use thiserror::Error;
use tracing::error;

pub type Result<T> = result::Result<T, PlatformError>;

#[derive(Error, Debug)]
pub enum PlatformError {
    #[error("invalid fields")]
    InvalidFields(BTreeMap<String, String>),
    #[error("not found: {0:?}")]
    NotFound(String),
    #[error("metadata: {0:?}")]
    Metadata(#[from] MetadataError),
}

impl PlatformError {
    pub fn into_api_error(self) -> ApiError {
        match self {
            PlatformError::InvalidFields(fields) => {
                ApiError::new(StatusCode::BAD_REQUEST).with_fields(fields)
            }
            PlatformError::NotFound(msg) => ApiError::not_found(msg),
            PlatformError::Metadata(err) => {
                error!("request failed: {err}");
                ApiError::internal()
            }
        }
    }
}

/// Collects per-field validation failures before anything is written.
#[derive(Default)]
pub struct ValidationError {
    fields: BTreeMap<String, String>,
}

impl ValidationError {
    pub fn new() -> Self {
        Self {
            fields: BTreeMap::new(),
        }
    }

    pub fn push(&mut self, field: impl Into<String>, err: impl Into<String>) {
        self.fields.insert(field.into(), err.into());
    }

    pub fn result(self) -> Result<()> {
        if self.fields.is_empty() {
            Ok(())
        } else {
            Err(PlatformError::InvalidFields(self.fields))
        }
    }
}

impl IntoResponse for PlatformError {
    fn into_response(self) -> Response {
        self.into_api_error().into_response()
    }
}
