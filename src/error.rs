//! Error types for the caching layer and its HTTP surface
//!
//! Provides unified error handling using thiserror.

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Fetch Error Enum ==
/// Failure surfaced by a memoized read.
///
/// Cloneable so a single failure can be delivered identically to every
/// coalesced waiter; underlying sources are shared behind `Arc`. The cache
/// layer never caches one of these: the entry that would have been written
/// simply does not exist, and the next call re-invokes the fetch.
#[derive(Error, Debug, Clone)]
pub enum FetchError {
    /// The wrapped backend call failed
    #[error("backend fetch for `{name}` failed: {cause}")]
    Backend {
        name: &'static str,
        cause: Arc<anyhow::Error>,
    },

    /// The arguments could not be serialized into a cache key
    #[error("arguments for `{name}` could not be serialized")]
    Key {
        name: &'static str,
        #[source]
        source: Arc<serde_json::Error>,
    },

    /// The fetched result could not be serialized for caching
    #[error("result of `{name}` could not be serialized")]
    Encode {
        name: &'static str,
        #[source]
        source: Arc<serde_json::Error>,
    },

    /// A cached value no longer matches the expected shape
    #[error("cached entry `{key}` could not be decoded")]
    Decode {
        key: String,
        #[source]
        source: Arc<serde_json::Error>,
    },

    /// The leading fetch was dropped before it settled
    #[error("coalesced fetch for `{key}` was dropped before settling")]
    Interrupted { key: String },
}

// == API Error Enum ==
/// Unified error type for the dashboard's HTTP surface.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Requested record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A memoized read failed
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// A backend write failed
    #[error("Backend write failed: {0}")]
    Write(#[from] anyhow::Error),
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Fetch(_) | ApiError::Write(_) => StatusCode::BAD_GATEWAY,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for HTTP handlers.
pub type ApiResult<T> = std::result::Result<T, ApiError>;
