//! Request and Response models for the dashboard API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies. Catalog
//! records themselves live in `crate::catalog::types` and are served as-is.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{ActivityQuery, RefreshRequest};
pub use responses::{
    CacheStatsResponse, ClearResponse, ErrorResponse, HealthResponse, RefreshResponse,
};
