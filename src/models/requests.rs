//! Request DTOs for the dashboard API
//!
//! Defines the structure of incoming HTTP request bodies and query strings
//! that are not catalog records themselves.

use serde::Deserialize;

/// Request body for the cache refresh control (POST /cache/refresh)
///
/// # Fields
/// - `patterns`: key patterns to purge from every store
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshRequest {
    pub patterns: Vec<String>,
}

impl RefreshRequest {
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.patterns.is_empty() {
            return Some("At least one pattern is required".to_string());
        }
        if self.patterns.iter().any(|p| p.trim().is_empty()) {
            return Some("Patterns cannot be empty".to_string());
        }
        None
    }
}

/// Query string for the activity feed (GET /catalog/activities)
#[derive(Debug, Clone, Deserialize)]
pub struct ActivityQuery {
    /// Number of entries to return (default 25)
    #[serde(default)]
    pub limit: Option<usize>,
}

impl ActivityQuery {
    pub fn limit(&self) -> usize {
        self.limit.unwrap_or(25)
    }
}
