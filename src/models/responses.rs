//! Response DTOs for the dashboard API
//!
//! Defines the structure of outgoing HTTP response bodies for the cache
//! debug panel and service endpoints.

use serde::Serialize;

use crate::cache::StoreSnapshot;

/// Response body for the cache debug panel (GET /cache/stats)
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatsResponse {
    /// One read-only snapshot per volatility class
    pub stores: Vec<StoreSnapshot>,
}

impl CacheStatsResponse {
    pub fn new(stores: Vec<StoreSnapshot>) -> Self {
        Self { stores }
    }
}

/// Response body for the clear control (POST /cache/clear)
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    pub message: String,
    pub cleared: usize,
}

impl ClearResponse {
    pub fn new(cleared: usize) -> Self {
        Self {
            message: format!("Cleared {} cache entries", cleared),
            cleared,
        }
    }
}

/// Response body for the refresh control (POST /cache/refresh)
#[derive(Debug, Clone, Serialize)]
pub struct RefreshResponse {
    pub message: String,
    pub purged: usize,
}

impl RefreshResponse {
    pub fn new(purged: usize) -> Self {
        Self {
            message: format!("Purged {} cache entries", purged),
            purged,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_response_serialize() {
        let resp = ClearResponse::new(7);
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"cleared\":7"));
        assert!(json.contains("Cleared 7"));
    }

    #[test]
    fn test_refresh_response_serialize() {
        let resp = RefreshResponse::new(2);
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"purged\":2"));
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }

    #[test]
    fn test_error_response_serialize() {
        let resp = ErrorResponse::new("Something went wrong");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("error"));
        assert!(json.contains("Something went wrong"));
    }
}
