//! Cache Entry Module
//!
//! Defines the structure for individual memoized results with TTL support.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde_json::Value;

// == Cache Entry ==
/// A single memoized result with its expiration metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The memoized result as canonical JSON
    pub value: Value,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: u64,
    /// Expiration timestamp (Unix milliseconds); always strictly after
    /// `created_at`
    pub expires_at: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry expiring `ttl` after now.
    pub fn new(value: Value, ttl: Duration) -> Self {
        let now = current_timestamp_ms();
        Self {
            value,
            created_at: now,
            expires_at: now + ttl.as_millis().max(1) as u64,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// Boundary condition: an entry is expired when the current time is
    /// greater than or equal to its expiration time. Expired entries may
    /// remain physically present; readers must treat them as absent.
    pub fn is_expired(&self) -> bool {
        current_timestamp_ms() >= self.expires_at
    }

    // == Age ==
    /// Milliseconds elapsed since the entry was created.
    ///
    /// Used by the diagnostic snapshot only.
    pub fn age_ms(&self) -> u64 {
        current_timestamp_ms().saturating_sub(self.created_at)
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use std::thread::sleep;

    use serde_json::json;

    use super::*;

    #[test]
    fn test_entry_creation() {
        let entry = CacheEntry::new(json!(["adobo", "sinigang"]), Duration::from_secs(60));

        assert_eq!(entry.value, json!(["adobo", "sinigang"]));
        assert!(entry.expires_at > entry.created_at);
        assert!(!entry.is_expired());
    }

    #[test]
    fn test_entry_expiration() {
        let entry = CacheEntry::new(json!(1), Duration::from_millis(50));

        assert!(!entry.is_expired());
        sleep(Duration::from_millis(60));
        assert!(entry.is_expired());
    }

    #[test]
    fn test_zero_ttl_still_orders_timestamps() {
        // A zero duration is clamped so expires_at stays after created_at.
        let entry = CacheEntry::new(json!(null), Duration::ZERO);
        assert!(entry.expires_at > entry.created_at);
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let now = current_timestamp_ms();
        let entry = CacheEntry {
            value: json!("boundary"),
            created_at: now.saturating_sub(1),
            expires_at: now,
        };

        assert!(entry.is_expired(), "Entry should be expired at boundary");
    }

    #[test]
    fn test_age_ms_grows() {
        let entry = CacheEntry::new(json!(true), Duration::from_secs(10));
        sleep(Duration::from_millis(20));
        assert!(entry.age_ms() >= 20);
    }
}
