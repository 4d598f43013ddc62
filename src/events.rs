//! Change feed.
//!
//! A publish-subscribe channel that write operations notify after a
//! successful mutation so dashboard panels can refetch. Deliberately
//! decoupled from the cache: the feed carries "what happened", the cache
//! registry decides what to purge.

use chrono::{DateTime, Utc};
use tokio::sync::broadcast;
use tracing::debug;

/// A domain mutation that subscribers may want to react to.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeEvent {
    /// Operation name, matching the invalidation router's vocabulary
    pub operation: String,
    /// Human-readable subject, e.g. the name of the saved meal
    pub detail: Option<String>,
    pub at: DateTime<Utc>,
}

/// Broadcast channel for [`ChangeEvent`]s.
///
/// Publishing with no subscribers is fine; events are simply dropped.
#[derive(Debug)]
pub struct ChangeFeed {
    tx: broadcast::Sender<ChangeEvent>,
}

impl ChangeFeed {
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn publish(&self, operation: &str, detail: Option<String>) {
        let event = ChangeEvent {
            operation: operation.to_string(),
            detail,
            at: Utc::now(),
        };
        debug!(operation, "change event published");
        let _ = self.tx.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new(64)
    }
}
