//! Memoizing Wrapper Module
//!
//! Wraps an asynchronous backend fetch function into a cached version with
//! request coalescing: a fresh cache entry short-circuits the call, and
//! concurrent calls for the same key share one underlying fetch.
//!
//! Failures pass through unchanged and are never cached. Population is also
//! orthogonal to domain-level success: a fetch that *returns* an
//! application-level failure value is cached like any other value.
//!
//! A read that is in flight across an invalidating write may repopulate the
//! store with pre-write data just after the purge; the TTL bounds that
//! staleness window and the admin force-refresh covers the rest.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use futures::future::BoxFuture;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::cache::key::cache_key;
use crate::cache::SharedStore;
use crate::error::FetchError;

/// Outcome delivered to every coalesced waiter once a fetch settles.
type Settled = Result<Value, FetchError>;

type FetchFn<A, T> = Box<dyn Fn(A) -> BoxFuture<'static, anyhow::Result<T>> + Send + Sync>;

// == In-flight Request Registry ==
/// Transient map from cache key to the pending fetch for that key.
///
/// Entries exist only while a fetch is running; they are removed when the
/// fetch settles, whether or not the result was cached.
struct InFlightRegistry {
    pending: Mutex<HashMap<String, broadcast::Sender<Settled>>>,
}

enum Flight {
    /// This caller starts the fetch.
    Lead,
    /// Another call owns the fetch; wait for its outcome.
    Join(broadcast::Receiver<Settled>),
}

impl InFlightRegistry {
    fn new() -> Self {
        Self {
            pending: Mutex::new(HashMap::new()),
        }
    }

    fn join_or_lead(&self, key: &str) -> Flight {
        let mut pending = self.lock();
        match pending.get(key) {
            Some(tx) => Flight::Join(tx.subscribe()),
            None => {
                let (tx, _rx) = broadcast::channel(1);
                pending.insert(key.to_string(), tx);
                Flight::Lead
            }
        }
    }

    fn release(&self, key: &str) -> Option<broadcast::Sender<Settled>> {
        self.lock().remove(key)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, broadcast::Sender<Settled>>> {
        match self.pending.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                warn!("recovered poisoned in-flight registry lock");
                poisoned.into_inner()
            }
        }
    }
}

// == Flight Guard ==
/// Frees the in-flight slot if the leading task is dropped mid-fetch, so
/// coalesced waiters observe a closed channel instead of hanging.
struct FlightGuard<'a> {
    registry: &'a InFlightRegistry,
    key: &'a str,
    armed: bool,
}

impl FlightGuard<'_> {
    /// Removes the in-flight entry and broadcasts the outcome to waiters.
    fn settle(mut self, outcome: Settled) {
        self.armed = false;
        if let Some(tx) = self.registry.release(self.key) {
            // Errors only mean nobody coalesced onto this fetch.
            let _ = tx.send(outcome);
        }
    }
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.registry.release(self.key);
        }
    }
}

// == Memoized ==
/// A named backend fetch function with caching and coalescing applied.
///
/// The cache key is derived from the function name plus the canonical JSON
/// of the arguments, so equivalent argument values share one entry.
pub struct Memoized<A, T> {
    store: SharedStore,
    name: &'static str,
    /// Per-function TTL override; the store default applies when `None`
    ttl: Option<Duration>,
    in_flight: InFlightRegistry,
    fetch: FetchFn<A, T>,
}

impl<A, T> Memoized<A, T>
where
    A: Serialize + Send + 'static,
    T: Serialize + DeserializeOwned + Send + 'static,
{
    // == Constructor ==
    /// Wraps `fetch` so its results are cached in `store` under `name`.
    pub fn new<F, Fut>(
        store: SharedStore,
        name: &'static str,
        ttl: Option<Duration>,
        fetch: F,
    ) -> Self
    where
        F: Fn(A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<T>> + Send + 'static,
    {
        Self {
            store,
            name,
            ttl,
            in_flight: InFlightRegistry::new(),
            fetch: Box::new(move |args| Box::pin(fetch(args))),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    // == Call ==
    /// Invokes the wrapped function through the cache.
    ///
    /// Hit → cached value, no fetch. Key already in flight → wait for that
    /// fetch's outcome. Otherwise this call leads: it fetches, caches the
    /// result on success, and settles every waiter either way.
    pub async fn call(&self, args: A) -> Result<T, FetchError> {
        let key = cache_key(self.name, &args).map_err(|source| FetchError::Key {
            name: self.name,
            source: Arc::new(source),
        })?;

        // `get` takes the write lock: a hit refreshes recency and counters.
        if let Some(value) = self.store.write().await.get(&key) {
            return decode(&key, value);
        }

        let guard = match self.in_flight.join_or_lead(&key) {
            Flight::Join(mut rx) => {
                debug!(function = self.name, key = %key, "coalesced onto in-flight fetch");
                return match rx.recv().await {
                    Ok(Ok(value)) => decode(&key, value),
                    Ok(Err(err)) => Err(err),
                    Err(_) => Err(FetchError::Interrupted { key }),
                };
            }
            Flight::Lead => FlightGuard {
                registry: &self.in_flight,
                key: &key,
                armed: true,
            },
        };

        match (self.fetch)(args).await {
            Ok(result) => match serde_json::to_value(&result) {
                Ok(json) => {
                    self.store
                        .write()
                        .await
                        .set(key.clone(), json.clone(), self.ttl);
                    guard.settle(Ok(json));
                    Ok(result)
                }
                Err(source) => {
                    let err = FetchError::Encode {
                        name: self.name,
                        source: Arc::new(source),
                    };
                    guard.settle(Err(err.clone()));
                    Err(err)
                }
            },
            Err(cause) => {
                let err = FetchError::Backend {
                    name: self.name,
                    cause: Arc::new(cause),
                };
                guard.settle(Err(err.clone()));
                Err(err)
            }
        }
    }
}

fn decode<T: DeserializeOwned>(key: &str, value: Value) -> Result<T, FetchError> {
    serde_json::from_value(value).map_err(|source| FetchError::Decode {
        key: key.to_string(),
        source: Arc::new(source),
    })
}
