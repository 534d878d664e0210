//! Per-consumer cache of fetched result lists.
//!
//! Each key owns a slot guarded by its own async lock, so concurrent
//! requests for one key share a single fetch while other keys proceed
//! independently. Every stored value is also published on a watch channel
//! for consumers that observe the list instead of polling it.

use crate::error::Result;
use std::collections::HashMap;
use std::fmt::Debug;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use tokio::sync::{Mutex, watch};
use tracing::debug;

struct Slot<T> {
    value: Mutex<Option<Arc<T>>>,
    updates: watch::Sender<Option<Arc<T>>>,
}

impl<T> Slot<T> {
    fn new() -> Self {
        let (updates, _) = watch::channel(None);
        Self {
            value: Mutex::new(None),
            updates,
        }
    }

    fn store(&self, guard: &mut Option<Arc<T>>, value: Option<Arc<T>>) {
        *guard = value.clone();
        self.updates.send_replace(value);
    }
}

/// Lazily-filled cache keyed by consumer identity
pub struct SessionCache<K, T> {
    slots: Mutex<HashMap<K, Arc<Slot<T>>>>,
}

impl<K, T> Default for SessionCache<K, T> {
    fn default() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
        }
    }
}

impl<K, T> SessionCache<K, T>
where
    K: Eq + Hash + Clone + Debug,
{
    pub fn new() -> Self {
        Self::default()
    }

    async fn slot(&self, key: &K) -> Arc<Slot<T>> {
        let mut slots = self.slots.lock().await;
        Arc::clone(
            slots
                .entry(key.clone())
                .or_insert_with(|| Arc::new(Slot::new())),
        )
    }

    /// Return the cached value, fetching it first if the key has none.
    ///
    /// A failed fetch leaves the slot empty so the next call retries.
    pub async fn get_or_fetch<F, Fut>(&self, key: &K, fetch: F) -> Result<Arc<T>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let slot = self.slot(key).await;
        let mut value = slot.value.lock().await;

        if let Some(cached) = value.as_ref() {
            return Ok(Arc::clone(cached));
        }

        debug!("Cache miss for {:?}, fetching", key);
        let fetched = Arc::new(fetch().await?);
        slot.store(&mut value, Some(Arc::clone(&fetched)));
        Ok(fetched)
    }

    /// Fetch unconditionally and replace the cached value
    pub async fn refresh<F, Fut>(&self, key: &K, fetch: F) -> Result<Arc<T>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let slot = self.slot(key).await;
        let mut value = slot.value.lock().await;

        debug!("Refreshing {:?}", key);
        let fetched = Arc::new(fetch().await?);
        slot.store(&mut value, Some(Arc::clone(&fetched)));
        Ok(fetched)
    }

    /// Drop the cached value. Returns whether one was present.
    pub async fn invalidate(&self, key: &K) -> bool {
        let slot = {
            let slots = self.slots.lock().await;
            match slots.get(key) {
                Some(slot) => Arc::clone(slot),
                None => return false,
            }
        };

        let mut value = slot.value.lock().await;
        let had_value = value.is_some();
        slot.store(&mut value, None);
        had_value
    }

    /// Cached value without fetching
    pub async fn cached(&self, key: &K) -> Option<Arc<T>> {
        let slot = {
            let slots = self.slots.lock().await;
            Arc::clone(slots.get(key)?)
        };
        slot.value.lock().await.clone()
    }

    /// Observe the value stored for `key`; `None` until the first fetch
    pub async fn subscribe(&self, key: &K) -> watch::Receiver<Option<Arc<T>>> {
        self.slot(key).await.updates.subscribe()
    }

    /// Forget `key` entirely. Existing subscribers stop receiving updates.
    /// Returns whether the key had a slot.
    pub async fn remove(&self, key: &K) -> bool {
        self.slots.lock().await.remove(key).is_some()
    }

    pub async fn len(&self) -> usize {
        self.slots.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.slots.lock().await.is_empty()
    }
}
