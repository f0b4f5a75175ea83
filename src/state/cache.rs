//! Local entity cache
//!
//! This module holds the client-side mirror of each backend collection.
//! The server stays authoritative: mutations land here only after a
//! successful response, by splicing in the server's returned entity.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use crate::utils::errors::{PortalError, Result};

/// Anything stored in an [`EntityCache`] exposes its opaque identifier.
pub trait Keyed {
    fn key(&self) -> &str;
}

struct CacheInner<T> {
    items: Vec<T>,
    in_flight: HashSet<String>,
}

/// Ordered local mirror of one backend collection.
///
/// Also tracks which entity ids have a mutating request in flight, so the
/// action layer can refuse a second concurrent mutation on the same row.
/// Cloning the cache clones a handle to the same collection.
#[derive(Clone)]
pub struct EntityCache<T> {
    inner: Arc<Mutex<CacheInner<T>>>,
    resource: &'static str,
}

impl<T: Keyed + Clone> EntityCache<T> {
    pub fn new(resource: &'static str) -> Self {
        Self {
            inner: Arc::new(Mutex::new(CacheInner {
                items: Vec::new(),
                in_flight: HashSet::new(),
            })),
            resource,
        }
    }

    /// Replace the whole collection with a freshly fetched one
    pub fn replace_all(&self, items: Vec<T>) {
        let mut inner = self.inner.lock().expect("cache poisoned");
        debug!(resource = self.resource, count = items.len(), "Cache collection replaced");
        inner.items = items;
    }

    /// Append a newly created entity
    pub fn insert(&self, item: T) {
        let mut inner = self.inner.lock().expect("cache poisoned");
        inner.items.push(item);
    }

    /// Replace the entry with the same key; appends when the entry is new
    pub fn replace(&self, item: T) {
        let mut inner = self.inner.lock().expect("cache poisoned");
        match inner.items.iter_mut().find(|existing| existing.key() == item.key()) {
            Some(existing) => *existing = item,
            None => {
                warn!(
                    resource = self.resource,
                    id = item.key(),
                    "Replacing entity absent from cache; appending"
                );
                inner.items.push(item);
            }
        }
    }

    /// Mutate the single matching entry in place; other entries untouched.
    /// Returns false when the id is unknown.
    pub fn update<F: FnOnce(&mut T)>(&self, id: &str, mutate: F) -> bool {
        let mut inner = self.inner.lock().expect("cache poisoned");
        match inner.items.iter_mut().find(|item| item.key() == id) {
            Some(item) => {
                mutate(item);
                true
            }
            None => false,
        }
    }

    /// Remove the entry with the given id. Returns false when absent.
    pub fn remove(&self, id: &str) -> bool {
        let mut inner = self.inner.lock().expect("cache poisoned");
        let before = inner.items.len();
        inner.items.retain(|item| item.key() != id);
        inner.items.len() < before
    }

    pub fn get(&self, id: &str) -> Option<T> {
        let inner = self.inner.lock().expect("cache poisoned");
        inner.items.iter().find(|item| item.key() == id).cloned()
    }

    /// Clone of the current collection, in backend order
    pub fn snapshot(&self) -> Vec<T> {
        let inner = self.inner.lock().expect("cache poisoned");
        inner.items.clone()
    }

    pub fn len(&self) -> usize {
        let inner = self.inner.lock().expect("cache poisoned");
        inner.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Mark a mutating request in flight for `id`.
    ///
    /// The returned guard releases the row on drop, so the busy marker
    /// clears on success, failure and panic alike. A second call for the
    /// same id while the guard lives returns `RequestInFlight`.
    pub fn begin_mutation(&self, id: &str) -> Result<BusyGuard<T>> {
        let mut inner = self.inner.lock().expect("cache poisoned");
        if !inner.in_flight.insert(id.to_string()) {
            return Err(PortalError::RequestInFlight {
                resource: self.resource,
                id: id.to_string(),
            });
        }
        debug!(resource = self.resource, id = id, "Row marked busy");
        Ok(BusyGuard {
            cache: self.inner.clone(),
            resource: self.resource,
            id: id.to_string(),
        })
    }

    /// Whether a mutating request is in flight for `id` (UI disables the row)
    pub fn is_busy(&self, id: &str) -> bool {
        let inner = self.inner.lock().expect("cache poisoned");
        inner.in_flight.contains(id)
    }
}

/// Scoped busy marker for one entity row; releases on drop
pub struct BusyGuard<T> {
    cache: Arc<Mutex<CacheInner<T>>>,
    resource: &'static str,
    id: String,
}

impl<T> Drop for BusyGuard<T> {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.cache.lock() {
            inner.in_flight.remove(&self.id);
            debug!(resource = self.resource, id = %self.id, "Row busy marker released");
        }
    }
}
