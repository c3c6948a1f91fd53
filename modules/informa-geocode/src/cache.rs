use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use informa_common::{GeocodeRequest, GeocodeResult};
use serde_json::Value;
use tokio::sync::OnceCell;

/// Outcome of a resolution, as remembered by the cache.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CacheEntry {
    Resolved(GeocodeResult),
    NoResult,
}

impl CacheEntry {
    pub fn result(self) -> Option<GeocodeResult> {
        match self {
            CacheEntry::Resolved(result) => Some(result),
            CacheEntry::NoResult => None,
        }
    }
}

impl From<Option<GeocodeResult>> for CacheEntry {
    fn from(result: Option<GeocodeResult>) -> Self {
        result.map_or(CacheEntry::NoResult, CacheEntry::Resolved)
    }
}

/// Canonical key for a request: a JSON array of the four fields in fixed
/// order, `null` for missing ones. Values are not trimmed.
pub fn cache_key(request: &GeocodeRequest) -> String {
    let fields = request
        .fields()
        .into_iter()
        .map(|field| field.map_or(Value::Null, Value::from))
        .collect();
    Value::Array(fields).to_string()
}

type Slot = Arc<OnceCell<CacheEntry>>;

/// Process-lifetime, write-once map from request key to outcome.
///
/// No eviction and no expiry. Each key owns a cell that is filled at most
/// once; concurrent resolutions of the same key share a single in-flight
/// computation.
///
/// A cell is inserted before its resolution runs. If that resolution is
/// cancelled and the key is never asked for again, the empty cell stays in
/// the map; it is not counted by `len` and reads as a miss.
#[derive(Default)]
pub struct ResolutionCache {
    slots: Mutex<HashMap<String, Slot>>,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stored outcome, if this key has been written.
    pub fn get(&self, key: &str) -> Option<CacheEntry> {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.get(key)?.get().copied()
    }

    /// Write an outcome. Returns false, leaving the old value, if the key was
    /// already written.
    pub fn set(&self, key: &str, entry: CacheEntry) -> bool {
        self.slot(key).set(entry).is_ok()
    }

    /// Return the stored outcome, or run `resolve` to produce it.
    ///
    /// Only one `resolve` runs per key; other callers wait for its outcome.
    /// If the running caller is cancelled, a waiting caller takes over.
    pub async fn get_or_resolve<F, Fut>(&self, key: &str, resolve: F) -> CacheEntry
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = CacheEntry>,
    {
        let slot = self.slot(key);
        *slot.get_or_init(resolve).await
    }

    /// Number of written entries.
    pub fn len(&self) -> usize {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.values().filter(|slot| slot.initialized()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot(&self, key: &str) -> Slot {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.entry(key.to_string()).or_default().clone()
    }
}
