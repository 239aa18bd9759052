//! Optional freshness cache for the normalized dataset.
//!
//! Owned and injected by the calling layer; the core itself stays pure. The
//! whole snapshot is swapped atomically under the lock, so concurrent
//! readers never observe a half-updated dataset. A stale snapshot only
//! delays visibility of upstream calendar changes, never correctness of a
//! simulation against the snapshot it was given.

use crate::model::Dataset;
use anyhow::{anyhow, Result};
use chrono::{DateTime, Duration, Utc};
use std::sync::{Arc, RwLock};

struct Entry {
    taken_at: DateTime<Utc>,
    data: Arc<Dataset>,
}

pub struct SnapshotCache {
    ttl: Duration,
    slot: RwLock<Option<Entry>>,
}

impl SnapshotCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: RwLock::new(None),
        }
    }

    /// Fresh snapshot if one exists.
    pub fn get(&self, now: DateTime<Utc>) -> Option<Arc<Dataset>> {
        let slot = self.slot.read().ok()?;
        slot.as_ref()
            .filter(|e| now - e.taken_at < self.ttl)
            .map(|e| e.data.clone())
    }

    /// Returns the cached snapshot, or rebuilds and swaps it in. The rebuild
    /// runs under the writer lock, so concurrent callers trigger it once.
    pub fn get_or_refresh<F>(&self, now: DateTime<Utc>, rebuild: F) -> Result<Arc<Dataset>>
    where
        F: FnOnce() -> Result<Dataset>,
    {
        if let Some(data) = self.get(now) {
            return Ok(data);
        }

        let mut slot = self
            .slot
            .write()
            .map_err(|_| anyhow!("snapshot cache lock poisoned"))?;
        // another writer may have refreshed while we waited
        if let Some(e) = slot.as_ref() {
            if now - e.taken_at < self.ttl {
                return Ok(e.data.clone());
            }
        }

        let data = Arc::new(rebuild()?);
        *slot = Some(Entry {
            taken_at: now,
            data: data.clone(),
        });
        Ok(data)
    }

    pub fn invalidate(&self) {
        if let Ok(mut slot) = self.slot.write() {
            *slot = None;
        }
    }
}
