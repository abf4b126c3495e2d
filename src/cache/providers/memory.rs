//! In-process cache provider.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::warn;

use crate::cache::errors::CacheResult;
use crate::cache::traits::CacheService;

const SOURCE: &str = "cache::providers::memory";

type Entries = HashMap<String, Entry>;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.is_none_or(|deadline| now < deadline)
    }
}

/// Process-local cache. Entries are lost on restart and are not shared
/// between instances.
#[derive(Debug, Default)]
pub struct MemoryCacheService {
    entries: RwLock<Entries>,
}

impl MemoryCacheService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.read_entries("*", "len")
            .values()
            .filter(|entry| entry.is_live(now))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Every write replaces a whole value, so a poisoned map is still consistent.
    fn read_entries(&self, key: &str, op: &'static str) -> RwLockReadGuard<'_, Entries> {
        self.entries.read().unwrap_or_else(|poisoned| {
            poisoned_recovered(key, op);
            poisoned.into_inner()
        })
    }

    fn write_entries(&self, key: &str, op: &'static str) -> RwLockWriteGuard<'_, Entries> {
        self.entries.write().unwrap_or_else(|poisoned| {
            poisoned_recovered(key, op);
            poisoned.into_inner()
        })
    }
}

fn poisoned_recovered(key: &str, op: &'static str) {
    warn!(
        target: SOURCE,
        key,
        op,
        outcome = "poisoned_recovered",
        "memory cache lock was poisoned; continuing with its contents"
    );
}

#[async_trait]
impl CacheService for MemoryCacheService {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let now = Instant::now();
        {
            let entries = self.read_entries(key, "get");
            match entries.get(key) {
                Some(entry) if entry.is_live(now) => return Ok(Some(entry.value.clone())),
                Some(_) => {}
                None => return Ok(None),
            }
        }

        let mut entries = self.write_entries(key, "expire");
        if entries.get(key).is_some_and(|entry| !entry.is_live(now)) {
            entries.remove(key);
        }
        Ok(None)
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> CacheResult<()> {
        let expires_at = ttl
            .filter(|ttl| !ttl.is_zero())
            .and_then(|ttl| Instant::now().checked_add(ttl));
        self.write_entries(key, "set").insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at,
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> CacheResult<()> {
        self.write_entries(key, "delete").remove(key);
        Ok(())
    }

    async fn health_check(&self) -> CacheResult<bool> {
        Ok(true)
    }

    fn provider_name(&self) -> &'static str {
        "memory"
    }
}
