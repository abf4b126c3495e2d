//! Cache service trait definition.

use std::time::Duration;

use async_trait::async_trait;

use super::errors::CacheResult;

/// Key-value operations against a volatile side-store.
///
/// Implementations never own canonical state and may lose any entry at any
/// time. Shared as `Arc<dyn CacheService>`.
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Returns `Ok(Some(value))` on a hit and `Ok(None)` on a miss.
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Store `value` under `key`. A `ttl` of `None` or zero keeps the entry
    /// until it is deleted or evicted.
    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> CacheResult<()>;

    /// Remove `key`. Deleting an absent key succeeds.
    async fn delete(&self, key: &str) -> CacheResult<()>;

    /// Check whether the backend is reachable.
    async fn health_check(&self) -> CacheResult<bool>;

    /// Short backend name for logs and health output.
    fn provider_name(&self) -> &'static str;
}
