//! No-op cache provider.
//!
//! Used when caching is disabled or when Redis could not be reached at
//! startup.

use std::time::Duration;

use async_trait::async_trait;

use crate::cache::errors::CacheResult;
use crate::cache::traits::CacheService;

/// Cache that never holds anything: reads miss, writes succeed silently.
#[derive(Debug, Clone, Default)]
pub struct NoOpCacheService {
    fallback: bool,
}

impl NoOpCacheService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stand-in for a backend that failed to start; reports itself unhealthy.
    pub fn fallback() -> Self {
        Self { fallback: true }
    }
}

#[async_trait]
impl CacheService for NoOpCacheService {
    async fn get(&self, _key: &str) -> CacheResult<Option<String>> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Option<Duration>) -> CacheResult<()> {
        Ok(())
    }

    async fn delete(&self, _key: &str) -> CacheResult<()> {
        Ok(())
    }

    async fn health_check(&self) -> CacheResult<bool> {
        Ok(!self.fallback)
    }

    fn provider_name(&self) -> &'static str {
        "noop"
    }
}
