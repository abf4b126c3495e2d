//! Backend selection with graceful degradation.

use std::sync::Arc;

use metrics::counter;
use tracing::{info, warn};

use super::config::{CacheBackend, CacheConfig};
use super::providers::{MemoryCacheService, NoOpCacheService, RedisCacheService};
use super::traits::CacheService;

/// Build the configured cache backend.
///
/// A Redis backend that cannot be reached at startup is replaced by the
/// no-op cache: the process starts and serves every read from the store.
pub async fn connect(config: &CacheConfig) -> Arc<dyn CacheService> {
    if !config.is_enabled() {
        info!(
            target = "recipes::cache",
            "List cache disabled by configuration"
        );
        return Arc::new(NoOpCacheService::new());
    }

    match &config.backend {
        CacheBackend::Redis { url } => {
            match RedisCacheService::connect(url, config.operation_timeout).await {
                Ok(service) => {
                    info!(target = "recipes::cache", provider = "redis", "List cache ready");
                    Arc::new(service)
                }
                Err(err) => {
                    warn!(
                        target = "recipes::cache",
                        error = %err,
                        outcome = "degraded",
                        "Redis unavailable at startup, falling back to NoOp cache"
                    );
                    counter!("recipes_cache_degraded_total", "op" => "connect").increment(1);
                    Arc::new(NoOpCacheService::fallback())
                }
            }
        }
        CacheBackend::Memory => {
            info!(target = "recipes::cache", provider = "memory", "List cache ready");
            Arc::new(MemoryCacheService::new())
        }
        CacheBackend::Disabled => Arc::new(NoOpCacheService::new()),
    }
}
