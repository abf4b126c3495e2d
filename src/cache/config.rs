//! Cache configuration.
//!
//! Resolved from the `[cache]` section of the deployment settings.

use std::time::Duration;

use crate::config::{CacheBackendKind, CacheSettings};

const DEFAULT_OPERATION_TIMEOUT_MS: u64 = 250;

/// Which backend holds cached entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheBackend {
    /// Shared Redis instance reached through a connection manager.
    Redis { url: String },
    /// Per-process map; entries vanish on restart.
    Memory,
    /// Every read misses and every write is dropped.
    Disabled,
}

#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub backend: CacheBackend,
    /// Expiry applied to the recipe list entry. `None` keeps it until invalidated.
    pub list_ttl: Option<Duration>,
    /// Upper bound on a single backend round trip.
    pub operation_timeout: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::Memory,
            list_ttl: None,
            operation_timeout: Duration::from_millis(DEFAULT_OPERATION_TIMEOUT_MS),
        }
    }
}

impl From<&CacheSettings> for CacheConfig {
    fn from(settings: &CacheSettings) -> Self {
        let backend = match settings.backend {
            CacheBackendKind::Redis => CacheBackend::Redis {
                url: settings.url.clone(),
            },
            CacheBackendKind::Memory => CacheBackend::Memory,
            CacheBackendKind::None => CacheBackend::Disabled,
        };

        Self {
            backend,
            list_ttl: settings.list_ttl,
            operation_timeout: settings.operation_timeout,
        }
    }
}

impl CacheConfig {
    pub fn is_enabled(&self) -> bool {
        !matches!(self.backend, CacheBackend::Disabled)
    }
}
