//! List cache in front of the recipe store.
//!
//! The cache holds derived data only. Backends:
//!
//! - **Redis**: shared between instances, bounded per-command by a timeout
//! - **Memory**: per-process map, for local runs and tests
//! - **NoOp**: always misses; used when disabled or when Redis is down at startup
//!
//! ## Configuration
//!
//! ```toml
//! [cache]
//! backend = "redis"            # redis | memory | none
//! url = "redis://127.0.0.1:6379"
//! list_ttl_seconds = 0         # 0 keeps the entry until invalidated
//! operation_timeout_ms = 250
//! ```

mod config;
mod errors;
mod keys;
mod provider;
mod providers;
mod traits;

pub use self::config::{CacheBackend, CacheConfig};
pub use errors::{CacheError, CacheResult};
pub use keys::{CacheKey, RECIPES_LIST_KEY};
pub use provider::connect;
pub use providers::{MemoryCacheService, NoOpCacheService, RedisCacheService};
pub use traits::CacheService;
