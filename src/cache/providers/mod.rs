//! Concrete cache backends.

mod memory;
mod noop;
mod redis;

pub use memory::MemoryCacheService;
pub use noop::NoOpCacheService;
pub use self::redis::RedisCacheService;
