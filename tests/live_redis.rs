//! Redis provider against a running server.
//!
//! - Reads `REDIS_URL`, defaulting to `redis://127.0.0.1:6379`.
//! - Marked `#[ignore]` so it only runs when a server is available.

use std::time::Duration;

use recipes_api::cache::{CacheService, RedisCacheService};

fn redis_url() -> String {
    std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string())
}

#[tokio::test]
#[ignore]
async fn live_redis_set_get_delete() {
    let cache = RedisCacheService::connect(&redis_url(), Duration::from_secs(1))
        .await
        .expect("redis should be reachable");
    let key = format!("recipes-live-test-{}", uuid::Uuid::new_v4());

    assert!(cache.health_check().await.expect("ping"));
    assert_eq!(cache.get(&key).await.expect("get"), None);

    cache.set(&key, "[]", None).await.expect("set");
    assert_eq!(cache.get(&key).await.expect("get"), Some("[]".to_string()));

    cache.delete(&key).await.expect("delete");
    assert_eq!(cache.get(&key).await.expect("get"), None);
    cache.delete(&key).await.expect("deleting an absent key succeeds");
}

#[tokio::test]
#[ignore]
async fn live_redis_honours_ttl() {
    let cache = RedisCacheService::connect(&redis_url(), Duration::from_secs(1))
        .await
        .expect("redis should be reachable");
    let key = format!("recipes-live-ttl-{}", uuid::Uuid::new_v4());

    cache
        .set(&key, "[]", Some(Duration::from_secs(1)))
        .await
        .expect("set");
    assert!(cache.get(&key).await.expect("get").is_some());

    tokio::time::sleep(Duration::from_millis(2100)).await;
    assert_eq!(cache.get(&key).await.expect("get"), None);
}
