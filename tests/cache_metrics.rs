use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use metrics_util::debugging::DebuggingRecorder;
use recipes_api::application::recipes::RecipeService;
use recipes_api::application::repos::RecipesRepo;
use recipes_api::cache::{CacheError, CacheResult, CacheService, MemoryCacheService};
use recipes_api::domain::recipes::RecipeFields;
use recipes_api::infra::memory::MemoryRecipesRepo;

struct RefusingCache;

#[async_trait]
impl CacheService for RefusingCache {
    async fn get(&self, _key: &str) -> CacheResult<Option<String>> {
        Err(CacheError::Timeout("GET".to_string()))
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Option<Duration>) -> CacheResult<()> {
        Err(CacheError::Timeout("SET".to_string()))
    }

    async fn delete(&self, _key: &str) -> CacheResult<()> {
        Err(CacheError::Timeout("DEL".to_string()))
    }

    async fn health_check(&self) -> CacheResult<bool> {
        Ok(false)
    }

    fn provider_name(&self) -> &'static str {
        "refusing"
    }
}

fn tea() -> RecipeFields {
    RecipeFields {
        name: "Tea".to_string(),
        tags: vec!["drink".to_string()],
        ingredients: vec!["water".to_string()],
        instructions: vec!["boil".to_string()],
    }
}

#[tokio::test]
async fn cache_paths_emit_expected_metric_keys() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();
    recorder
        .install()
        .expect("debug metrics recorder should install in this test process");

    // Miss, store fetch, then hit.
    let store: Arc<dyn RecipesRepo> = Arc::new(MemoryRecipesRepo::new());
    let healthy = RecipeService::new(store.clone(), Arc::new(MemoryCacheService::new()));
    healthy.create_recipe(tea()).await.expect("create");
    assert_eq!(healthy.list_recipes().await.expect("list").len(), 1);
    assert_eq!(healthy.list_recipes().await.expect("list").len(), 1);

    // Degraded reads and a failed invalidation.
    let degraded = RecipeService::new(store, Arc::new(RefusingCache));
    assert_eq!(degraded.list_recipes().await.expect("list").len(), 1);
    degraded.create_recipe(tea()).await.expect("create");

    let snapshot = snapshotter.snapshot().into_vec();
    let names: HashSet<String> = snapshot
        .iter()
        .map(|(composite_key, _, _, _)| composite_key.key().name().to_string())
        .collect();

    let expected = [
        "recipes_cache_hit_total",
        "recipes_cache_miss_total",
        "recipes_cache_degraded_total",
        "recipes_cache_invalidation_failed_total",
        "recipes_store_fetch_ms",
    ];

    for metric in expected {
        assert!(names.contains(metric), "missing metric: {metric}");
    }

    let degraded_ops: HashSet<String> = snapshot
        .iter()
        .filter(|(composite_key, _, _, _)| {
            composite_key.key().name() == "recipes_cache_degraded_total"
        })
        .flat_map(|(composite_key, _, _, _)| {
            composite_key
                .key()
                .labels()
                .filter(|label| label.key() == "op")
                .map(|label| label.value().to_string())
                .collect::<Vec<_>>()
        })
        .collect();
    assert!(degraded_ops.contains("get"), "ops: {degraded_ops:?}");
    assert!(degraded_ops.contains("set"), "ops: {degraded_ops:?}");
}
