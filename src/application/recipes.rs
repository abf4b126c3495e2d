//! Recipe service: cache-aside reads over the primary store.
//!
//! `list_recipes` consults the `recipes-list` cache entry first and rebuilds it
//! from the store on a miss. Every successful mutating write deletes that
//! entry. Point lookups and tag searches always go to the store.
//!
//! Cache failures never reach the caller. They are logged at WARN and counted
//! under `recipes_cache_degraded_total` (reads and repopulation) or
//! `recipes_cache_invalidation_failed_total` (deletes).
//!
//! Writes run on a spawned task that owns both the store mutation and the
//! invalidation. Dropping the caller's future (a client disconnect, a timeout)
//! detaches from that task without stopping it.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use metrics::{counter, histogram};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::application::repos::{RecipesRepo, RepoError};
use crate::cache::{CacheError, CacheKey, CacheService};
use crate::domain::error::DomainError;
use crate::domain::recipes::{
    NewRecipe, Recipe, RecipeFields, RecipeId, decode_import, decode_list, encode_list,
};

const TARGET: &str = "recipes::service";

#[derive(Debug, Error)]
pub enum RecipeError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("recipe not found")]
    NotFound,
    #[error(transparent)]
    Store(#[from] RepoError),
    #[error("write task aborted: {0}")]
    WriteAborted(String),
}

impl From<DomainError> for RecipeError {
    fn from(error: DomainError) -> Self {
        match error {
            // An id that cannot exist matches nothing.
            DomainError::InvalidId { .. } => RecipeError::NotFound,
            DomainError::Validation { message } => RecipeError::Validation(message),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentStatus {
    Ok,
    Degraded,
    Down,
}

/// Reachability of the store and the cache.
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub store: ComponentStatus,
    pub cache: ComponentStatus,
    pub cache_provider: &'static str,
}

impl HealthReport {
    /// The service can answer requests as long as the store is up.
    pub fn is_serving(&self) -> bool {
        self.store == ComponentStatus::Ok
    }
}

#[derive(Clone)]
pub struct RecipeService {
    store: Arc<dyn RecipesRepo>,
    cache: Arc<dyn CacheService>,
    list_ttl: Option<Duration>,
}

impl RecipeService {
    pub fn new(store: Arc<dyn RecipesRepo>, cache: Arc<dyn CacheService>) -> Self {
        Self {
            store,
            cache,
            list_ttl: None,
        }
    }

    /// Expire the cached list after `ttl`. `None` or zero keeps it until the
    /// next invalidating write.
    pub fn with_list_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.list_ttl = ttl.filter(|ttl| !ttl.is_zero());
        self
    }

    /// Every recipe, served from the cache when the list entry is present.
    pub async fn list_recipes(&self) -> Result<Vec<Recipe>, RecipeError> {
        let key = CacheKey::RecipesList;

        match self.cache.get(key.as_str()).await {
            Ok(Some(payload)) => match decode_list(&payload) {
                Ok(recipes) => {
                    counter!("recipes_cache_hit_total").increment(1);
                    debug!(
                        target: TARGET,
                        key = %key,
                        outcome = "hit",
                        count = recipes.len(),
                        "recipe list served from cache"
                    );
                    return Ok(recipes);
                }
                Err(err) => {
                    self.cache_degraded(
                        "decode",
                        key,
                        &CacheError::SerializationError(err.to_string()),
                    );
                }
            },
            Ok(None) => {
                counter!("recipes_cache_miss_total").increment(1);
                debug!(target: TARGET, key = %key, outcome = "miss", "recipe list not cached");
            }
            Err(err) => self.cache_degraded("get", key, &err),
        }

        let started = Instant::now();
        let recipes = self.store.find_all().await?;
        histogram!("recipes_store_fetch_ms").record(started.elapsed().as_secs_f64() * 1000.0);

        // A write that commits after `find_all` read its snapshot can delete the
        // entry before this `set` lands. The list then stays stale until the
        // next invalidating write.
        self.populate(key, &recipes).await;

        Ok(recipes)
    }

    pub async fn get_recipe(&self, id: RecipeId) -> Result<Recipe, RecipeError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(RecipeError::NotFound)
    }

    /// Recipes tagged exactly `tag`. Not cached.
    pub async fn search_by_tag(&self, tag: &str) -> Result<Vec<Recipe>, RecipeError> {
        Ok(self.store.find_by_tag(tag).await?)
    }

    pub async fn create_recipe(&self, fields: RecipeFields) -> Result<Recipe, RecipeError> {
        self.detached(move |service| async move {
            let recipe = service.store.insert(NewRecipe::now(fields)).await?;
            info!(target: TARGET, id = %recipe.id, name = %recipe.name, "recipe created");
            service.invalidate_list("create").await;
            Ok(recipe)
        })
        .await
    }

    pub async fn update_recipe(
        &self,
        id: RecipeId,
        fields: RecipeFields,
    ) -> Result<Recipe, RecipeError> {
        self.detached(move |service| async move {
            let recipe = match service.store.update(id, fields).await {
                Ok(recipe) => recipe,
                Err(RepoError::NotFound) => return Err(RecipeError::NotFound),
                Err(err) => return Err(err.into()),
            };
            info!(target: TARGET, id = %id, "recipe updated");
            service.invalidate_list("update").await;
            Ok(recipe)
        })
        .await
    }

    pub async fn delete_recipe(&self, id: RecipeId) -> Result<(), RecipeError> {
        self.detached(move |service| async move {
            let removed = service.store.delete(id).await?;
            if removed == 0 {
                return Err(RecipeError::NotFound);
            }
            info!(target: TARGET, id = %id, "recipe deleted");
            service.invalidate_list("delete").await;
            Ok(())
        })
        .await
    }

    /// Insert every recipe of an import file (a JSON array in wire layout)
    /// and return how many were stored. Incoming ids are discarded.
    ///
    /// The list entry is invalidated once, after the last insert, or as soon
    /// as an insert fails if earlier ones already landed.
    pub async fn import_recipes(&self, payload: &str) -> Result<usize, RecipeError> {
        let batch = decode_import(payload)?;

        self.detached(move |service| async move {
            let total = batch.len();
            let mut imported = 0usize;

            for entry in batch {
                if let Err(err) = service.store.insert(entry.into_new_recipe()).await {
                    warn!(target: TARGET, imported, total, error = %err, "recipe import aborted");
                    if imported > 0 {
                        service.invalidate_list("import").await;
                    }
                    return Err(err.into());
                }
                imported += 1;
            }

            if imported > 0 {
                service.invalidate_list("import").await;
            }
            info!(target: TARGET, imported, "recipes imported");
            Ok(imported)
        })
        .await
    }

    pub async fn health(&self) -> HealthReport {
        let store = match self.store.health_check().await {
            Ok(()) => ComponentStatus::Ok,
            Err(err) => {
                warn!(target: TARGET, error = %err, "store health check failed");
                ComponentStatus::Down
            }
        };

        let cache = match self.cache.health_check().await {
            Ok(true) => ComponentStatus::Ok,
            Ok(false) => ComponentStatus::Degraded,
            Err(err) => {
                warn!(target: TARGET, error = %err, "cache health check failed");
                ComponentStatus::Degraded
            }
        };

        HealthReport {
            store,
            cache,
            cache_provider: self.cache.provider_name(),
        }
    }

    /// Spawn `write` with its own handle on the service and wait for it.
    /// The task keeps running if the returned future is dropped.
    async fn detached<T, F, Fut>(&self, write: F) -> Result<T, RecipeError>
    where
        F: FnOnce(RecipeService) -> Fut,
        Fut: Future<Output = Result<T, RecipeError>> + Send + 'static,
        T: Send + 'static,
    {
        tokio::spawn(write(self.clone()))
            .await
            .map_err(|err| {
                warn!(target: TARGET, error = %err, "recipe write task aborted");
                RecipeError::WriteAborted(err.to_string())
            })?
    }

    async fn populate(&self, key: CacheKey, recipes: &[Recipe]) {
        let payload = match encode_list(recipes) {
            Ok(payload) => payload,
            Err(err) => {
                let err = CacheError::SerializationError(err.to_string());
                self.cache_degraded("encode", key, &err);
                return;
            }
        };

        match self.cache.set(key.as_str(), &payload, self.list_ttl).await {
            Ok(()) => {
                debug!(
                    target: TARGET,
                    key = %key,
                    outcome = "populated",
                    count = recipes.len(),
                    "recipe list cached"
                );
            }
            Err(err) => self.cache_degraded("set", key, &err),
        }
    }

    async fn invalidate_list(&self, reason: &'static str) {
        let key = CacheKey::RecipesList;
        match self.cache.delete(key.as_str()).await {
            Ok(()) => {
                debug!(
                    target: TARGET,
                    key = %key,
                    reason,
                    outcome = "invalidated",
                    "recipe list invalidated"
                );
            }
            Err(err) => {
                counter!("recipes_cache_invalidation_failed_total").increment(1);
                warn!(
                    target: TARGET,
                    key = %key,
                    reason,
                    outcome = "invalidation_failed",
                    provider = self.cache.provider_name(),
                    error = %err,
                    "failed to invalidate recipe list; cached entry may be stale"
                );
            }
        }
    }

    fn cache_degraded(&self, op: &'static str, key: CacheKey, err: &CacheError) {
        counter!("recipes_cache_degraded_total", "op" => op).increment(1);
        warn!(
            target: TARGET,
            key = %key,
            op,
            outcome = "degraded",
            provider = self.cache.provider_name(),
            error = %err,
            "cache unavailable, serving from store"
        );
    }
}
