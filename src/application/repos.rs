//! Repository traits describing persistence adapters.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::recipes::{NewRecipe, Recipe, RecipeFields, RecipeId};

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("duplicate record violates unique constraint `{constraint}`")]
    Duplicate { constraint: String },
    #[error("resource not found")]
    NotFound,
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
    #[error("database timeout")]
    Timeout,
}

impl RepoError {
    pub fn from_persistence(err: impl std::fmt::Display) -> Self {
        Self::Persistence(err.to_string())
    }
}

/// Primary store for recipes. Owns canonical state.
#[async_trait]
pub trait RecipesRepo: Send + Sync {
    /// Persist a new recipe and return it with its assigned id.
    async fn insert(&self, recipe: NewRecipe) -> Result<Recipe, RepoError>;

    /// Every stored recipe in insertion order.
    async fn find_all(&self) -> Result<Vec<Recipe>, RepoError>;

    async fn find_by_id(&self, id: RecipeId) -> Result<Option<Recipe>, RepoError>;

    /// Replace the editable fields of one recipe. `RepoError::NotFound` when no
    /// record matched.
    async fn update(&self, id: RecipeId, fields: RecipeFields) -> Result<Recipe, RepoError>;

    /// Remove one recipe, returning the number of records removed.
    async fn delete(&self, id: RecipeId) -> Result<u64, RepoError>;

    /// Recipes carrying `tag` verbatim (exact, case-sensitive).
    async fn find_by_tag(&self, tag: &str) -> Result<Vec<Recipe>, RepoError>;

    async fn health_check(&self) -> Result<(), RepoError>;
}
