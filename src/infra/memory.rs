//! In-process recipe store.
//!
//! Holds recipes in insertion order behind an async lock. Used for the
//! `memory` store backend and in tests.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::repos::{RecipesRepo, RepoError};
use crate::domain::recipes::{NewRecipe, Recipe, RecipeFields, RecipeId};

#[derive(Debug, Default)]
pub struct MemoryRecipesRepo {
    recipes: RwLock<Vec<Recipe>>,
}

impl MemoryRecipesRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecipesRepo for MemoryRecipesRepo {
    async fn insert(&self, recipe: NewRecipe) -> Result<Recipe, RepoError> {
        let mut recipes = self.recipes.write().await;
        let mut id = RecipeId::generate();
        while recipes.iter().any(|existing| existing.id == id) {
            id = RecipeId::generate();
        }
        let recipe = recipe.into_recipe(id);
        recipes.push(recipe.clone());
        Ok(recipe)
    }

    async fn find_all(&self) -> Result<Vec<Recipe>, RepoError> {
        Ok(self.recipes.read().await.clone())
    }

    async fn find_by_id(&self, id: RecipeId) -> Result<Option<Recipe>, RepoError> {
        Ok(self
            .recipes
            .read()
            .await
            .iter()
            .find(|recipe| recipe.id == id)
            .cloned())
    }

    async fn update(&self, id: RecipeId, fields: RecipeFields) -> Result<Recipe, RepoError> {
        let mut recipes = self.recipes.write().await;
        let recipe = recipes
            .iter_mut()
            .find(|recipe| recipe.id == id)
            .ok_or(RepoError::NotFound)?;
        recipe.apply(fields);
        Ok(recipe.clone())
    }

    async fn delete(&self, id: RecipeId) -> Result<u64, RepoError> {
        let mut recipes = self.recipes.write().await;
        let before = recipes.len();
        recipes.retain(|recipe| recipe.id != id);
        Ok((before - recipes.len()) as u64)
    }

    async fn find_by_tag(&self, tag: &str) -> Result<Vec<Recipe>, RepoError> {
        Ok(self
            .recipes
            .read()
            .await
            .iter()
            .filter(|recipe| recipe.has_tag(tag))
            .cloned()
            .collect())
    }

    async fn health_check(&self) -> Result<(), RepoError> {
        Ok(())
    }
}
