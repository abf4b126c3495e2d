use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    application::repos::{RecipesRepo, RepoError},
    domain::recipes::{NewRecipe, Recipe, RecipeFields, RecipeId},
};

use super::{PostgresRepositories, map_sqlx_error};

const RECIPE_COLUMNS: &str = "id, name, tags, ingredients, instruction, published_at";

#[derive(sqlx::FromRow)]
struct RecipeRow {
    id: Uuid,
    name: String,
    tags: Vec<String>,
    ingredients: Vec<String>,
    instruction: Vec<String>,
    published_at: OffsetDateTime,
}

impl From<RecipeRow> for Recipe {
    fn from(row: RecipeRow) -> Self {
        Self {
            id: RecipeId::from_uuid(row.id),
            name: row.name,
            tags: row.tags,
            ingredients: row.ingredients,
            instructions: row.instruction,
            published_at: row.published_at,
        }
    }
}

#[async_trait]
impl RecipesRepo for PostgresRepositories {
    async fn insert(&self, recipe: NewRecipe) -> Result<Recipe, RepoError> {
        let NewRecipe {
            fields,
            published_at,
        } = recipe;
        let sql = format!(
            "INSERT INTO recipes (id, name, tags, ingredients, instruction, published_at) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {RECIPE_COLUMNS}"
        );

        let row = sqlx::query_as::<_, RecipeRow>(&sql)
            .bind(RecipeId::generate().as_uuid())
            .bind(fields.name)
            .bind(fields.tags)
            .bind(fields.ingredients)
            .bind(fields.instructions)
            .bind(published_at)
            .fetch_one(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn find_all(&self) -> Result<Vec<Recipe>, RepoError> {
        let sql = format!("SELECT {RECIPE_COLUMNS} FROM recipes ORDER BY position");
        let rows = sqlx::query_as::<_, RecipeRow>(&sql)
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(Recipe::from).collect())
    }

    async fn find_by_id(&self, id: RecipeId) -> Result<Option<Recipe>, RepoError> {
        let sql = format!("SELECT {RECIPE_COLUMNS} FROM recipes WHERE id = $1");
        let row = sqlx::query_as::<_, RecipeRow>(&sql)
            .bind(id.as_uuid())
            .fetch_optional(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(Recipe::from))
    }

    async fn update(&self, id: RecipeId, fields: RecipeFields) -> Result<Recipe, RepoError> {
        let RecipeFields {
            name,
            tags,
            ingredients,
            instructions,
        } = fields;
        let sql = format!(
            "UPDATE recipes \
             SET name = $2, tags = $3, ingredients = $4, instruction = $5 \
             WHERE id = $1 \
             RETURNING {RECIPE_COLUMNS}"
        );

        let row = sqlx::query_as::<_, RecipeRow>(&sql)
            .bind(id.as_uuid())
            .bind(name)
            .bind(tags)
            .bind(ingredients)
            .bind(instructions)
            .fetch_optional(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        row.map(Recipe::from).ok_or(RepoError::NotFound)
    }

    async fn delete(&self, id: RecipeId) -> Result<u64, RepoError> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(id.as_uuid())
            .execute(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected())
    }

    async fn find_by_tag(&self, tag: &str) -> Result<Vec<Recipe>, RepoError> {
        let sql = format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes WHERE $1 = ANY(tags) ORDER BY position"
        );
        let rows = sqlx::query_as::<_, RecipeRow>(&sql)
            .bind(tag)
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(Recipe::from).collect())
    }

    async fn health_check(&self) -> Result<(), RepoError> {
        self.ping().await.map_err(map_sqlx_error)
    }
}
