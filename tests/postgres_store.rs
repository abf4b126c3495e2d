//! Postgres store behaviour.
//!
//! - Needs `DATABASE_URL` pointing at a server where sqlx may create test databases.
//! - Marked `#[ignore]`; run with `cargo test -- --ignored`.

use std::sync::Arc;

use recipes_api::application::recipes::{RecipeError, RecipeService};
use recipes_api::application::repos::{RecipesRepo, RepoError};
use recipes_api::cache::{CacheService, MemoryCacheService, RECIPES_LIST_KEY};
use recipes_api::domain::recipes::{NewRecipe, RecipeFields, RecipeId};
use recipes_api::infra::db::PostgresRepositories;
use sqlx::PgPool;

fn fields(name: &str, tags: &[&str]) -> RecipeFields {
    RecipeFields {
        name: name.to_string(),
        tags: tags.iter().map(|tag| tag.to_string()).collect(),
        ingredients: vec!["water".to_string()],
        instructions: vec!["boil".to_string()],
    }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn crud_round_trip_keeps_insertion_order(pool: PgPool) {
    let repo = PostgresRepositories::new(pool);

    let tea = repo
        .insert(NewRecipe::now(fields("Tea", &["drink"])))
        .await
        .expect("insert tea");
    let cake = repo
        .insert(NewRecipe::now(fields("Cake", &["dessert"])))
        .await
        .expect("insert cake");

    let all = repo.find_all().await.expect("find_all");
    assert_eq!(all, vec![tea.clone(), cake.clone()]);

    assert_eq!(repo.find_by_tag("drink").await.expect("tag"), vec![tea.clone()]);
    assert!(repo.find_by_tag("Drink").await.expect("tag").is_empty());

    let updated = repo
        .update(tea.id, fields("Chai", &["drink", "spiced"]))
        .await
        .expect("update");
    assert_eq!(updated.id, tea.id);
    assert_eq!(updated.published_at, tea.published_at);
    assert_eq!(updated.name, "Chai");

    let missing = repo
        .update(RecipeId::generate(), fields("Ghost", &[]))
        .await;
    assert!(matches!(missing, Err(RepoError::NotFound)));

    assert_eq!(repo.delete(cake.id).await.expect("delete"), 1);
    assert_eq!(repo.delete(cake.id).await.expect("delete again"), 0);
    assert_eq!(repo.find_by_id(cake.id).await.expect("find"), None);

    repo.health_check().await.expect("health");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn service_invalidates_list_over_postgres(pool: PgPool) {
    let store = Arc::new(PostgresRepositories::new(pool));
    let cache = Arc::new(MemoryCacheService::new());
    let service = RecipeService::new(store, cache.clone());

    assert!(service.list_recipes().await.expect("list").is_empty());
    assert!(cache.get(RECIPES_LIST_KEY).await.expect("get").is_some());

    let tea = service
        .create_recipe(fields("Tea", &["drink"]))
        .await
        .expect("create");
    assert!(cache.get(RECIPES_LIST_KEY).await.expect("get").is_none());
    assert_eq!(service.list_recipes().await.expect("list"), vec![tea.clone()]);

    service.delete_recipe(tea.id).await.expect("delete");
    assert!(matches!(
        service.delete_recipe(tea.id).await,
        Err(RecipeError::NotFound)
    ));
    assert!(service.list_recipes().await.expect("list").is_empty());
}
