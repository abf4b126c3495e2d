//! HTTP surface for the recipe service.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;

use std::sync::Arc;

use axum::{Router, middleware as axum_middleware, routing::get};

use crate::application::recipes::RecipeService;

use self::middleware::{log_responses, set_request_context};

#[derive(Clone)]
pub struct RecipesState {
    pub recipes: Arc<RecipeService>,
}

impl RecipesState {
    pub fn new(recipes: RecipeService) -> Self {
        Self {
            recipes: Arc::new(recipes),
        }
    }
}

pub fn build_router(state: RecipesState) -> Router {
    Router::new()
        .route(
            "/recipes",
            get(handlers::list_recipes).post(handlers::create_recipe),
        )
        .route("/recipes/search", get(handlers::search_recipes))
        .route(
            "/recipes/{id}",
            get(handlers::get_recipe)
                .put(handlers::update_recipe)
                .delete(handlers::delete_recipe),
        )
        .route("/health", get(handlers::health))
        .with_state(state)
        .layer(axum_middleware::from_fn(log_responses))
        .layer(axum_middleware::from_fn(set_request_context))
}
