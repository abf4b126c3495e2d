//! Recipe handlers.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::recipes::RecipeError;
use crate::domain::recipes::{RecipeFields, RecipeId};

use super::RecipesState;
use super::error::ApiError;
use super::models::{HealthResponse, MessageResponse, SearchQuery};

fn parse_id(raw: &str) -> Result<RecipeId, ApiError> {
    raw.parse::<RecipeId>()
        .map_err(|err| ApiError::from(RecipeError::from(err)))
}

fn recipe_body(
    payload: Result<Json<RecipeFields>, JsonRejection>,
) -> Result<RecipeFields, ApiError> {
    payload
        .map(|Json(fields)| fields)
        .map_err(|rejection| {
            ApiError::bad_request("Invalid recipe payload", Some(rejection.body_text()))
        })
}

pub async fn create_recipe(
    State(state): State<RecipesState>,
    payload: Result<Json<RecipeFields>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let fields = recipe_body(payload)?;
    let recipe = state.recipes.create_recipe(fields).await?;
    Ok(Json(recipe))
}

pub async fn list_recipes(
    State(state): State<RecipesState>,
) -> Result<impl IntoResponse, ApiError> {
    let recipes = state.recipes.list_recipes().await?;
    Ok(Json(recipes))
}

pub async fn get_recipe(
    State(state): State<RecipesState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    let recipe = state.recipes.get_recipe(id).await?;
    Ok(Json(recipe))
}

pub async fn update_recipe(
    State(state): State<RecipesState>,
    Path(id): Path<String>,
    payload: Result<Json<RecipeFields>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let fields = recipe_body(payload)?;
    let id = parse_id(&id)?;
    state.recipes.update_recipe(id, fields).await?;
    Ok(Json(MessageResponse::UPDATED))
}

pub async fn delete_recipe(
    State(state): State<RecipesState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    state.recipes.delete_recipe(id).await?;
    Ok(Json(MessageResponse::DELETED))
}

pub async fn search_recipes(
    State(state): State<RecipesState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(query) = query
        .map_err(|rejection| ApiError::bad_request("Invalid query", Some(rejection.body_text())))?;
    let recipes = state.recipes.search_by_tag(&query.tags).await?;
    Ok(Json(recipes))
}

pub async fn health(State(state): State<RecipesState>) -> impl IntoResponse {
    let response = HealthResponse::from(state.recipes.health().await);
    let status = if response.report.is_serving() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(response))
}
