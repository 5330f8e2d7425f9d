use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    routing::get,
};
use tracing::info;

use crate::{
    models::{Recipe, RecipePayload},
    web::{
        AppState,
        responses::{ApiResult, not_found, parse_body, parse_id, storage_error},
    },
};

const RESOURCE: &str = "recipe";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/recipes", get(list_recipes).post(create_recipe))
        .route(
            "/recipes/:id",
            get(get_recipe).put(update_recipe).delete(delete_recipe),
        )
}

async fn create_recipe(
    State(state): State<AppState>,
    payload: Result<Json<RecipePayload>, JsonRejection>,
) -> ApiResult<Recipe> {
    let payload = parse_body(payload)?;

    let recipe = Recipe::insert(state.pool_ref(), &payload)
        .await
        .map_err(|err| storage_error(err, "insert recipe"))?;

    info!(id = %recipe.id, "recipe created");
    Ok(Json(recipe))
}

async fn get_recipe(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Recipe> {
    let id = parse_id(&id, RESOURCE)?;

    Recipe::find_by_id(state.pool_ref(), id)
        .await
        .map_err(|err| storage_error(err, "load recipe"))?
        .map(Json)
        .ok_or_else(|| not_found(RESOURCE))
}

async fn list_recipes(State(state): State<AppState>) -> ApiResult<Vec<Recipe>> {
    Recipe::find_all(state.pool_ref())
        .await
        .map(Json)
        .map_err(|err| storage_error(err, "list recipes"))
}

async fn update_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<RecipePayload>, JsonRejection>,
) -> ApiResult<Recipe> {
    let id = parse_id(&id, RESOURCE)?;
    let payload = parse_body(payload)?;

    let recipe = Recipe::update(state.pool_ref(), id, &payload)
        .await
        .map_err(|err| storage_error(err, "update recipe"))?
        .ok_or_else(|| not_found(RESOURCE))?;

    info!(%id, "recipe updated");
    Ok(Json(recipe))
}

async fn delete_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Recipe> {
    let id = parse_id(&id, RESOURCE)?;

    let recipe = Recipe::delete(state.pool_ref(), id)
        .await
        .map_err(|err| storage_error(err, "delete recipe"))?
        .ok_or_else(|| not_found(RESOURCE))?;

    info!(%id, "recipe deleted");
    Ok(Json(recipe))
}
