use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    routing::get,
};
use tracing::info;

use crate::{
    models::{Log, LogPayload},
    web::{
        AppState,
        responses::{ApiResult, not_found, parse_body, parse_id, storage_error},
    },
};

const RESOURCE: &str = "log";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/logs", get(list_logs).post(create_log))
        .route("/logs/:id", get(get_log).put(update_log).delete(delete_log))
}

async fn create_log(
    State(state): State<AppState>,
    payload: Result<Json<LogPayload>, JsonRejection>,
) -> ApiResult<Log> {
    let payload = parse_body(payload)?;

    let log = Log::insert(state.pool_ref(), &payload)
        .await
        .map_err(|err| storage_error(err, "insert log"))?;

    info!(id = %log.id, recipe_id = %log.recipe_id, "log created");
    Ok(Json(log))
}

async fn get_log(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Log> {
    let id = parse_id(&id, RESOURCE)?;

    Log::find_by_id(state.pool_ref(), id)
        .await
        .map_err(|err| storage_error(err, "load log"))?
        .map(Json)
        .ok_or_else(|| not_found(RESOURCE))
}

async fn list_logs(State(state): State<AppState>) -> ApiResult<Vec<Log>> {
    Log::find_all(state.pool_ref())
        .await
        .map(Json)
        .map_err(|err| storage_error(err, "list logs"))
}

async fn update_log(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<LogPayload>, JsonRejection>,
) -> ApiResult<Log> {
    let id = parse_id(&id, RESOURCE)?;
    let payload = parse_body(payload)?;

    let log = Log::update(state.pool_ref(), id, &payload)
        .await
        .map_err(|err| storage_error(err, "update log"))?
        .ok_or_else(|| not_found(RESOURCE))?;

    info!(%id, "log updated");
    Ok(Json(log))
}

async fn delete_log(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Log> {
    let id = parse_id(&id, RESOURCE)?;

    let log = Log::delete(state.pool_ref(), id)
        .await
        .map_err(|err| storage_error(err, "delete log"))?
        .ok_or_else(|| not_found(RESOURCE))?;

    info!(%id, "log deleted");
    Ok(Json(log))
}
