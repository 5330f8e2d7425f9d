use axum::{Router, http::StatusCode, response::IntoResponse, routing::get};

use crate::web::{AppState, logs, recipes};

pub const API_PREFIX: &str = "/api/v1";

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .merge(recipes::router())
        .merge(logs::router());

    Router::new()
        .route("/healthz", get(healthz))
        .nest(API_PREFIX, api)
        .with_state(state)
}

async fn healthz() -> impl IntoResponse {
    StatusCode::OK
}
