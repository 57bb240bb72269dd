pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::matching::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let json_limit = state.config.max_json_bytes;
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/vocabulary", get(handlers::handle_get_vocabulary))
        .route(
            "/api/v1/extract",
            post(handlers::handle_extract).layer(DefaultBodyLimit::max(json_limit)),
        )
        .route(
            "/api/v1/match",
            post(handlers::handle_match).layer(DefaultBodyLimit::max(json_limit)),
        )
        .route(
            "/api/v1/match/upload",
            post(handlers::handle_match_upload).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .with_state(state)
}
