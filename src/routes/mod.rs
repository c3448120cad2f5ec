use axum::{extract::DefaultBodyLimit, routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::AppState;

pub mod pages;
pub mod summary;

pub fn routes(state: Arc<AppState>) -> Router {
    let body_limit = state.config.max_file_size;

    Router::new()
        .route("/health", get(health_check))
        .merge(summary::routes())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
