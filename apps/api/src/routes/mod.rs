pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};

use crate::ingest::handlers as documents;
use crate::matching::handlers as matching;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Document library
        .route(
            "/api/v1/documents",
            post(documents::handle_upload)
                .layer(DefaultBodyLimit::max(upload_limit))
                .get(documents::handle_list_documents)
                .delete(documents::handle_reset),
        )
        .route(
            "/api/v1/documents/:id",
            delete(documents::handle_remove_document),
        )
        // Matching
        .route("/api/v1/analyze", post(matching::handle_analyze))
        .route("/api/v1/results", get(matching::handle_results))
        .route("/api/v1/key-phrases", post(matching::handle_key_phrases))
        .route("/api/v1/score", post(matching::handle_score))
        .with_state(state)
}
