use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::state::AppState;

pub fn create_routes() -> Router<AppState> {
    Router::new()
        // Page
        .route("/", get(handlers::index))
        .route("/translate", post(handlers::submit_form))

        // JSON API
        .route("/api/translate", post(handlers::translate_api))
        .route("/api/health", get(handlers::health_check))
}
