pub mod error;
pub mod handlers;
pub mod render;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::pipeline::RequestOrchestrator;

pub use error::AppError;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<RequestOrchestrator>,

    /// Match count pre-filled in the empty form
    pub default_limit: u32,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index).post(handlers::submit))
        .route("/comparisons/:id", get(handlers::show_comparison))
        .route("/api/comparisons/:id", get(handlers::comparison_json))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
