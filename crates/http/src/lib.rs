//! HTTP API server for equiptrack.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(unreachable_pub, reason = "pub items are re-exported")]
#![allow(clippy::absolute_paths, reason = "Explicit paths for clarity")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::missing_docs_in_private_items, reason = "Internal crate")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::min_ident_chars, reason = "Short closure params are idiomatic")]
#![allow(clippy::exhaustive_structs, reason = "HTTP types are stable")]
#![allow(clippy::single_call_fn, reason = "Helper functions improve readability")]

pub mod api_error;
mod handlers;
pub mod identity;

use axum::{
    extract::DefaultBodyLimit,
    http::Method,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use equiptrack_service::DatasetService;

pub use api_error::ApiError;
pub use identity::{HeaderIdentity, IdentityProvider};

/// Shared application state for all HTTP handlers.
///
/// Wrapped in `Arc` for thread-safe sharing across handlers.
pub struct AppState {
    /// Dataset ingestion, listing and aggregation
    pub service: Arc<DatasetService>,
    /// Resolves the calling owner from request headers
    pub identity: Arc<dyn IdentityProvider>,
    /// Largest accepted request body, in bytes
    pub max_upload_bytes: usize,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/api/version", get(version))
        .route("/api/upload", post(handlers::datasets::upload))
        .route("/api/datasets", get(handlers::datasets::list_datasets))
        .route(
            "/api/datasets/{id}",
            get(handlers::datasets::get_dataset).delete(handlers::datasets::delete_dataset),
        )
        .route("/api/datasets/{id}/report", get(handlers::datasets::download_report))
        .route("/api/summary", get(handlers::datasets::summary))
        .layer(DefaultBodyLimit::max(state.max_upload_bytes))
        .layer(cors)
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn version() -> Json<Value> {
    Json(json!({ "version": env!("CARGO_PKG_VERSION") }))
}
