//! PocketPost entry service: one redb-backed table of heterogeneous records
//! behind a four-verb HTTP surface on `/entries`.
//!
//! The router is a library function so integration tests can drive the full
//! HTTP surface against a temporary database.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod storage;

use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::storage::Storage;

pub type AppState = Arc<Storage>;

pub fn router(storage: AppState) -> Router {
    // The browser client is served from a different origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(api::health))
        .route(
            "/entries",
            get(api::entries::list_entries)
                .post(api::entries::create_entry)
                .put(api::entries::update_entry)
                .delete(api::entries::delete_entry),
        )
        .layer(cors)
        .with_state(storage)
}
