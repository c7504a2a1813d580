//! HTTP surface for Inkwell.
//!
//! Builds the axum router for listing, viewing, creating, editing, deleting
//! and searching posts. Pages are server-rendered HTML; post bodies are
//! stored as markdown and rendered on every read.

pub mod error;
pub mod forms;
pub mod handlers;
pub mod markdown;
pub mod notice;
pub mod pages;

pub use error::WebError;
pub use handlers::AppState;

use axum::Router;
use axum::routing::{get, post};
use inkwell_store::PostStore;
use std::sync::Arc;

/// Build the post router over `store`.
///
/// Layers (tracing, body limits) are added by the caller.
pub fn router(store: Arc<dyn PostStore>) -> Router {
    let state = Arc::new(AppState { store });

    Router::new()
        .route("/health", get(handlers::health_check))
        // Listing
        .route("/", get(handlers::list_posts))
        // Create
        .route("/new", get(handlers::new_post_form))
        .route("/new", post(handlers::create_post))
        // Search (?q=)
        .route("/search", get(handlers::search_posts))
        // Edit
        .route("/edit/{title}", get(handlers::edit_post_form))
        .route("/edit/{title}", post(handlers::update_post))
        // Delete (confirmation page, then POST)
        .route("/delete/{title}", get(handlers::delete_post_form))
        .route("/delete/{title}", post(handlers::delete_post))
        // View: catch-all single segment, registered after every fixed route
        .route("/{title}", get(handlers::view_post))
        .fallback(handlers::not_found)
        .with_state(state)
}
