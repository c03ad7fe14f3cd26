//! # Routes
//!
//! Router assembly. Handlers live in one module per resource; each handler
//! validates input, calls the matching repository operation, and maps
//! failures onto [`crate::error::ApiError`].

pub mod auth;
pub mod ping;
pub mod products;
pub mod transactions;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Builds the full application router.
///
/// CORS is wide open: the static frontend pages are served from anywhere
/// (including `file://` during development) and the API is the only origin
/// that matters.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/ping", get(ping::ping))
        .route("/products", get(products::list).post(products::create))
        .route(
            "/products/{id}",
            get(products::get).put(products::update).delete(products::remove),
        )
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route(
            "/transactions",
            get(transactions::list).post(transactions::create),
        )
        .route("/transactions/{phone}", get(transactions::by_phone));

    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// =============================================================================
// Test Helpers
// =============================================================================
