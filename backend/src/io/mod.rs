//! # IO Module
//!
//! REST interface over the availability service.
//!
//! - `GET /api/health`
//! - `GET /api/users/:user_id/products?category=<category>`

pub mod rest;

use axum::{http::Method, routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use rest::AppState;

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/health", get(rest::health))
        .route("/users/:user_id/products", get(rest::products_for_user));

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}
