//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness
//! GET  /health/ready           - Readiness (store ping)
//!
//! # Pages
//! GET  /                       - Product list
//! GET  /products/{id}          - Product form (`id` may be `new`)
//! POST /products/{id}          - Save or delete (303 to /, 422 re-render)
//!
//! # JSON API
//! GET  /api/products           - Product list
//! GET  /api/products/{id}      - Product form data
//! POST /api/products/{id}      - Save or delete (303 to /, 422 errors)
//! ```

pub mod api;
pub mod health;
pub mod products;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Build the complete application router (without middleware or state).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .merge(products::router())
        .merge(api::router())
}
