//! JSON API route handlers.
//!
//! Same read/write semantics as the HTML pages, serialized as JSON.

pub mod products;

use axum::Router;

use crate::state::AppState;

/// Build the complete API router.
pub fn router() -> Router<AppState> {
    Router::new().merge(products::router())
}
