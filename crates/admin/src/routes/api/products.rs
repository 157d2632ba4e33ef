//! Product JSON API handlers.

use axum::{
    Form, Json, Router,
    extract::{Path, State},
    response::Redirect,
    routing::get,
};
use serde::Serialize;
use tracing::instrument;

use stockroom_core::{ProductPage, ProductSummary, Target};

use crate::error::Result;
use crate::services::{LIST_PATH, ProductForm};
use crate::state::AppState;

/// Build the product API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/products", get(list))
        .route("/api/products/{id}", get(show).post(submit))
}

/// Response for the product list.
#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub products: Vec<ProductSummary>,
}

/// List products, newest first.
///
/// # Errors
///
/// Returns 500 if the store fails.
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<ProductListResponse>> {
    let products = state.products().list().await?;
    Ok(Json(ProductListResponse { products }))
}

/// Product form data for `new` or an existing id.
///
/// # Errors
///
/// Returns 404 for malformed or unknown ids, 500 if the store fails.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductPage>> {
    let target = Target::parse(&id)?;
    let page = state.products().load(target).await?;
    Ok(Json(page))
}

/// Apply a submitted product form.
///
/// # Errors
///
/// Returns 422 with field errors for an invalid save, 404 for a missing
/// record, 500 if the store fails.
#[instrument(skip(state, form))]
pub async fn submit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<ProductForm>,
) -> Result<Redirect> {
    let target = Target::parse(&id)?;
    state.products().submit(target, &form).await?;
    Ok(Redirect::to(LIST_PATH))
}
