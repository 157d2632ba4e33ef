//! Server-rendered product pages.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use tracing::instrument;

use stockroom_core::{DELETE_CONFIRMATION, EditSession, ProductSummary, Target};

use crate::db::RepositoryError;
use crate::error::Result;
use crate::services::{LIST_PATH, ProductForm};
use crate::state::AppState;

/// Build the HTML product router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/products/{id}", get(show).post(submit))
}

/// Product list page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductIndexTemplate {
    pub products: Vec<ProductSummary>,
    pub new_path: String,
}

/// Product form page template.
///
/// Error fields are empty strings when the field is valid.
#[derive(Template, WebTemplate)]
#[template(path = "products/form.html")]
pub struct ProductFormTemplate {
    pub action: String,
    pub heading: String,
    pub is_new: bool,
    pub title: String,
    pub quantity: i32,
    /// Values from the last load; the browser's reset restores these.
    pub loaded_title: String,
    pub loaded_quantity: i32,
    pub title_editing: bool,
    pub title_error: String,
    pub quantity_error: String,
    pub confirm_message: &'static str,
}

impl From<&EditSession> for ProductFormTemplate {
    fn from(session: &EditSession) -> Self {
        let is_new = session.mode().is_new();
        let heading = if is_new {
            "New product".to_string()
        } else {
            session.loaded().product().title.clone()
        };
        Self {
            action: session.target().form_path(),
            heading,
            is_new,
            title: session.title().to_string(),
            quantity: session.quantity(),
            loaded_title: session.loaded().product().title.clone(),
            loaded_quantity: session.loaded().product().quantity,
            title_editing: session.is_title_editing(),
            title_error: session.errors().title_message().to_string(),
            quantity_error: session.errors().quantity_message().to_string(),
            confirm_message: DELETE_CONFIRMATION,
        }
    }
}

/// 404 page template.
#[derive(Template, WebTemplate)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub list_path: &'static str,
}

fn not_found_page() -> Response {
    (
        StatusCode::NOT_FOUND,
        NotFoundTemplate {
            list_path: LIST_PATH,
        },
    )
        .into_response()
}

/// Product list, newest first.
///
/// # Errors
///
/// Returns 500 if the store fails.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<ProductIndexTemplate> {
    let products = state.products().list().await?;
    Ok(ProductIndexTemplate {
        products,
        new_path: Target::New.form_path(),
    })
}

/// Product form for `new` or an existing id.
///
/// # Errors
///
/// Returns 500 if the store fails. Unknown ids render the 404 page.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Response> {
    let Ok(target) = Target::parse(&id) else {
        return Ok(not_found_page());
    };

    match state.products().load(target).await {
        Ok(page) => {
            let session = EditSession::new(page);
            Ok(ProductFormTemplate::from(&session).into_response())
        }
        Err(RepositoryError::NotFound) => Ok(not_found_page()),
        Err(e) => Err(e.into()),
    }
}

/// Apply a submitted product form, then redirect to the list.
///
/// A rejected save re-renders the form with the submitted values and
/// inline messages.
///
/// # Errors
///
/// Returns 500 if the store fails.
#[instrument(skip(state, form))]
pub async fn submit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<ProductForm>,
) -> Result<Response> {
    let Ok(target) = Target::parse(&id) else {
        return Ok(not_found_page());
    };

    let products = state.products();
    match products.submit(target, &form).await {
        Ok(_) => Ok(Redirect::to(LIST_PATH).into_response()),
        Err(RepositoryError::NotFound) => Ok(not_found_page()),
        Err(RepositoryError::Validation(errors)) => {
            tracing::debug!(%errors, "product form rejected");
            let session = products.rejected_session(target, &form).await?;
            Ok((
                StatusCode::UNPROCESSABLE_ENTITY,
                ProductFormTemplate::from(&session),
            )
                .into_response())
        }
        Err(e) => Err(e.into()),
    }
}
