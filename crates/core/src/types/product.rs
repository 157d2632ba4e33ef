//! Product records, drafts and the shared validation gate.

use core::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::target::{Mode, Target};

/// Message shown when the title is empty or whitespace.
pub const TITLE_REQUIRED_MESSAGE: &str = "Title is required";

/// Message shown when the quantity is below zero.
pub const QUANTITY_NEGATIVE_MESSAGE: &str = "Quantity cannot be negative";

/// Title message when the text cannot be stored (`PostgreSQL` rejects NUL).
pub const TITLE_INVALID_MESSAGE: &str = "Title cannot contain NUL characters";

/// A stored product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product ID, assigned on creation.
    pub id: ProductId,
    /// Display title, never empty.
    pub title: String,
    /// Units on hand, never negative.
    pub quantity: i32,
    /// When the product was created (list ordering key).
    pub created_at: DateTime<Utc>,
    /// When the product was last written.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// The summary fields shown in the product list.
    #[must_use]
    pub fn summary(&self) -> ProductSummary {
        ProductSummary {
            id: self.id,
            title: self.title.clone(),
            quantity: self.quantity,
        }
    }
}

/// List-view projection of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub id: ProductId,
    pub title: String,
    pub quantity: i32,
}

/// Product shape handed to a form page.
///
/// The `id` is empty for a product that has not been saved yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductView {
    pub id: String,
    pub title: String,
    pub quantity: i32,
}

impl ProductView {
    /// The synthetic record shown on the new-product form.
    #[must_use]
    pub const fn blank() -> Self {
        Self {
            id: String::new(),
            title: String::new(),
            quantity: 0,
        }
    }
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            title: product.title.clone(),
            quantity: product.quantity,
        }
    }
}

/// Everything a product form page is seeded from.
///
/// Serializes as `{"product": {...}, "mode": "new" | "edit"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductPage {
    #[serde(skip)]
    target: Target,
    product: ProductView,
    mode: Mode,
}

impl ProductPage {
    /// Page for the new-product form. Never backed by a stored record.
    #[must_use]
    pub const fn new_product() -> Self {
        Self {
            target: Target::New,
            product: ProductView::blank(),
            mode: Mode::New,
        }
    }

    /// Page for editing a stored product.
    #[must_use]
    pub fn existing(product: &Product) -> Self {
        Self {
            target: Target::Existing(product.id),
            product: ProductView::from(product),
            mode: Mode::Edit,
        }
    }

    #[must_use]
    pub const fn target(&self) -> Target {
        self.target
    }

    #[must_use]
    pub const fn product(&self) -> &ProductView {
        &self.product
    }

    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }
}

/// Field-level validation messages for a product form.
///
/// An empty value (both fields `None`) means the draft is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrors {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
}

impl FieldErrors {
    /// Run the product validation rules.
    ///
    /// This is the single source of truth for what a storable product is.
    #[must_use]
    pub fn check(title: &str, quantity: i32) -> Self {
        Self {
            title: if title.trim().is_empty() {
                Some(TITLE_REQUIRED_MESSAGE.to_owned())
            } else if title.contains('\0') {
                Some(TITLE_INVALID_MESSAGE.to_owned())
            } else {
                None
            },
            quantity: (quantity < 0).then(|| QUANTITY_NEGATIVE_MESSAGE.to_owned()),
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.quantity.is_none()
    }

    /// Title message, or `""` when the title is fine.
    #[must_use]
    pub fn title_message(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    /// Quantity message, or `""` when the quantity is fine.
    #[must_use]
    pub fn quantity_message(&self) -> &str {
        self.quantity.as_deref().unwrap_or_default()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = [self.title.as_deref(), self.quantity.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        f.write_str(&messages.join("; "))
    }
}

impl std::error::Error for FieldErrors {}

/// Title and quantity as submitted, before they are accepted for storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub title: String,
    pub quantity: i32,
}

impl ProductDraft {
    #[must_use]
    pub fn new(title: impl Into<String>, quantity: i32) -> Self {
        Self {
            title: title.into(),
            quantity,
        }
    }

    /// Build a draft from raw form fields.
    ///
    /// A missing title is empty; a missing or unparsable quantity is 0.
    #[must_use]
    pub fn from_form(title: Option<String>, quantity: Option<&str>) -> Self {
        Self {
            title: title.unwrap_or_default(),
            quantity: quantity.map_or(0, parse_quantity),
        }
    }

    /// Check the draft against the product invariants.
    ///
    /// # Errors
    ///
    /// Returns the field messages if the title is blank or the quantity is
    /// negative.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let errors = FieldErrors::check(&self.title, self.quantity);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Parse a quantity field leniently.
///
/// Surrounding whitespace is ignored and anything that is not a base-10
/// 32-bit integer becomes 0. This is never an error: the form and the server
/// must agree on what a given input means.
#[must_use]
pub fn parse_quantity(raw: &str) -> i32 {
    raw.trim().parse().unwrap_or(0)
}
