//! Core types for Stockroom.
//!
//! This module provides type-safe wrappers for the product domain.

pub mod id;
pub mod product;
pub mod target;

pub use id::ProductId;
pub use product::{
    FieldErrors, Product, ProductDraft, ProductPage, ProductSummary, ProductView,
    QUANTITY_NEGATIVE_MESSAGE, TITLE_INVALID_MESSAGE, TITLE_REQUIRED_MESSAGE, parse_quantity,
};
pub use target::{Intent, Mode, Target, TargetError};
