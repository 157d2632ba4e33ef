//! Business logic services for the inventory editor.
//!
//! # Services
//!
//! - `products` - Read and write handling for the product list and forms

pub mod products;

pub use products::{LIST_PATH, ProductForm, ProductService, WriteOutcome};
