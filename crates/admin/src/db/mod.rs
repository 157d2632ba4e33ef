//! Persistence gateway for products.
//!
//! # Database: `stockroom`
//!
//! ## Tables
//!
//! - `inventory.product` - Products (title, quantity, timestamps)
//!
//! # Implementations
//!
//! - [`PgProductStore`] - `PostgreSQL`, used by the server and CLI
//! - [`MemoryProductStore`] - process-local, used by tests
//!
//! # Migrations
//!
//! Migrations are stored in `crates/admin/migrations/` and run via:
//! ```bash
//! cargo run -p stockroom-cli -- migrate
//! ```

pub mod memory;
pub mod products;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use stockroom_core::{FieldErrors, Product, ProductDraft, ProductId, ProductSummary, Target};

pub use memory::MemoryProductStore;
pub use products::PgProductStore;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// The product failed validation and was not written.
    #[error("validation failed: {0}")]
    Validation(FieldErrors),
}

/// Storage operations over products.
///
/// Every implementation enforces [`ProductDraft::validate`] on writes; callers
/// may validate earlier for a better UX but cannot bypass this gate.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// All products, newest first.
    ///
    /// Products created in the same instant are ordered by most recent
    /// insertion.
    async fn list_all(&self) -> Result<Vec<ProductSummary>, RepositoryError>;

    /// A single product.
    ///
    /// Returns `RepositoryError::NotFound` if no product has this ID.
    async fn get_by_id(&self, id: ProductId) -> Result<Product, RepositoryError>;

    /// Create (`Target::New`) or overwrite (`Target::Existing`) a product.
    ///
    /// An existing target that no longer matches a row creates a new product
    /// with a freshly assigned ID.
    ///
    /// Returns `RepositoryError::Validation` without touching storage if the
    /// draft is invalid.
    async fn upsert(&self, target: Target, draft: &ProductDraft)
    -> Result<Product, RepositoryError>;

    /// Remove a product.
    ///
    /// Returns `RepositoryError::NotFound` if no product has this ID.
    async fn delete(&self, id: ProductId) -> Result<(), RepositoryError>;

    /// Check that the backing store is reachable.
    async fn ping(&self) -> Result<(), RepositoryError>;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
/// * `max_connections` - Upper bound on pooled connections
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(
    database_url: &secrecy::SecretString,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
