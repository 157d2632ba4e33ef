//! `PostgreSQL` product repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use stockroom_core::{
    FieldErrors, Product, ProductDraft, ProductId, ProductSummary, QUANTITY_NEGATIVE_MESSAGE,
    TITLE_REQUIRED_MESSAGE, Target,
};

use super::{ProductStore, RepositoryError};

/// Check constraint guarding `quantity >= 0`.
const QUANTITY_CONSTRAINT: &str = "product_quantity_non_negative";
/// Check constraint guarding a non-blank title.
const TITLE_CONSTRAINT: &str = "product_title_not_blank";

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for product queries.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: ProductId,
    title: String,
    quantity: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            quantity: row.quantity,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Internal row type for the list projection.
#[derive(Debug, sqlx::FromRow)]
struct ProductSummaryRow {
    id: ProductId,
    title: String,
    quantity: i32,
}

impl From<ProductSummaryRow> for ProductSummary {
    fn from(row: ProductSummaryRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            quantity: row.quantity,
        }
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Product store backed by the `inventory.product` table.
#[derive(Debug, Clone)]
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    /// Create a store over an open connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying connection pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Close every pooled connection. Call once at shutdown.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    async fn insert(&self, draft: &ProductDraft) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r"
            INSERT INTO inventory.product (title, quantity)
            VALUES ($1, $2)
            RETURNING id, title, quantity, created_at, updated_at
            ",
        )
        .bind(&draft.title)
        .bind(draft.quantity)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(row.into())
    }

    async fn update(
        &self,
        id: ProductId,
        draft: &ProductDraft,
    ) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r"
            UPDATE inventory.product
            SET title = $2, quantity = $3, updated_at = now()
            WHERE id = $1
            RETURNING id, title, quantity, created_at, updated_at
            ",
        )
        .bind(id)
        .bind(&draft.title)
        .bind(draft.quantity)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(row.map(Into::into))
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    #[instrument(skip(self))]
    async fn list_all(&self) -> Result<Vec<ProductSummary>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductSummaryRow>(
            r"
            SELECT id, title, quantity
            FROM inventory.product
            ORDER BY created_at DESC, seq DESC
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: ProductId) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, title, quantity, created_at, updated_at
            FROM inventory.product
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Into::into).ok_or(RepositoryError::NotFound)
    }

    #[instrument(skip(self, draft), fields(title = %draft.title, quantity = draft.quantity))]
    async fn upsert(
        &self,
        target: Target,
        draft: &ProductDraft,
    ) -> Result<Product, RepositoryError> {
        draft.validate().map_err(RepositoryError::Validation)?;

        match target {
            Target::New => self.insert(draft).await,
            Target::Existing(id) => match self.update(id, draft).await? {
                Some(product) => Ok(product),
                None => {
                    tracing::debug!(%id, "upsert target missing, creating new product");
                    self.insert(draft).await
                }
            },
        }
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM inventory.product WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Translate check-constraint violations into validation errors.
fn map_write_error(e: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e {
        match db_err.constraint() {
            Some(QUANTITY_CONSTRAINT) => {
                return RepositoryError::Validation(FieldErrors {
                    title: None,
                    quantity: Some(QUANTITY_NEGATIVE_MESSAGE.to_owned()),
                });
            }
            Some(TITLE_CONSTRAINT) => {
                return RepositoryError::Validation(FieldErrors {
                    title: Some(TITLE_REQUIRED_MESSAGE.to_owned()),
                    quantity: None,
                });
            }
            _ => {}
        }
    }
    RepositoryError::Database(e)
}
