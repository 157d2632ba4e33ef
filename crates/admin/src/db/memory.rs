//! In-memory product store.
//!
//! Mirrors [`super::PgProductStore`] semantics (validation gate, newest-first
//! ordering, not-found on delete) without a database. Used by unit and
//! in-process integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use stockroom_core::{Product, ProductDraft, ProductId, ProductSummary, Target};

use super::{ProductStore, RepositoryError};

/// Product store held in process memory.
#[derive(Debug, Default)]
pub struct MemoryProductStore {
    /// Products in insertion order.
    products: RwLock<Vec<Product>>,
    /// Number of read queries served, for asserting that a path never hit storage.
    reads: AtomicUsize,
}

impl MemoryProductStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// How many read operations (`list_all`, `get_by_id`) have been served.
    #[must_use]
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::Relaxed)
    }

    fn insert(products: &mut Vec<Product>, draft: &ProductDraft) -> Product {
        let now = Utc::now();
        let product = Product {
            id: ProductId::generate(),
            title: draft.title.clone(),
            quantity: draft.quantity,
            created_at: now,
            updated_at: now,
        };
        products.push(product.clone());
        product
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn list_all(&self) -> Result<Vec<ProductSummary>, RepositoryError> {
        self.reads.fetch_add(1, Ordering::Relaxed);
        let products = self.products.read().await;

        // Stable sort over reversed insertion order keeps same-instant
        // creations newest-first too.
        let mut newest_first: Vec<&Product> = products.iter().rev().collect();
        newest_first.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(newest_first.into_iter().map(Product::summary).collect())
    }

    async fn get_by_id(&self, id: ProductId) -> Result<Product, RepositoryError> {
        self.reads.fetch_add(1, Ordering::Relaxed);
        self.products
            .read()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn upsert(
        &self,
        target: Target,
        draft: &ProductDraft,
    ) -> Result<Product, RepositoryError> {
        draft.validate().map_err(RepositoryError::Validation)?;

        let mut products = self.products.write().await;
        let existing = target
            .id()
            .and_then(|id| products.iter_mut().find(|p| p.id == id));

        match existing {
            Some(product) => {
                product.title.clone_from(&draft.title);
                product.quantity = draft.quantity;
                product.updated_at = Utc::now();
                Ok(product.clone())
            }
            None => Ok(Self::insert(&mut products, draft)),
        }
    }

    async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        let mut products = self.products.write().await;
        let index = products
            .iter()
            .position(|p| p.id == id)
            .ok_or(RepositoryError::NotFound)?;
        products.remove(index);
        Ok(())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}
