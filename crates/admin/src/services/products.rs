//! Product read and write handling.
//!
//! Both the HTML pages and the JSON API go through [`ProductService`], so the
//! `new` sentinel, intent dispatch and validation behave identically on
//! either surface.
//!
//! # Write flow
//!
//! ```text
//! RECEIVED --intent=delete--> DELETING --ok--> REDIRECT_LIST
//!                                      --NotFound--> FAILED(404)
//! RECEIVED --intent=save----> UPSERTING --ok--> REDIRECT_LIST
//!                                      --Validation--> FAILED(422)
//! ```

use serde::Deserialize;
use tracing::{info, instrument};

use stockroom_core::{
    EditSession, Intent, Product, ProductDraft, ProductId, ProductPage, ProductSummary, Target,
};

use crate::db::{ProductStore, RepositoryError};

/// Where successful writes send the browser.
pub const LIST_PATH: &str = "/";

/// Raw product form as posted by the browser.
///
/// Every field is optional; missing values fall back to the lenient
/// defaults (save intent, empty title, zero quantity).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductForm {
    pub intent: Option<String>,
    pub title: Option<String>,
    pub quantity: Option<String>,
}

impl ProductForm {
    #[must_use]
    pub fn intent(&self) -> Intent {
        Intent::from_form(self.intent.as_deref())
    }

    #[must_use]
    pub fn draft(&self) -> ProductDraft {
        ProductDraft::from_form(self.title.clone(), self.quantity.as_deref())
    }
}

/// Result of an accepted write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Saved(Product),
    Deleted(ProductId),
}

/// Product read/write operations over an injected store.
pub struct ProductService<'a> {
    store: &'a dyn ProductStore,
}

impl<'a> ProductService<'a> {
    #[must_use]
    pub const fn new(store: &'a dyn ProductStore) -> Self {
        Self { store }
    }

    /// Products for the list page, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the store fails.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<ProductSummary>, RepositoryError> {
        self.store.list_all().await
    }

    /// Data for a product form page.
    ///
    /// The new-product form is synthesized without touching the store.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if an existing target has no
    /// stored product.
    #[instrument(skip(self))]
    pub async fn load(&self, target: Target) -> Result<ProductPage, RepositoryError> {
        match target {
            Target::New => Ok(ProductPage::new_product()),
            Target::Existing(id) => {
                let product = self.store.get_by_id(id).await?;
                Ok(ProductPage::existing(&product))
            }
        }
    }

    /// Apply a submitted product form.
    ///
    /// # Errors
    ///
    /// - `RepositoryError::NotFound` when deleting a product that does not
    ///   exist (including the unsaved `new` target)
    /// - `RepositoryError::Validation` when saving an invalid draft
    #[instrument(skip(self, form), fields(intent = form.intent().as_str()))]
    pub async fn submit(
        &self,
        target: Target,
        form: &ProductForm,
    ) -> Result<WriteOutcome, RepositoryError> {
        match form.intent() {
            Intent::Delete => {
                let id = target.id().ok_or(RepositoryError::NotFound)?;
                self.store.delete(id).await?;
                info!(%id, "product deleted");
                Ok(WriteOutcome::Deleted(id))
            }
            Intent::Save => {
                let product = self.store.upsert(target, &form.draft()).await?;
                info!(id = %product.id, "product saved");
                Ok(WriteOutcome::Saved(product))
            }
        }
    }

    /// Rebuild the edit session for a form whose save was rejected.
    ///
    /// The session is seeded from the stored product (so reset still goes
    /// back to the saved values) and then replays the submitted values, so
    /// the user sees what they typed next to the field errors.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if an existing target vanished.
    #[instrument(skip(self, form))]
    pub async fn rejected_session(
        &self,
        target: Target,
        form: &ProductForm,
    ) -> Result<EditSession, RepositoryError> {
        let page = match self.load(target).await {
            Ok(page) => page,
            // Saving to a vanished id would have created a new product; show it as such.
            Err(RepositoryError::NotFound) => ProductPage::new_product(),
            Err(e) => return Err(e),
        };

        let mut session = EditSession::new(page);
        session.on_title_changed(form.title.clone().unwrap_or_default());
        session.on_quantity_changed(form.quantity.as_deref().unwrap_or_default());
        if session.save().is_err() && session.errors().title.is_some() {
            session.enter_title_edit();
        }
        Ok(session)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use stockroom_core::{Mode, TITLE_REQUIRED_MESSAGE, TitleState};

    use super::*;
    use crate::db::MemoryProductStore;

    fn save_form(title: &str, quantity: &str) -> ProductForm {
        ProductForm {
            intent: Some("save".to_owned()),
            title: Some(title.to_owned()),
            quantity: Some(quantity.to_owned()),
        }
    }

    fn delete_form() -> ProductForm {
        ProductForm {
            intent: Some("delete".to_owned()),
            ..ProductForm::default()
        }
    }

    #[tokio::test]
    async fn test_load_new_never_queries_store() {
        let store = MemoryProductStore::new();
        let service = ProductService::new(&store);

        let page = service.load(Target::New).await.unwrap();
        assert_eq!(page, ProductPage::new_product());
        assert_eq!(page.product().id, "");
        assert_eq!(page.mode(), Mode::New);
        assert_eq!(store.read_count(), 0);
    }

    #[tokio::test]
    async fn test_load_missing_is_not_found() {
        let store = MemoryProductStore::new();
        let service = ProductService::new(&store);

        let err = service
            .load(Target::Existing(ProductId::generate()))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_create_then_edit_then_delete() {
        let store = MemoryProductStore::new();
        let service = ProductService::new(&store);

        let WriteOutcome::Saved(created) = service
            .submit(Target::New, &save_form("Widget", "5"))
            .await
            .unwrap()
        else {
            panic!("expected save");
        };

        let page = service.load(Target::Existing(created.id)).await.unwrap();
        assert_eq!(page.mode(), Mode::Edit);
        assert_eq!(page.product().title, "Widget");
        assert_eq!(page.product().quantity, 5);

        let outcome = service
            .submit(Target::Existing(created.id), &save_form("Widget", "7"))
            .await
            .unwrap();
        assert!(matches!(outcome, WriteOutcome::Saved(ref p) if p.id == created.id && p.quantity == 7));

        let outcome = service
            .submit(Target::Existing(created.id), &delete_form())
            .await
            .unwrap();
        assert_eq!(outcome, WriteOutcome::Deleted(created.id));
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_intent_and_quantity_default_to_save_zero() {
        let store = MemoryProductStore::new();
        let service = ProductService::new(&store);

        let form = ProductForm {
            title: Some("Bare".to_owned()),
            ..ProductForm::default()
        };
        let outcome = service.submit(Target::New, &form).await.unwrap();
        assert!(matches!(outcome, WriteOutcome::Saved(ref p) if p.quantity == 0));
    }

    #[tokio::test]
    async fn test_delete_missing_and_new_are_not_found() {
        let store = MemoryProductStore::new();
        let service = ProductService::new(&store);

        let err = service
            .submit(Target::Existing(ProductId::generate()), &delete_form())
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));

        let err = service
            .submit(Target::New, &delete_form())
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_invalid_save_is_rejected_by_store() {
        let store = MemoryProductStore::new();
        let service = ProductService::new(&store);

        let err = service
            .submit(Target::New, &save_form("  ", "-3"))
            .await
            .unwrap_err();
        let RepositoryError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert!(errors.title.is_some());
        assert!(errors.quantity.is_some());
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rejected_session_preserves_submitted_values() {
        let store = MemoryProductStore::new();
        let created = store
            .upsert(Target::New, &ProductDraft::new("Widget", 5))
            .await
            .unwrap();
        let service = ProductService::new(&store);

        let mut session = service
            .rejected_session(Target::Existing(created.id), &save_form("", "3"))
            .await
            .unwrap();
        assert_eq!(session.title(), "");
        assert_eq!(session.quantity(), 3);
        assert_eq!(
            session.errors().title.as_deref(),
            Some(TITLE_REQUIRED_MESSAGE)
        );
        assert_eq!(session.title_state(), TitleState::Editing);

        session.reset();
        assert_eq!(session.title(), "Widget");
        assert_eq!(session.quantity(), 5);
    }

    #[tokio::test]
    async fn test_rejected_session_for_new_product() {
        let store = MemoryProductStore::new();
        let service = ProductService::new(&store);

        let session = service
            .rejected_session(Target::New, &save_form("Widget", "-1"))
            .await
            .unwrap();
        assert_eq!(session.mode(), Mode::New);
        assert_eq!(session.title(), "Widget");
        assert_eq!(session.quantity(), -1);
        assert!(session.errors().quantity.is_some());
    }
}
