//! Product management commands.

use stockroom_admin::db::{PgProductStore, ProductStore};
use stockroom_core::{ProductDraft, ProductId, Target};

use super::{CommandError, connect};

async fn open_store() -> Result<PgProductStore, CommandError> {
    Ok(PgProductStore::new(connect().await?))
}

/// Print all products, newest first.
///
/// # Errors
///
/// Returns `CommandError` if the connection or query fails.
pub async fn list() -> Result<(), CommandError> {
    let store = open_store().await?;
    let products = store.list_all().await?;
    store.close().await;

    #[allow(clippy::print_stdout)]
    {
        if products.is_empty() {
            println!("No products.");
        }
        for product in &products {
            println!("{}  {:>6}  {}", product.id, product.quantity, product.title);
        }
    }
    Ok(())
}

/// Create one product.
///
/// # Errors
///
/// Returns `CommandError::Repository` if the product fails validation.
pub async fn add(title: String, quantity: i32) -> Result<(), CommandError> {
    let store = open_store().await?;
    let result = store
        .upsert(Target::New, &ProductDraft::new(title, quantity))
        .await;
    store.close().await;
    let product = result?;

    #[allow(clippy::print_stdout)]
    {
        println!("{}", product.id);
    }
    tracing::info!(id = %product.id, "product created");
    Ok(())
}

/// Delete one product.
///
/// # Errors
///
/// Returns `CommandError::Repository` if no product has this ID.
pub async fn delete(id: ProductId) -> Result<(), CommandError> {
    let store = open_store().await?;
    let result = store.delete(id).await;
    store.close().await;
    result?;

    tracing::info!(%id, "product deleted");
    Ok(())
}
