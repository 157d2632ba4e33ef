//! Seed the database with sample products.
//!
//! Products are written through [`PgProductStore`], so the same validation
//! gate as the server applies.

use tracing::info;

use stockroom_admin::db::{PgProductStore, ProductStore};
use stockroom_core::{ProductDraft, Target};

use super::{CommandError, connect};

/// Default number of products to seed.
pub const DEFAULT_COUNT: usize = 12;

const SAMPLE_TITLES: &[&str] = &[
    "Widget",
    "Gadget",
    "Sprocket",
    "Flange",
    "Gasket",
    "Hinge",
    "Bracket",
    "Spindle",
];

/// Sample drafts, cycling through the title list with a numeric suffix
/// once it wraps.
pub fn sample_drafts(count: usize) -> Vec<ProductDraft> {
    SAMPLE_TITLES
        .iter()
        .cycle()
        .take(count)
        .enumerate()
        .map(|(i, base)| {
            let round = i / SAMPLE_TITLES.len();
            let title = if round == 0 {
                (*base).to_string()
            } else {
                format!("{base} {}", round + 1)
            };
            let quantity = i32::try_from((i * 7) % 50).unwrap_or(0);
            ProductDraft::new(title, quantity)
        })
        .collect()
}

/// Insert `count` sample products.
///
/// # Errors
///
/// Returns `CommandError` if the connection or an insert fails.
pub async fn run(count: usize) -> Result<(), CommandError> {
    let store = PgProductStore::new(connect().await?);

    for draft in sample_drafts(count) {
        let product = store.upsert(Target::New, &draft).await?;
        info!(id = %product.id, title = %product.title, "seeded product");
    }

    store.close().await;
    info!(count, "Seeding complete!");
    Ok(())
}
