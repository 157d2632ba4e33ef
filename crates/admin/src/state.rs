//! Application state shared across handlers.

use std::sync::Arc;

use crate::db::ProductStore;
use crate::services::ProductService;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The product store is
/// constructed by the caller (at process start, or per test) and injected
/// here; nothing in the crate reaches for a global connection.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: Arc<dyn ProductStore>,
}

impl AppState {
    /// Create a new application state around a product store.
    #[must_use]
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { store }),
        }
    }

    /// Get a reference to the product store.
    #[must_use]
    pub fn store(&self) -> &dyn ProductStore {
        self.inner.store.as_ref()
    }

    /// Product read/write service over the injected store.
    #[must_use]
    pub fn products(&self) -> ProductService<'_> {
        ProductService::new(self.store())
    }
}
