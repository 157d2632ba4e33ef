//! Integration test support for Stockroom.
//!
//! [`TestServer`] serves the real application router on an ephemeral port
//! inside the test process, backed by whichever [`ProductStore`] the test
//! injects, and drives it over HTTP with `reqwest`.
//!
//! # Running Tests
//!
//! ```bash
//! # In-process HTTP tests (no external services)
//! cargo test -p stockroom-integration-tests
//!
//! # PostgreSQL-backed tests
//! STOCKROOM_TEST_DATABASE_URL=postgres://localhost/stockroom_test \
//!     cargo test -p stockroom-integration-tests -- --ignored
//! ```

#![allow(clippy::missing_panics_doc)]

use std::net::SocketAddr;
use std::sync::Arc;

use reqwest::{Client, Response, redirect::Policy};
use tokio::task::JoinHandle;

use stockroom_admin::db::{MemoryProductStore, ProductStore};
use stockroom_admin::state::AppState;

/// A running application instance.
pub struct TestServer<S> {
    /// The store injected into the application state.
    pub store: Arc<S>,
    addr: SocketAddr,
    client: Client,
    handle: JoinHandle<()>,
}

impl TestServer<MemoryProductStore> {
    /// Serve the application over a fresh in-memory store.
    pub async fn spawn_memory() -> Self {
        Self::spawn(Arc::new(MemoryProductStore::new())).await
    }
}

impl<S: ProductStore + 'static> TestServer<S> {
    /// Serve the application over the given store.
    pub async fn spawn(store: Arc<S>) -> Self {
        let app = stockroom_admin::app(AppState::new(store.clone()));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test server error");
        });

        // Redirects are asserted, not followed.
        let client = Client::builder()
            .redirect(Policy::none())
            .build()
            .expect("Failed to create HTTP client");

        Self {
            store,
            addr,
            client,
            handle,
        }
    }

    /// Absolute URL for a path on this server.
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// The HTTP client used by this server's helpers.
    pub const fn client(&self) -> &Client {
        &self.client
    }

    pub async fn get(&self, path: &str) -> Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("GET request failed")
    }

    pub async fn get_json(&self, path: &str) -> serde_json::Value {
        self.get(path)
            .await
            .json()
            .await
            .expect("Response was not JSON")
    }

    pub async fn post_form(&self, path: &str, fields: &[(&str, &str)]) -> Response {
        self.client
            .post(self.url(path))
            .form(fields)
            .send()
            .await
            .expect("POST request failed")
    }
}

impl<S> Drop for TestServer<S> {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
