//! `PostgreSQL` product store tests.
//!
//! These tests require a migratable database named by
//! `STOCKROOM_TEST_DATABASE_URL`. They only touch rows they create.
//!
//! Run with: cargo test -p stockroom-integration-tests -- --ignored

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use reqwest::StatusCode;
use secrecy::SecretString;

use stockroom_admin::db::{self, PgProductStore, ProductStore, RepositoryError};
use stockroom_core::{Product, ProductDraft, ProductId, Target};
use stockroom_integration_tests::TestServer;

async fn store() -> PgProductStore {
    let url = std::env::var("STOCKROOM_TEST_DATABASE_URL")
        .map(SecretString::from)
        .expect("STOCKROOM_TEST_DATABASE_URL must be set");
    let pool = db::create_pool(&url, 2).await.unwrap();
    sqlx::migrate!("../admin/migrations").run(&pool).await.unwrap();
    PgProductStore::new(pool)
}

async fn create(store: &PgProductStore, title: &str, quantity: i32) -> Product {
    store
        .upsert(Target::New, &ProductDraft::new(title, quantity))
        .await
        .unwrap()
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (STOCKROOM_TEST_DATABASE_URL)"]
async fn test_round_trip() {
    let store = store().await;
    let created = create(&store, "Widget", 5).await;

    let fetched = store.get_by_id(created.id).await.unwrap();
    assert_eq!(fetched.title, "Widget");
    assert_eq!(fetched.quantity, 5);

    store.delete(created.id).await.unwrap();
    store.close().await;
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (STOCKROOM_TEST_DATABASE_URL)"]
async fn test_list_is_newest_first() {
    let store = store().await;
    let a = create(&store, "A", 1).await;
    let b = create(&store, "B", 2).await;

    let ids: Vec<ProductId> = store
        .list_all()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .filter(|id| *id == a.id || *id == b.id)
        .collect();
    assert_eq!(ids, vec![b.id, a.id]);

    store.delete(b.id).await.unwrap();
    let remaining: Vec<ProductId> = store
        .list_all()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert!(remaining.contains(&a.id));
    assert!(!remaining.contains(&b.id));

    store.delete(a.id).await.unwrap();
    store.close().await;
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (STOCKROOM_TEST_DATABASE_URL)"]
async fn test_same_instant_rows_list_latest_insert_first() {
    let store = store().await;

    // One statement shares a single now(), so both rows get the same created_at.
    let ids: Vec<ProductId> = sqlx::query_scalar(
        "INSERT INTO inventory.product (title, quantity) VALUES ('Tie A', 1), ('Tie B', 2) RETURNING id",
    )
    .fetch_all(store.pool())
    .await
    .unwrap();
    let (a, b) = (ids[0], ids[1]);
    assert_eq!(
        store.get_by_id(a).await.unwrap().created_at,
        store.get_by_id(b).await.unwrap().created_at
    );

    for _ in 0..3 {
        let listed: Vec<ProductId> = store
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .filter(|id| *id == a || *id == b)
            .collect();
        assert_eq!(listed, vec![b, a]);
    }

    store.delete(a).await.unwrap();
    store.delete(b).await.unwrap();
    store.close().await;
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (STOCKROOM_TEST_DATABASE_URL)"]
async fn test_nul_title_is_a_validation_error() {
    let store = store().await;

    let err = store
        .upsert(Target::New, &ProductDraft::new("a\0b", 1))
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::Validation(ref e) if e.title.is_some()));
    store.close().await;
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (STOCKROOM_TEST_DATABASE_URL)"]
async fn test_validation_gate_leaves_row_unchanged() {
    let store = store().await;
    let created = create(&store, "Widget", 5).await;

    for draft in [ProductDraft::new("", 5), ProductDraft::new("Widget", -1)] {
        let err = store
            .upsert(Target::Existing(created.id), &draft)
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Validation(_)));
    }
    assert_eq!(store.get_by_id(created.id).await.unwrap(), created);

    store.delete(created.id).await.unwrap();
    store.close().await;
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (STOCKROOM_TEST_DATABASE_URL)"]
async fn test_check_constraints_reject_direct_writes() {
    let store = store().await;

    let result = sqlx::query("INSERT INTO inventory.product (title, quantity) VALUES ('X', -1)")
        .execute(store.pool())
        .await;
    assert!(result.is_err());

    let result = sqlx::query("INSERT INTO inventory.product (title, quantity) VALUES ('  ', 1)")
        .execute(store.pool())
        .await;
    assert!(result.is_err());

    store.close().await;
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (STOCKROOM_TEST_DATABASE_URL)"]
async fn test_not_found() {
    let store = store().await;
    let id = ProductId::generate();

    assert!(matches!(
        store.get_by_id(id).await,
        Err(RepositoryError::NotFound)
    ));
    assert!(matches!(
        store.delete(id).await,
        Err(RepositoryError::NotFound)
    ));
    store.close().await;
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (STOCKROOM_TEST_DATABASE_URL)"]
async fn test_http_over_postgres() {
    let server = TestServer::spawn(Arc::new(store().await)).await;

    let resp = server.get("/health/ready").await;
    assert_eq!(resp.status(), StatusCode::OK);

    let title = format!("Widget {}", uuid::Uuid::new_v4());
    let resp = server
        .post_form(
            "/products/new",
            &[("intent", "save"), ("title", title.as_str()), ("quantity", "3")],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let list = server.get_json("/api/products").await;
    let created = list["products"]
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["title"] == title.as_str())
        .unwrap();
    assert_eq!(created["quantity"], 3);
    let id = created["id"].as_str().unwrap().to_string();

    let resp = server
        .post_form(&format!("/products/{id}"), &[("intent", "delete")])
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    server.store.close().await;
}
