//! Database integration tests
//!
//! These tests exercise `TursoClient` against in-memory and on-disk SQLite.

mod common;

use authgate::{
    db::{CredentialStore, DatabaseProvider, TursoClient, UserRecord},
    types::AppError,
};
use chrono::Utc;
use common::memory_store;

fn user(id: &str, email: &str) -> UserRecord {
    UserRecord {
        id: id.to_string(),
        name: "Test User".to_string(),
        email: email.to_string(),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
        created_at: Utc::now().timestamp(),
    }
}

#[tokio::test]
async fn test_insert_and_find() {
    let client = memory_store().await;
    let record = user("user-123", "test@example.com");

    client.insert(&record).await.expect("insert should succeed");

    let found = client
        .find_by_email("test@example.com")
        .await
        .unwrap()
        .expect("record should exist");
    assert_eq!(found, record);
}

#[tokio::test]
async fn test_find_missing_returns_none() {
    let client = memory_store().await;

    let found = client.find_by_email("nobody@example.com").await.unwrap();

    assert!(found.is_none());
}

#[tokio::test]
async fn test_email_lookup_is_exact() {
    let client = memory_store().await;
    client.insert(&user("user-1", "test@example.com")).await.unwrap();

    assert!(client
        .find_by_email("other@example.com")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_duplicate_email_rejected() {
    let client = memory_store().await;
    client.insert(&user("user-1", "test@example.com")).await.unwrap();

    let result = client.insert(&user("user-2", "test@example.com")).await;

    assert!(matches!(result, Err(AppError::DuplicateEmail)));
    let found = client
        .find_by_email("test@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, "user-1");
}

#[tokio::test]
async fn test_duplicate_id_is_storage_error() {
    let client = memory_store().await;
    client.insert(&user("user-1", "a@example.com")).await.unwrap();

    let result = client.insert(&user("user-1", "b@example.com")).await;

    assert!(matches!(result, Err(AppError::Storage(_))));
}

#[tokio::test]
async fn test_ping() {
    let client = memory_store().await;

    assert!(client.ping().await.is_ok());
}

#[tokio::test]
async fn test_local_file_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("users.db");
    let path = path.to_str().unwrap();

    {
        let client = TursoClient::new_local(path)
            .await
            .expect("Failed to create local database");
        client.insert(&user("user-1", "keep@example.com")).await.unwrap();
    }

    let reopened = TursoClient::new_local(path).await.unwrap();
    let found = reopened.find_by_email("keep@example.com").await.unwrap();
    assert!(found.is_some());
}

#[tokio::test]
async fn test_memory_stores_are_isolated() {
    let first = memory_store().await;
    let second = memory_store().await;
    first.insert(&user("user-1", "solo@example.com")).await.unwrap();

    assert!(second
        .find_by_email("solo@example.com")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_provider_creates_working_client() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("provider.db");

    let provider = DatabaseProvider::from_url(path.to_str().unwrap(), None).unwrap();
    let store = provider.create_client().await.unwrap();

    store.insert(&user("user-1", "p@example.com")).await.unwrap();
    assert!(store.find_by_email("p@example.com").await.unwrap().is_some());
}
