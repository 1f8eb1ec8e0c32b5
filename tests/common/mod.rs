//! Shared fixtures for integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use authgate::{
    api::routes::build_app,
    auth::{AuthFlows, PasswordHasher, TokenIssuer},
    db::{CredentialStore, TursoClient, UserRecord},
    types::{AppError, Result},
    utils::toml_config::AuthgateConfig,
    AppState,
};
use axum_test::TestServer;
use std::sync::Arc;

pub const TEST_SECRET: &str = "integration-test-secret";

/// Store double whose every operation fails as if the backend were down.
pub struct UnavailableStore;

#[async_trait]
impl CredentialStore for UnavailableStore {
    async fn find_by_email(&self, _email: &str) -> Result<Option<UserRecord>> {
        Err(AppError::Storage("connection refused".to_string()))
    }

    async fn insert(&self, _record: &UserRecord) -> Result<()> {
        Err(AppError::Storage("connection refused".to_string()))
    }

    async fn ping(&self) -> Result<()> {
        Err(AppError::Storage("connection refused".to_string()))
    }
}

/// Fresh in-memory store with the schema applied.
pub async fn memory_store() -> Arc<TursoClient> {
    Arc::new(
        TursoClient::new_memory()
            .await
            .expect("Failed to create in-memory database"),
    )
}

pub fn server_with_store(store: Arc<dyn CredentialStore>) -> TestServer {
    let flows = AuthFlows::new(store, PasswordHasher::new(), TokenIssuer::new(TEST_SECRET));
    let app = build_app(AppState::new(AuthgateConfig::default(), flows));
    TestServer::new(app).expect("Failed to create test server")
}

/// Test server plus a handle on its store for side-effect assertions.
pub async fn create_test_server() -> (TestServer, Arc<TursoClient>) {
    let store = memory_store().await;
    let server = server_with_store(store.clone());
    (server, store)
}
