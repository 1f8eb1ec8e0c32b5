//! Registration and login workflows.
//!
//! Both flows are straight-line state machines over explicitly injected
//! collaborators; every failure leaves through the returned `AppError`.
//!
//! ```text
//! register: Received -> Validated -> Checked -> Hashed -> Persisted -> Responded
//! login:    Received -> Validated -> Loaded  -> Verified -> Issued  -> Responded
//! ```

use crate::auth::jwt::TokenIssuer;
use crate::auth::password::PasswordHasher;
use crate::db::{CredentialStore, UserRecord};
use crate::types::{AppError, LoginRequest, RegisterRequest, Result};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// The authentication core: a store handle, a hasher and a token issuer,
/// all read-only after construction.
#[derive(Clone)]
pub struct AuthFlows {
    store: Arc<dyn CredentialStore>,
    hasher: PasswordHasher,
    issuer: TokenIssuer,
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

impl AuthFlows {
    pub fn new(store: Arc<dyn CredentialStore>, hasher: PasswordHasher, issuer: TokenIssuer) -> Self {
        Self {
            store,
            hasher,
            issuer,
        }
    }

    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    /// Registers a new user.
    ///
    /// Nothing touches the store or the hasher until the payload has passed
    /// validation.
    pub async fn register(&self, request: RegisterRequest) -> Result<()> {
        if is_blank(&request.name) || is_blank(&request.email) || is_blank(&request.password) {
            return Err(AppError::InvalidInput("All fields are required".to_string()));
        }

        if self.store.find_by_email(&request.email).await?.is_some() {
            debug!(email = %request.email, "registration rejected: email already exists");
            return Err(AppError::DuplicateEmail);
        }

        let password_hash = self.hash_off_runtime(request.password).await?;

        let record = UserRecord {
            id: Uuid::new_v4().to_string(),
            name: request.name,
            email: request.email,
            password_hash,
            created_at: Utc::now().timestamp(),
        };

        // A concurrent registration can slip past the check above; the store's
        // unique index turns the loser into DuplicateEmail here.
        self.store.insert(&record).await?;

        info!(user_id = %record.id, email = %record.email, "user registered");
        Ok(())
    }

    /// Authenticates a user and returns a freshly signed token.
    ///
    /// Unknown emails and wrong passwords both yield
    /// `AppError::InvalidCredentials`.
    pub async fn login(&self, request: LoginRequest) -> Result<String> {
        if is_blank(&request.email) || is_blank(&request.password) {
            return Err(AppError::InvalidInput(
                "Email and password are required".to_string(),
            ));
        }

        let Some(user) = self.store.find_by_email(&request.email).await? else {
            debug!(email = %request.email, "login rejected: unknown email");
            return Err(AppError::InvalidCredentials);
        };

        // An unreadable stored hash is a data fault, not a hashing fault.
        let matches = self
            .verify_off_runtime(request.password, user.password_hash.clone())
            .await
            .map_err(|e| match e {
                AppError::Hash(detail) => AppError::Storage(format!(
                    "Stored password hash for user {} is unusable: {}",
                    user.id, detail
                )),
                other => other,
            })?;
        if !matches {
            warn!(user_id = %user.id, "login rejected: wrong password");
            return Err(AppError::InvalidCredentials);
        }

        let token = self
            .issuer
            .issue(&user.email)
            .map_err(|e| AppError::Token(e.to_string()))?;

        info!(user_id = %user.id, "login succeeded");
        Ok(token)
    }

    async fn hash_off_runtime(&self, password: String) -> Result<String> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AppError::Hash(format!("Hashing task failed: {}", e)))?
    }

    async fn verify_off_runtime(&self, password: String, hash: String) -> Result<bool> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| AppError::Hash(format!("Verification task failed: {}", e)))?
    }
}
