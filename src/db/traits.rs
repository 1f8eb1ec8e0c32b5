//! Credential store abstraction
//!
//! This module provides the `CredentialStore` trait that the registration and
//! login flows depend on, and `DatabaseProvider`, which picks a libsql backend
//! (in-memory, file-based, or remote Turso) from a connection string.
//!
//! # Example
//!
//! ```rust,ignore
//! use authgate::db::DatabaseProvider;
//!
//! // Ephemeral store for development/testing
//! let store = DatabaseProvider::Memory.create_client().await?;
//!
//! // Pick a backend from a connection string
//! let store = DatabaseProvider::from_url("./data/authgate.db", None)?.create_client().await?;
//! ```

use crate::types::{AppError, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// One registered user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    /// Storage identifier (UUID v4)
    pub id: String,
    pub name: String,
    /// Business key; at most one record per distinct value
    pub email: String,
    /// Argon2 PHC string, never the plaintext
    pub password_hash: String,
    /// Unix timestamp of creation
    pub created_at: i64,
}

/// Persistence for user records.
///
/// `find_by_email` returns `Ok(None)` when no record matches; transport or
/// storage faults surface as `AppError::Storage` so "not found" and "store
/// unavailable" stay distinct.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Point lookup by email.
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>>;

    /// Durably appends a record.
    ///
    /// Returns `AppError::DuplicateEmail` if the backend rejects the email as
    /// already taken.
    async fn insert(&self, record: &UserRecord) -> Result<()>;

    /// Cheap liveness probe used by the health endpoint.
    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

/// Database provider configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DatabaseProvider {
    /// In-memory SQLite database (ephemeral, lost on restart)
    #[default]
    Memory,
    /// File-based SQLite database
    SQLite {
        /// Path to the SQLite database file
        path: String,
    },
    /// Remote Turso / libsql server
    Remote {
        /// The database URL (e.g., `libsql://your-db.turso.io`)
        url: String,
        /// Authentication token for the remote database
        auth_token: String,
    },
}

impl DatabaseProvider {
    /// Pick a provider from a connection string.
    ///
    /// `:memory:` selects the in-memory store, `libsql://`, `http://` and
    /// `https://` URLs select a remote server (a token is required), anything
    /// else is treated as a local file path.
    pub fn from_url(url: &str, auth_token: Option<String>) -> Result<Self> {
        let url = url.trim();

        if url.is_empty() || url == ":memory:" {
            return Ok(DatabaseProvider::Memory);
        }

        let is_remote = ["libsql://", "http://", "https://"]
            .iter()
            .any(|scheme| url.starts_with(scheme));

        if is_remote {
            let auth_token = auth_token
                .filter(|t| !t.is_empty())
                .ok_or_else(|| {
                    AppError::Storage(format!("Remote database {} requires an auth token", url))
                })?;
            return Ok(DatabaseProvider::Remote {
                url: url.to_string(),
                auth_token,
            });
        }

        Ok(DatabaseProvider::SQLite {
            path: url.to_string(),
        })
    }

    /// Create a store client from this provider configuration
    pub async fn create_client(&self) -> Result<Arc<dyn CredentialStore>> {
        let client = match self {
            DatabaseProvider::Memory => super::turso::TursoClient::new_memory().await?,
            DatabaseProvider::SQLite { path } => super::turso::TursoClient::new_local(path).await?,
            DatabaseProvider::Remote { url, auth_token } => {
                super::turso::TursoClient::new_remote(url.clone(), auth_token.clone()).await?
            }
        };
        Ok(Arc::new(client))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_url() {
        assert_eq!(
            DatabaseProvider::from_url(":memory:", None).unwrap(),
            DatabaseProvider::Memory
        );
        assert_eq!(
            DatabaseProvider::from_url("", None).unwrap(),
            DatabaseProvider::Memory
        );
    }

    #[test]
    fn test_local_path() {
        assert_eq!(
            DatabaseProvider::from_url("./data/authgate.db", None).unwrap(),
            DatabaseProvider::SQLite {
                path: "./data/authgate.db".to_string()
            }
        );
    }

    #[test]
    fn test_remote_requires_token() {
        let result = DatabaseProvider::from_url("libsql://users.turso.io", None);
        assert!(matches!(result, Err(AppError::Storage(_))));

        let provider =
            DatabaseProvider::from_url("libsql://users.turso.io", Some("tok".to_string()))
                .unwrap();
        assert_eq!(
            provider,
            DatabaseProvider::Remote {
                url: "libsql://users.turso.io".to_string(),
                auth_token: "tok".to_string()
            }
        );
    }
}
