use crate::db::traits::{CredentialStore, UserRecord};
use crate::types::{AppError, Result};
use async_trait::async_trait;
use libsql::{Builder, Connection, Database};
use std::path::Path;

/// libsql-backed credential store.
///
/// A single connection is opened at construction and shared by every
/// request; `:memory:` databases only exist for the lifetime of that
/// connection.
pub struct TursoClient {
    _db: Database,
    conn: Connection,
}

impl TursoClient {
    /// Ephemeral in-memory database.
    pub async fn new_memory() -> Result<Self> {
        let db = Builder::new_local(":memory:")
            .build()
            .await
            .map_err(|e| AppError::Storage(format!("Failed to open in-memory database: {}", e)))?;

        Self::from_database(db).await
    }

    /// File-based SQLite database. Parent directories are created as needed.
    pub async fn new_local(path: &str) -> Result<Self> {
        if path != ":memory:" {
            if let Some(parent) = Path::new(path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        AppError::Storage(format!(
                            "Failed to create database directory {}: {}",
                            parent.display(),
                            e
                        ))
                    })?;
                }
            }
        }

        let db = Builder::new_local(path)
            .build()
            .await
            .map_err(|e| AppError::Storage(format!("Failed to open database {}: {}", path, e)))?;

        Self::from_database(db).await
    }

    /// Remote Turso / libsql server.
    pub async fn new_remote(url: String, auth_token: String) -> Result<Self> {
        let db = Builder::new_remote(url, auth_token)
            .build()
            .await
            .map_err(|e| AppError::Storage(format!("Failed to connect to Turso: {}", e)))?;

        Self::from_database(db).await
    }

    async fn from_database(db: Database) -> Result<Self> {
        let conn = db
            .connect()
            .map_err(|e| AppError::Storage(format!("Failed to get connection: {}", e)))?;

        let client = Self { _db: db, conn };
        client.initialize_schema().await?;

        Ok(client)
    }

    pub fn connection(&self) -> Connection {
        self.conn.clone()
    }

    async fn initialize_schema(&self) -> Result<()> {
        let conn = self.connection();

        conn.execute(
            "CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT NOT NULL,
                password_hash TEXT NOT NULL,
                created_at INTEGER NOT NULL
            )",
            (),
        )
        .await
        .map_err(|e| AppError::Storage(format!("Failed to create users table: {}", e)))?;

        // Closes the check-then-insert window in registration: the second of
        // two concurrent inserts for one email fails here.
        conn.execute(
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_users_email ON users (email)",
            (),
        )
        .await
        .map_err(|e| AppError::Storage(format!("Failed to create email index: {}", e)))?;

        Ok(())
    }
}

fn is_email_conflict(err: &libsql::Error) -> bool {
    err.to_string().contains("UNIQUE constraint failed: users.email")
}

#[async_trait]
impl CredentialStore for TursoClient {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>> {
        let conn = self.connection();

        let mut rows = conn
            .query(
                "SELECT id, name, email, password_hash, created_at
                 FROM users WHERE email = ? LIMIT 1",
                [email],
            )
            .await
            .map_err(|e| AppError::Storage(format!("Failed to query user: {}", e)))?;

        let Some(row) = rows
            .next()
            .await
            .map_err(|e| AppError::Storage(e.to_string()))?
        else {
            return Ok(None);
        };

        Ok(Some(UserRecord {
            id: row.get(0).map_err(|e| AppError::Storage(e.to_string()))?,
            name: row.get(1).map_err(|e| AppError::Storage(e.to_string()))?,
            email: row.get(2).map_err(|e| AppError::Storage(e.to_string()))?,
            password_hash: row.get(3).map_err(|e| AppError::Storage(e.to_string()))?,
            created_at: row.get(4).map_err(|e| AppError::Storage(e.to_string()))?,
        }))
    }

    async fn insert(&self, record: &UserRecord) -> Result<()> {
        let conn = self.connection();

        conn.execute(
            "INSERT INTO users (id, name, email, password_hash, created_at)
             VALUES (?, ?, ?, ?, ?)",
            (
                record.id.as_str(),
                record.name.as_str(),
                record.email.as_str(),
                record.password_hash.as_str(),
                record.created_at,
            ),
        )
        .await
        .map_err(|e| {
            if is_email_conflict(&e) {
                AppError::DuplicateEmail
            } else {
                AppError::Storage(format!("Failed to create user: {}", e))
            }
        })?;

        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        let conn = self.connection();
        let mut rows = conn
            .query("SELECT 1", ())
            .await
            .map_err(|e| AppError::Storage(format!("Health query failed: {}", e)))?;
        rows.next()
            .await
            .map_err(|e| AppError::Storage(e.to_string()))?;
        Ok(())
    }
}
