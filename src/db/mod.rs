//! Credential storage.
//!
//! - [`traits`] - the `CredentialStore` contract and backend selection
//! - [`turso`] - libsql implementation (in-memory, local file, remote Turso)

pub mod traits;
pub mod turso;

pub use traits::{CredentialStore, DatabaseProvider, UserRecord};
pub use turso::TursoClient;
