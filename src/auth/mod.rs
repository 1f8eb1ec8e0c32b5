//! Password hashing, token issuance and the authentication workflows
//!
//! # Module Structure
//!
//! - [`auth::password`](crate::auth::password) - Argon2id hashing and verification
//! - [`auth::jwt`](crate::auth::jwt) - HS256 token issuance with a fixed 72 hour lifetime
//! - [`auth::flows`](crate::auth::flows) - registration and login state machines
//!
//! # Usage
//!
//! ```ignore
//! use authgate::auth::{AuthFlows, PasswordHasher, TokenIssuer};
//! use authgate::db::TursoClient;
//! use std::sync::Arc;
//!
//! let store = Arc::new(TursoClient::new_memory().await?);
//! let flows = AuthFlows::new(store, PasswordHasher::new(), TokenIssuer::new(secret));
//!
//! flows.register(RegisterRequest { name, email, password }).await?;
//! let token = flows.login(LoginRequest { email, password }).await?;
//! ```
//!
//! Incoming tokens are never verified here; there are no protected routes.

/// Registration and login workflows.
pub mod flows;
/// HS256 token issuance.
pub mod jwt;
/// Argon2id password hashing.
pub mod password;

pub use flows::AuthFlows;
pub use jwt::{TokenIssuer, TOKEN_TTL_HOURS};
pub use password::PasswordHasher;
