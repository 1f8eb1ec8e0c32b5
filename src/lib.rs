//! # authgate
//!
//! A minimal credential gate: users register with a name, email and password,
//! the password is stored as a salted Argon2id hash, and a successful login
//! returns an HS256-signed JWT valid for 72 hours.
//!
//! ## Overview
//!
//! authgate can be used in two ways:
//!
//! 1. **As a standalone server** - Run the `authgate` binary
//! 2. **As a library** - Embed [`AuthFlows`](auth::AuthFlows) or the router in your own service
//!
//! ### Library Example
//!
//! ```rust,ignore
//! use authgate::{api::routes::build_app, auth::{AuthFlows, PasswordHasher, TokenIssuer},
//!     db::TursoClient, utils::toml_config::AuthgateConfig, AppState};
//! use std::sync::Arc;
//!
//! let store = Arc::new(TursoClient::new_memory().await?);
//! let flows = AuthFlows::new(store, PasswordHasher::new(), TokenIssuer::new(secret));
//! let app = build_app(AppState::new(AuthgateConfig::default(), flows));
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//! axum::serve(listener, app).await?;
//! ```
//!
//! ## Modules
//!
//! - [`api`] - HTTP handlers, router and OpenAPI document
//! - [`auth`] - password hashing, token issuance and the login/registration flows
//! - [`cli`] - command-line interface
//! - [`db`] - credential store trait and libsql backend
//! - [`types`] - request/response types and error handling
//! - [`utils`] - configuration loading

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(rustdoc::missing_crate_level_docs)]

/// HTTP API handlers and routes.
pub mod api;
/// Password hashing, token issuance and authentication flows.
pub mod auth;
/// Command-line interface.
pub mod cli;
/// Credential store (libsql / Turso).
pub mod db;
/// Core types (requests, responses, errors).
pub mod types;
/// Configuration utilities (TOML).
pub mod utils;

// Re-export commonly used types
pub use auth::{AuthFlows, PasswordHasher, TokenIssuer};
pub use db::{CredentialStore, DatabaseProvider, TursoClient, UserRecord};
pub use types::{AppError, Result};
pub use utils::toml_config::{AuthgateConfig, ConfigError};

use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Startup configuration, immutable after load
    pub config: Arc<AuthgateConfig>,
    /// Registration and login workflows
    pub flows: Arc<AuthFlows>,
}

impl AppState {
    pub fn new(config: AuthgateConfig, flows: AuthFlows) -> Self {
        Self {
            config: Arc::new(config),
            flows: Arc::new(flows),
        }
    }
}
