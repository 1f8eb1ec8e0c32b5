//! API request handlers.

/// Registration and login handlers.
pub mod auth;
/// Health check handler.
pub mod health;
