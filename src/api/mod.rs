//! HTTP API Handlers and Routes
//!
//! This module provides the REST API layer, built on the Axum web framework.
//!
//! # API Endpoints
//!
//! - `POST /register` - Register a new user (`201`, `400`, `409`, `500`)
//! - `POST /login` - Exchange credentials for a JWT (`200`, `400`, `401`, `500`)
//! - `GET /health` - Health check with a store round-trip
//!
//! Every error body has the shape `{"error": "<message>"}`.
//!
//! # OpenAPI Documentation
//!
//! `authgate openapi` prints the document. When the `swagger-ui` feature is
//! enabled, interactive documentation is served at `/swagger-ui/`.

use crate::types::{ErrorResponse, LoginRequest, LoginResponse, MessageResponse, RegisterRequest};
use utoipa::OpenApi;

/// Request and response handlers for all API endpoints.
pub mod handlers;
/// Router configuration and route definitions.
pub mod routes;

#[derive(OpenApi)]
#[openapi(
    info(title = "authgate", description = "Minimal registration and login service"),
    paths(handlers::auth::register, handlers::auth::login),
    components(schemas(
        RegisterRequest,
        LoginRequest,
        MessageResponse,
        LoginResponse,
        ErrorResponse
    )),
    tags((name = "auth", description = "Registration and login"))
)]
pub struct ApiDoc;
