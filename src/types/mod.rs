use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ============= API Request/Response Types =============

/// Body of `POST /register`.
///
/// Unknown fields are rejected so a client sending a different shape gets a 400
/// instead of a silently coerced record.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Body of `POST /login`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub message: String,
    /// Compact HS256 JWT carrying `email` and `exp`
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

// ============= Authentication Types =============

/// Claims carried by an issued token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    /// Expiry as unix seconds
    pub exp: i64,
}

// ============= Error Types =============

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed or incomplete payload. The message is shown to the client.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Email already exists")]
    DuplicateEmail,

    /// Unknown email or wrong password; the two cases are deliberately merged.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Hash error: {0}")]
    Hash(String),

    #[error("Signing error: {0}")]
    Signing(String),

    #[error("Token error: {0}")]
    Token(String),
}

impl AppError {
    /// HTTP status for this error.
    pub fn status(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;

        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::DuplicateEmail => StatusCode::CONFLICT,
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::Storage(_)
            | AppError::Hash(_)
            | AppError::Signing(_)
            | AppError::Token(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to return to the client. Internal faults never expose
    /// their detail.
    pub fn public_message(&self) -> String {
        match self {
            AppError::InvalidInput(msg) => msg.clone(),
            AppError::DuplicateEmail => "Email already exists".to_string(),
            AppError::InvalidCredentials => "Invalid credentials".to_string(),
            AppError::Storage(_) => "Internal server error".to_string(),
            AppError::Hash(_) => "Failed to hash password".to_string(),
            AppError::Signing(_) | AppError::Token(_) => "Failed to generate token".to_string(),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed with internal error");
        }

        let body = ErrorResponse {
            error: self.public_message(),
        };

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::InvalidInput("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::DuplicateEmail.status(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::InvalidCredentials.status(),
            StatusCode::UNAUTHORIZED
        );
        for err in [
            AppError::Storage("db down".into()),
            AppError::Hash("rng".into()),
            AppError::Signing("no key".into()),
            AppError::Token("no key".into()),
        ] {
            assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[test]
    fn test_internal_detail_is_not_exposed() {
        let err = AppError::Storage("connection refused at 10.0.0.3:5432".into());
        let message = err.public_message();

        assert!(!message.contains("10.0.0.3"));
        assert_eq!(message, "Internal server error");
    }

    #[test]
    fn test_invalid_input_message_is_public() {
        let err = AppError::InvalidInput("All fields are required".into());
        assert_eq!(err.public_message(), "All fields are required");
    }

    #[test]
    fn test_into_response_status() {
        let response = AppError::DuplicateEmail.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let response = AppError::Token("boom".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_register_request_rejects_unknown_fields() {
        let result: std::result::Result<RegisterRequest, _> = serde_json::from_str(
            r#"{"name":"A","email":"a@x.com","password":"p","role":"admin"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_login_request_rejects_wrong_types() {
        let result: std::result::Result<LoginRequest, _> =
            serde_json::from_str(r#"{"email":"a@x.com","password":12345}"#);
        assert!(result.is_err());
    }
}
