use crate::types::{AppError, Claims, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

/// Fixed lifetime of an issued token.
pub const TOKEN_TTL_HOURS: i64 = 72;

/// Mints HS256-signed bearer tokens.
///
/// The secret is injected once at construction; an empty secret is accepted
/// here but every `issue` call then fails with `AppError::Signing`.
#[derive(Clone)]
pub struct TokenIssuer {
    jwt_secret: String,
}

impl TokenIssuer {
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
        }
    }

    /// Builds `{email, exp = now + 72h}` and signs it.
    pub fn issue(&self, email: &str) -> Result<String> {
        if self.jwt_secret.is_empty() {
            return Err(AppError::Signing("JWT secret is not configured".to_string()));
        }

        let claims = Claims {
            email: email.to_string(),
            exp: (Utc::now() + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AppError::Signing(format!("Failed to sign token: {}", e)))
    }
}
