use crate::{
    types::{
        AppError, ErrorResponse, LoginRequest, LoginResponse, MessageResponse, RegisterRequest,
        Result,
    },
    AppState,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

type ObjectBody = std::result::Result<Json<Map<String, Value>>, JsonRejection>;

fn invalid_input() -> AppError {
    AppError::InvalidInput("Invalid input".to_string())
}

/// Decodes a request body that must be a JSON object.
///
/// Derived struct deserializers also accept sequences, so the body is first
/// read as a map. Arrays, scalars and anything that does not then fit `T`
/// are a 400 with the same shape as every other error.
fn decode_object<T: DeserializeOwned>(body: ObjectBody) -> Result<T> {
    let Json(object) = body.map_err(|rejection| {
        tracing::debug!(%rejection, "rejected request body");
        invalid_input()
    })?;

    serde_json::from_value(Value::Object(object)).map_err(|e| {
        tracing::debug!(error = %e, "request body does not match the expected fields");
        invalid_input()
    })
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = MessageResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 409, description = "Email already exists", body = ErrorResponse),
        (status = 500, description = "Hashing or storage failure", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn register(
    State(state): State<AppState>,
    body: ObjectBody,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    let payload: RegisterRequest = decode_object(body)?;

    state.flows.register(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User registered successfully".to_string(),
        }),
    ))
}

/// Login with email and password
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 500, description = "Token generation failure", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    body: ObjectBody,
) -> Result<Json<LoginResponse>> {
    let payload: LoginRequest = decode_object(body)?;

    let token = state.flows.login(payload).await?;

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        token,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> ObjectBody {
        match value {
            Value::Object(map) => Ok(Json(map)),
            other => panic!("not an object: {other}"),
        }
    }

    #[test]
    fn test_decode_object_accepts_exact_fields() {
        let request: LoginRequest =
            decode_object(object(json!({"email": "a@x.com", "password": "p"}))).unwrap();

        assert_eq!(request.email, "a@x.com");
        assert_eq!(request.password, "p");
    }

    #[test]
    fn test_decode_object_rejects_missing_and_extra_fields() {
        let missing = decode_object::<RegisterRequest>(object(json!({"name": "A"})));
        let extra = decode_object::<LoginRequest>(object(
            json!({"email": "a@x.com", "password": "p", "admin": true}),
        ));

        assert!(matches!(missing, Err(AppError::InvalidInput(msg)) if msg == "Invalid input"));
        assert!(matches!(extra, Err(AppError::InvalidInput(_))));
    }
}
