//! Bearer-token authentication.
//!
//! Tokens are HS256 JWTs whose `sub` claim carries the user UUID. This
//! module is the identity boundary the upload handlers consume; issuing
//! real user tokens is the job of an upstream identity service that
//! shares the secret.

use std::time::Duration;

use axum::http::{header, HeaderMap};
use clipdock_core::AppError;
use jsonwebtoken::{
    decode, encode, get_current_timestamp, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const TOKEN_ISSUER: &str = "clipdock";

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    iss: String,
    sub: String,
    exp: u64,
}

/// Extract the bearer token from request headers.
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing authorization header".to_string()))?;

    let token = value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            AppError::Unauthorized("Authorization header must be a bearer token".to_string())
        })?;

    Ok(token)
}

/// Validate a token signature and expiry, returning the user ID.
pub fn validate_token(token: &str, secret: &str) -> Result<Uuid, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[TOKEN_ISSUER]);

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))?;

    Uuid::parse_str(&data.claims.sub)
        .map_err(|_| AppError::Unauthorized("Invalid token subject".to_string()))
}

/// Issue a token for `user_id`, valid for `expires_in`.
pub fn issue_token(user_id: Uuid, secret: &str, expires_in: Duration) -> Result<String, AppError> {
    let claims = Claims {
        iss: TOKEN_ISSUER.to_string(),
        sub: user_id.to_string(),
        exp: get_current_timestamp() + expires_in.as_secs(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("failed to sign token: {}", e)))
}

/// Authenticate a request: extract the bearer token and validate it.
pub fn authenticate(headers: &HeaderMap, secret: &str) -> Result<Uuid, AppError> {
    let token = extract_bearer_token(headers)?;
    validate_token(token, secret)
}
