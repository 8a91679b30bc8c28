//! Wire DTOs for the auth endpoints.
//!
//! DESIGN
//! ======
//! Field names mirror the backend's form and JSON schema exactly; optional
//! fields default so older servers that omit them still parse.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use reqwest::header::HeaderValue;
use serde::{Deserialize, Serialize};

use super::error::AuthError;

/// Username/password pair sent as an `application/x-www-form-urlencoded` body.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    password: String,
}

impl Credentials {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self { username: username.into(), password: password.into() }
    }

    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Success body of `POST /auth/token`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Identity record for the signed-in user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub disabled: Option<bool>,
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

/// Parse a token endpoint body, rejecting a missing, empty, or unsendable `access_token`.
///
/// `token_type` is informational only; any value is accepted.
///
/// # Errors
///
/// Returns [`AuthError::MalformedResponse`] when the body is not a usable token payload.
pub fn parse_token_response(body: &str) -> Result<TokenResponse, AuthError> {
    let parsed: TokenResponse =
        serde_json::from_str(body).map_err(|e| AuthError::MalformedResponse(e.to_string()))?;
    if parsed.access_token.trim().is_empty() {
        return Err(AuthError::MalformedResponse("empty access_token".to_owned()));
    }
    if !is_sendable_token(&parsed.access_token) {
        return Err(AuthError::MalformedResponse("access_token is not valid header text".to_owned()));
    }
    Ok(parsed)
}

/// True when `token` is non-empty and `Bearer <token>` is a valid header value.
#[must_use]
pub fn is_sendable_token(token: &str) -> bool {
    !token.is_empty() && HeaderValue::from_str(&format!("Bearer {token}")).is_ok()
}

/// Extract the `detail` message from an error body, if any.
#[must_use]
pub fn parse_error_detail(body: &str) -> Option<String> {
    let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) else {
        return None;
    };
    match parsed.detail {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}
