//! REST helpers for the token service.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session store is the only caller of the auth endpoints. Authorized
//! requests take their `Authorization` header as an explicit argument; the
//! underlying `reqwest::Client` never carries a default credential.
//!
//! ERROR HANDLING
//! ==============
//! Non-success statuses become [`AuthError::Rejected`] with the server's
//! `detail` message when one is present.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use reqwest::header::{AUTHORIZATION, HeaderValue};
use reqwest::{Method, RequestBuilder, Response};

use super::error::AuthError;
use super::types::{Credentials, TokenResponse, parse_error_detail, parse_token_response};
use crate::config::ClientConfig;

pub const TOKEN_PATH: &str = "/auth/token";
pub const REGISTER_PATH: &str = "/auth/register";

/// HTTP client bound to one backend origin.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl ApiClient {
    /// Build a client with the configured timeouts.
    ///
    /// # Errors
    ///
    /// Returns the builder error if the TLS backend cannot be initialized.
    pub fn new(config: ClientConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(config.timeouts.request())
            .connect_timeout(config.timeouts.connect())
            .build()?;
        Ok(Self { http, config })
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// `POST /auth/token` with form-encoded credentials.
    ///
    /// # Errors
    ///
    /// Network failure, non-success status, or a body without `access_token`.
    pub async fn request_token(&self, credentials: &Credentials) -> Result<TokenResponse, AuthError> {
        let resp = self
            .request(Method::POST, TOKEN_PATH, None)
            .form(credentials)
            .send()
            .await?;
        let resp = ensure_success(resp).await?;
        let body = resp.text().await?;
        parse_token_response(&body)
    }

    /// `POST /auth/register` with form-encoded credentials.
    ///
    /// # Errors
    ///
    /// Network failure or non-success status. The response body is ignored.
    pub async fn register(&self, credentials: &Credentials) -> Result<(), AuthError> {
        let resp = self
            .request(Method::POST, REGISTER_PATH, None)
            .form(credentials)
            .send()
            .await?;
        ensure_success(resp).await?;
        Ok(())
    }

    /// Start a request to `path`, attaching `authorization` when given.
    #[must_use]
    pub fn request(&self, method: Method, path: &str, authorization: Option<HeaderValue>) -> RequestBuilder {
        let builder = self.http.request(method, self.config.endpoint(path));
        match authorization {
            Some(value) => builder.header(AUTHORIZATION, value),
            None => builder,
        }
    }
}

/// Build the `Bearer <token>` header value for `token`.
///
/// Returns `None` for empty tokens or tokens that are not valid header text.
#[must_use]
pub fn bearer_header(token: &str) -> Option<HeaderValue> {
    if token.is_empty() {
        return None;
    }
    let Ok(mut value) = HeaderValue::from_str(&format!("Bearer {token}")) else {
        return None;
    };
    value.set_sensitive(true);
    Some(value)
}

/// Map non-success responses to [`AuthError::Rejected`].
///
/// # Errors
///
/// [`AuthError::Rejected`] for any non-2xx status.
pub async fn ensure_success(resp: Response) -> Result<Response, AuthError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    tracing::debug!(status = status.as_u16(), "auth endpoint returned error status");
    Err(AuthError::Rejected { status: status.as_u16(), detail: parse_error_detail(&body) })
}
