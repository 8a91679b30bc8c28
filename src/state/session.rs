//! Auth-session state for the current user.
//!
//! SYSTEM CONTEXT
//! ==============
//! The router guard reads [`SessionStore::is_authenticated`]; the app shell
//! calls login/logout/register and navigates once they return. This store is
//! the only writer of the persisted `token` key.
//!
//! ERROR HANDLING
//! ==============
//! Login and register log failures where they happen and hand the same error
//! back to the caller. Every fallible step runs before the session is
//! touched, so a failed call leaves the previous state intact.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use reqwest::header::HeaderValue;
use reqwest::{Method, Response};

use super::storage::KeyValueStore;
use crate::net::api::{ApiClient, bearer_header, ensure_success};
use crate::net::error::AuthError;
use crate::net::types::{Credentials, User, is_sendable_token};

/// Storage key holding the raw token string.
pub const TOKEN_KEY: &str = "token";

/// In-memory session: the bearer token and, once fetched, the user identity.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
    user: Option<User>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("user", &self.user)
            .finish()
    }
}

impl Session {
    /// Session holding `token`. Tokens that cannot be sent as a bearer header
    /// (empty, control characters, trailing newline) count as no token.
    #[must_use]
    pub fn with_token(token: Option<String>) -> Self {
        Self { token: token.filter(|t| is_sendable_token(t)), user: None }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }
}

/// Owns the [`Session`], the durable store, and the API client.
pub struct SessionStore {
    session: Session,
    api: ApiClient,
    storage: Box<dyn KeyValueStore>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("authenticated", &self.session.is_authenticated())
            .field("user", &self.session.user)
            .field("base_url", &self.api.config().base_url)
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Create the store, restoring the token persisted by a previous run.
    #[must_use]
    pub fn new(api: ApiClient, storage: Box<dyn KeyValueStore>) -> Self {
        let persisted = storage.get(TOKEN_KEY);
        let session = Session::with_token(persisted.clone());
        if session.is_authenticated() {
            tracing::debug!("restored persisted session token");
        } else if persisted.is_some_and(|t| !t.is_empty()) {
            tracing::warn!("ignoring persisted token that is not valid header text");
        }
        Self { session, api, storage }
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.session.token()
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.session.user()
    }

    /// Record an identity fetched elsewhere. Cleared again by [`Self::logout`].
    pub fn set_user(&mut self, user: User) {
        self.session.user = Some(user);
    }

    #[must_use]
    pub fn storage(&self) -> &dyn KeyValueStore {
        self.storage.as_ref()
    }

    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// `Authorization` header for the current session, computed at call time.
    #[must_use]
    pub fn authorization(&self) -> Option<HeaderValue> {
        self.session.token().and_then(bearer_header)
    }

    /// Exchange credentials for a token and persist it.
    ///
    /// The token is written to durable storage before the in-memory session
    /// changes, so anything observing the session afterwards also sees it on
    /// disk.
    ///
    /// # Errors
    ///
    /// Network failure, rejected credentials, a malformed token payload, or a
    /// storage write failure. The session is unchanged in every case.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<(), AuthError> {
        let credentials = Credentials::new(username, password);
        let token = match self.api.request_token(&credentials).await {
            Ok(resp) => resp.access_token,
            Err(e) => {
                tracing::error!(error = %e, %username, "login failed");
                return Err(e);
            }
        };

        if let Err(e) = self.storage.set(TOKEN_KEY, &token) {
            let err = AuthError::Storage(e.to_string());
            tracing::error!(error = %err, %username, "login failed");
            return Err(err);
        }

        self.session = Session::with_token(Some(token));
        tracing::info!(%username, "login succeeded");
        Ok(())
    }

    /// Drop the session locally. No network call; never fails.
    pub fn logout(&mut self) {
        self.session = Session::default();
        if let Err(e) = self.storage.remove(TOKEN_KEY) {
            tracing::warn!(error = %e, "failed to remove persisted token");
        }
        tracing::info!("logged out");
    }

    /// Create an account, then sign in with the same credentials.
    ///
    /// # Errors
    ///
    /// Any registration failure (login is not attempted), or any error from
    /// the follow-up [`Self::login`].
    pub async fn register(&mut self, username: &str, password: &str) -> Result<(), AuthError> {
        let credentials = Credentials::new(username, password);
        if let Err(e) = self.api.register(&credentials).await {
            tracing::error!(error = %e, %username, "registration failed");
            return Err(e);
        }
        tracing::info!(%username, "registration succeeded");
        self.login(username, password).await
    }

    /// Send a request to `path` with the session's bearer header, if any.
    ///
    /// # Errors
    ///
    /// Network failure or a non-success status.
    pub async fn send_authorized(&self, method: Method, path: &str) -> Result<Response, AuthError> {
        let result = match self.api.request(method, path, self.authorization()).send().await {
            Ok(resp) => ensure_success(resp).await,
            Err(e) => Err(AuthError::from(e)),
        };
        if let Err(e) = &result {
            tracing::error!(error = %e, %path, "authorized request failed");
        }
        result
    }
}
