//! Failure taxonomy for token and registration calls.
//!
//! ERROR HANDLING
//! ==============
//! Every variant is raised before the session store mutates anything, so
//! callers can surface the error without any cleanup.

/// Errors returned by login, registration, and authorized requests.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Transport-level failure: connect, TLS, timeout, or body read.
    #[error("network failure: {0}")]
    Network(#[from] reqwest::Error),
    /// The server answered with a non-success status.
    #[error("request rejected with status {status}: {}", .detail.as_deref().unwrap_or("no detail"))]
    Rejected { status: u16, detail: Option<String> },
    /// The server answered successfully but the payload was unusable.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    /// The token could not be written to durable storage.
    #[error("token storage failed: {0}")]
    Storage(String),
}

impl AuthError {
    /// HTTP status for [`AuthError::Rejected`], `None` otherwise.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}
