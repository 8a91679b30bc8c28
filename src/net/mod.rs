//! Networking modules for the token service and authorized requests.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` performs the HTTP calls, `types` defines the wire schema, and
//! `error` is the failure taxonomy shared with the session store.

pub mod api;
pub mod error;
pub mod types;
