//! # chat-client
//!
//! Session and routing core for the chat client.
//!
//! A [`state::session::SessionStore`] signs users in against the backend's
//! token service and keeps the bearer token in durable storage. A
//! [`router::Router`] guards the protected chat view behind that session.
//! [`app::App`] wires the two together without any global state.

pub mod app;
pub mod config;
pub mod net;
pub mod router;
pub mod state;

pub use app::App;
pub use config::{ClientConfig, ConfigError};
pub use net::error::AuthError;
pub use router::{Navigation, Route, Router, View};
pub use state::session::{Session, SessionStore};
