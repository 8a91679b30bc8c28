//! Client-side session state.
//!
//! DESIGN
//! ======
//! `session` owns the token and identity; `storage` is the durable key-value
//! layer the token survives restarts in.

pub mod session;
pub mod storage;
