//! Navigation guard.
//!
//! A pure decision over a destination route and the session's auth flag. The
//! router acts on the result; the guard never reads or touches the token.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use super::{LOGIN_PATH, Route};

/// Outcome of running the guard for one navigation attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Guard {
    Proceed,
    RedirectTo(&'static str),
}

/// Redirect to `/login` when `route` is protected and the session is not authenticated.
#[must_use]
pub fn allow(route: &Route, is_authenticated: bool) -> Guard {
    if route.requires_auth && !is_authenticated {
        Guard::RedirectTo(LOGIN_PATH)
    } else {
        Guard::Proceed
    }
}
