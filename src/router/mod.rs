//! Static route table and guarded navigation.
//!
//! DESIGN
//! ======
//! Routes are defined once at startup and never change. Every navigation runs
//! [`guard::allow`] against the caller-supplied auth flag and settles in a
//! single hop: the login route is validated to be public, so a redirect to it
//! can never be redirected again.


pub mod guard;

use guard::Guard;

pub const ROOT_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";

/// Rendered paths kept in [`Router::history`]; older entries are dropped.
pub const HISTORY_LIMIT: usize = 64;

/// View rendered for a route.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum View {
    Login,
    Chat,
}

/// A navigable destination.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Route {
    pub path: &'static str,
    pub name: &'static str,
    pub view: View,
    pub requires_auth: bool,
}

/// The application's route table: a public login page and the protected chat.
#[must_use]
pub fn default_routes() -> Vec<Route> {
    vec![
        Route { path: LOGIN_PATH, name: "Login", view: View::Login, requires_auth: false },
        Route { path: ROOT_PATH, name: "Chat", view: View::Chat, requires_auth: true },
    ]
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("duplicate route path `{0}`")]
    DuplicatePath(&'static str),
    #[error("route table has no `/login` route")]
    MissingLogin,
    #[error("the `/login` route must not require auth")]
    ProtectedLogin,
}

/// Result of one navigation attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Navigation {
    /// The requested route was rendered.
    Rendered(Route),
    /// The guard sent the navigation to `route` instead of `requested`.
    Redirected { requested: String, route: Route },
    /// No route matches; the current location is unchanged.
    NotFound(String),
}

impl Navigation {
    /// Route that ended up rendered, if any.
    #[must_use]
    pub fn route(&self) -> Option<&Route> {
        match self {
            Self::Rendered(route) | Self::Redirected { route, .. } => Some(route),
            Self::NotFound(_) => None,
        }
    }

    #[must_use]
    pub fn is_redirect(&self) -> bool {
        matches!(self, Self::Redirected { .. })
    }
}

#[derive(Debug, Clone)]
pub struct Router {
    routes: Vec<Route>,
    current: Option<Route>,
    history: Vec<&'static str>,
}

impl Default for Router {
    fn default() -> Self {
        Self { routes: default_routes(), current: None, history: Vec::new() }
    }
}

impl Router {
    /// Build a router over `routes`.
    ///
    /// # Errors
    ///
    /// Duplicate paths, or a missing or protected login route.
    pub fn new(routes: Vec<Route>) -> Result<Self, RouteError> {
        for (i, route) in routes.iter().enumerate() {
            if routes[..i].iter().any(|r| r.path == route.path) {
                return Err(RouteError::DuplicatePath(route.path));
            }
        }
        match routes.iter().find(|r| r.path == LOGIN_PATH) {
            None => return Err(RouteError::MissingLogin),
            Some(login) if login.requires_auth => return Err(RouteError::ProtectedLogin),
            Some(_) => {}
        }
        Ok(Self { routes, current: None, history: Vec::new() })
    }

    #[must_use]
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Route matching `path` after normalization.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<&Route> {
        let path = normalize_path(path);
        self.routes.iter().find(|r| r.path == path)
    }

    /// Currently rendered route, `None` before the first navigation.
    #[must_use]
    pub fn current(&self) -> Option<&Route> {
        self.current.as_ref()
    }

    /// Most recent rendered paths (at most [`HISTORY_LIMIT`]), oldest first.
    #[must_use]
    pub fn history(&self) -> &[&'static str] {
        &self.history
    }

    /// Navigate to `path`, consulting the guard with `is_authenticated`.
    pub fn navigate(&mut self, path: &str, is_authenticated: bool) -> Navigation {
        let Some(target) = self.resolve(path).copied() else {
            tracing::debug!(%path, "no route matches");
            return Navigation::NotFound(path.to_owned());
        };

        match guard::allow(&target, is_authenticated) {
            Guard::Proceed => {
                self.render(target);
                Navigation::Rendered(target)
            }
            Guard::RedirectTo(to) => {
                // Validated in `new`: the redirect target exists and is public.
                let Some(route) = self.resolve(to).copied() else {
                    return Navigation::NotFound(to.to_owned());
                };
                tracing::debug!(from = %target.path, to = %route.path, "guard redirected navigation");
                self.render(route);
                Navigation::Redirected { requested: target.path.to_owned(), route }
            }
        }
    }

    fn render(&mut self, route: Route) {
        self.current = Some(route);
        if self.history.len() == HISTORY_LIMIT {
            self.history.remove(0);
        }
        self.history.push(route.path);
    }
}

/// Strip query and fragment, and any trailing slash except on the root.
fn normalize_path(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let trimmed = path[..end].trim_end_matches('/');
    if trimmed.is_empty() { ROOT_PATH } else { trimmed }
}
