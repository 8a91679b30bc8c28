//! Application shell wiring the session store into the router.
//!
//! DESIGN
//! ======
//! `App` owns both halves explicitly. The router only ever sees the store's
//! auth flag, read at the moment of each navigation. Session changes finish
//! (token persisted, memory updated) before the follow-up navigation runs.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use crate::config::ClientConfig;
use crate::net::api::ApiClient;
use crate::net::error::AuthError;
use crate::router::{LOGIN_PATH, Navigation, ROOT_PATH, Router};
use crate::state::session::SessionStore;
use crate::state::storage::FileStore;

#[derive(Debug)]
pub struct App {
    store: SessionStore,
    router: Router,
}

impl App {
    #[must_use]
    pub fn new(store: SessionStore, router: Router) -> Self {
        Self { store, router }
    }

    /// Build the app with file-backed storage under `config.state_dir`.
    ///
    /// # Errors
    ///
    /// Returns the HTTP client builder error.
    pub fn from_config(config: ClientConfig) -> Result<Self, reqwest::Error> {
        let storage = FileStore::new(&config.state_dir);
        let api = ApiClient::new(config)?;
        Ok(Self::new(SessionStore::new(api, Box::new(storage)), Router::default()))
    }

    #[must_use]
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut SessionStore {
        &mut self.store
    }

    #[must_use]
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Initial navigation to the root, redirected to login without a session.
    pub fn start(&mut self) -> Navigation {
        self.navigate(ROOT_PATH)
    }

    pub fn navigate(&mut self, path: &str) -> Navigation {
        self.router.navigate(path, self.store.is_authenticated())
    }

    /// Sign in, then navigate to the root.
    ///
    /// # Errors
    ///
    /// Propagates the store's [`AuthError`]; no navigation happens on failure.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<Navigation, AuthError> {
        self.store.login(username, password).await?;
        Ok(self.navigate(ROOT_PATH))
    }

    /// Register and sign in, then navigate to the root.
    ///
    /// # Errors
    ///
    /// Propagates the store's [`AuthError`]; no navigation happens on failure.
    pub async fn register(&mut self, username: &str, password: &str) -> Result<Navigation, AuthError> {
        self.store.register(username, password).await?;
        Ok(self.navigate(ROOT_PATH))
    }

    /// Sign out, then navigate to the login page.
    pub fn logout(&mut self) -> Navigation {
        self.store.logout();
        self.navigate(LOGIN_PATH)
    }
}
