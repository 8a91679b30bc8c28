use super::*;
use crate::router::View;
use crate::state::session::TOKEN_KEY;
use crate::state::storage::{KeyValueStore, MemoryStore};

fn app_with(storage: MemoryStore) -> App {
    let api = ApiClient::new(ClientConfig::new("http://127.0.0.1:9").unwrap()).unwrap();
    App::new(SessionStore::new(api, Box::new(storage)), Router::default())
}

#[test]
fn start_without_session_lands_on_login() {
    let mut app = app_with(MemoryStore::new());
    let nav = app.start();
    assert!(nav.is_redirect());
    assert_eq!(app.router().current().map(|r| r.view), Some(View::Login));
}

#[test]
fn start_with_persisted_token_lands_on_chat() {
    let mut app = app_with(MemoryStore::with_entry(TOKEN_KEY, "tok123"));
    let nav = app.start();
    assert_eq!(nav.route().map(|r| r.view), Some(View::Chat));
    assert!(!nav.is_redirect());
}

#[test]
fn logout_navigates_to_login_and_blocks_chat() {
    let mut app = app_with(MemoryStore::with_entry(TOKEN_KEY, "tok123"));
    app.start();
    let nav = app.logout();
    assert_eq!(nav, Navigation::Rendered(*app.router().resolve(LOGIN_PATH).unwrap()));
    assert!(app.store().storage().get(TOKEN_KEY).is_none());
    assert!(app.navigate("/").is_redirect());
}

#[tokio::test]
async fn failed_login_does_not_navigate() {
    let mut app = app_with(MemoryStore::new());
    app.start();
    assert!(app.login("alice", "secret").await.is_err());
    assert_eq!(app.router().history(), ["/login"]);
}

#[test]
fn from_config_uses_file_storage_in_state_dir() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join(TOKEN_KEY), "persisted").unwrap();
    let mut config = ClientConfig::new("http://127.0.0.1:9").unwrap();
    config.state_dir = tmp.path().to_path_buf();
    let app = App::from_config(config).unwrap();
    assert_eq!(app.store().token(), Some("persisted"));
}
