use super::*;

// =============================================================================
// MemoryStore
// =============================================================================

#[test]
fn memory_store_set_get_remove() {
    let mut store = MemoryStore::new();
    assert_eq!(store.get("token"), None);
    store.set("token", "abc").unwrap();
    assert_eq!(store.get("token").as_deref(), Some("abc"));
    store.remove("token").unwrap();
    assert_eq!(store.get("token"), None);
}

#[test]
fn memory_store_remove_absent_key_ok() {
    let mut store = MemoryStore::new();
    assert!(store.remove("token").is_ok());
}

#[test]
fn memory_store_with_entry_is_seeded() {
    let store = MemoryStore::with_entry("token", "persisted");
    assert_eq!(store.get("token").as_deref(), Some("persisted"));
}

// =============================================================================
// FileStore
// =============================================================================

#[test]
fn file_store_creates_dir_on_first_write() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("nested").join("state");
    let mut store = FileStore::new(&dir);
    assert_eq!(store.get("token"), None);

    store.set("token", "abc").unwrap();
    assert!(dir.join("token").is_file());
    assert_eq!(std::fs::read_to_string(dir.join("token")).unwrap(), "abc");
    assert_eq!(store.get("token").as_deref(), Some("abc"));
}

#[test]
fn file_store_value_survives_new_instance() {
    let tmp = tempfile::tempdir().unwrap();
    FileStore::new(tmp.path()).set("token", "abc").unwrap();
    let reopened = FileStore::new(tmp.path());
    assert_eq!(reopened.get("token").as_deref(), Some("abc"));
}

#[test]
fn file_store_overwrite_replaces_value() {
    let tmp = tempfile::tempdir().unwrap();
    let mut store = FileStore::new(tmp.path());
    store.set("token", "first").unwrap();
    store.set("token", "second").unwrap();
    assert_eq!(store.get("token").as_deref(), Some("second"));
    assert!(!tmp.path().join(".token.tmp").exists());
}

#[test]
fn file_store_remove_deletes_file() {
    let tmp = tempfile::tempdir().unwrap();
    let mut store = FileStore::new(tmp.path());
    store.set("token", "abc").unwrap();
    store.remove("token").unwrap();
    assert!(!tmp.path().join("token").exists());
    assert_eq!(store.get("token"), None);
}

#[test]
fn file_store_remove_absent_key_ok() {
    let tmp = tempfile::tempdir().unwrap();
    let mut store = FileStore::new(tmp.path().join("missing"));
    assert!(store.remove("token").is_ok());
}

#[test]
fn file_store_rejects_path_like_keys() {
    let tmp = tempfile::tempdir().unwrap();
    let mut store = FileStore::new(tmp.path());
    assert!(matches!(store.set("../token", "x"), Err(StorageError::InvalidKey(_))));
    assert!(matches!(store.set("", "x"), Err(StorageError::InvalidKey(_))));
    assert_eq!(store.get("a/b"), None);
}

#[cfg(unix)]
#[test]
fn file_store_entries_are_owner_only() {
    use std::os::unix::fs::PermissionsExt;
    let tmp = tempfile::tempdir().unwrap();
    let mut store = FileStore::new(tmp.path());
    store.set("token", "abc").unwrap();
    let mode = std::fs::metadata(tmp.path().join("token")).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}
