use gateway::{SessionExit, SessionGuard};

use super::*;

fn temp_store() -> FileStore {
    let dir = std::env::temp_dir().join(format!("vax-cli-{}", uuid::Uuid::new_v4()));
    FileStore::new(dir.join("session.json"))
}

fn session() -> Session {
    Session { token: "acc".to_owned(), refresh_token: Some("ref".to_owned()), username: "admin".to_owned() }
}

#[test]
fn missing_file_is_signed_out() {
    assert_eq!(temp_store().load().unwrap(), None);
}

#[test]
fn save_then_load_restores_session() {
    let store = temp_store();
    store.save(&session()).unwrap();
    assert_eq!(store.load().unwrap(), Some(session()));

    let guard = SessionGuard::restore(store.clone());
    assert!(guard.is_authenticated());
    assert_eq!(guard.username(), Some("admin"));
}

#[test]
fn ending_session_removes_file() {
    let store = temp_store();
    store.save(&session()).unwrap();
    let mut guard = SessionGuard::restore(store.clone());
    assert!(guard.end(SessionExit::Expired));
    assert!(!store.path().exists());
    store.clear().unwrap();
}

#[test]
fn corrupt_file_restores_signed_out() {
    let store = temp_store();
    fs::create_dir_all(store.path().parent().unwrap()).unwrap();
    fs::write(store.path(), b"not json").unwrap();
    assert!(matches!(store.load(), Err(StoreError::Read(_))));
    assert!(!SessionGuard::restore(store).is_authenticated());
}
