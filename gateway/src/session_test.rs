use std::cell::Cell;

use super::*;

fn session(username: &str) -> Session {
    Session { token: format!("access-{username}"), refresh_token: Some("refresh".to_owned()), username: username.to_owned() }
}

/// Store that counts writes and can be told to fail.
#[derive(Default)]
struct CountingStore {
    inner: MemoryStore,
    saves: Cell<usize>,
    clears: Cell<usize>,
    fail_save: bool,
    fail_load: bool,
}

impl TokenStore for CountingStore {
    fn load(&self) -> Result<Option<Session>, StoreError> {
        if self.fail_load {
            return Err(StoreError::Read("corrupt".to_owned()));
        }
        self.inner.load()
    }

    fn save(&self, session: &Session) -> Result<(), StoreError> {
        self.saves.set(self.saves.get() + 1);
        if self.fail_save {
            return Err(StoreError::Write("quota exceeded".to_owned()));
        }
        self.inner.save(session)
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.clears.set(self.clears.get() + 1);
        self.inner.clear()
    }
}

#[test]
fn restore_from_empty_store_is_signed_out() {
    let guard = SessionGuard::restore(MemoryStore::new());
    assert!(!guard.is_authenticated());
    assert_eq!(guard.bearer_token(), None);
}

#[test]
fn restore_picks_up_persisted_session() {
    let guard = SessionGuard::restore(MemoryStore::with_session(session("admin")));
    assert!(guard.is_authenticated());
    assert_eq!(guard.username(), Some("admin"));
    assert_eq!(guard.bearer_token(), Some("access-admin"));
}

#[test]
fn restore_read_failure_starts_signed_out() {
    let store = CountingStore { fail_load: true, ..CountingStore::default() };
    let guard = SessionGuard::restore(store);
    assert!(!guard.is_authenticated());
}

#[test]
fn establish_persists_every_field() {
    let store = MemoryStore::new();
    let mut guard = SessionGuard::restore(store.clone());
    guard.establish(session("nurse")).unwrap();
    assert!(guard.is_authenticated());
    assert_eq!(store.snapshot(), Some(session("nurse")));
}

#[test]
fn establish_failure_leaves_guard_signed_out_and_wiped() {
    let store = CountingStore { fail_save: true, ..CountingStore::default() };
    let mut guard = SessionGuard::restore(store);
    let err = guard.establish(session("nurse")).unwrap_err();
    assert_eq!(err, StoreError::Write("quota exceeded".to_owned()));
    assert!(!guard.is_authenticated());
    assert_eq!(guard.store().clears.get(), 1);
}

#[test]
fn logout_clears_store_and_reports_transition() {
    let store = MemoryStore::with_session(session("admin"));
    let mut guard = SessionGuard::restore(store.clone());
    assert!(guard.end(SessionExit::Logout));
    assert!(!guard.is_authenticated());
    assert_eq!(store.snapshot(), None);
}

#[test]
fn expired_exit_happens_exactly_once() {
    let store = CountingStore::default();
    store.inner.save(&session("admin")).unwrap();
    let mut guard = SessionGuard::restore(store);

    assert!(guard.end(SessionExit::Expired));
    assert!(!guard.end(SessionExit::Expired));
    assert!(!guard.end(SessionExit::Expired));
    assert_eq!(guard.store().clears.get(), 1);
}

#[test]
fn expire_only_ends_the_session_holding_that_token() {
    let store = CountingStore::default();
    store.inner.save(&session("admin")).unwrap();
    let mut guard = SessionGuard::restore(store);

    assert!(!guard.expire("someone-else"));
    assert!(guard.is_authenticated());
    assert_eq!(guard.store().clears.get(), 0);

    assert!(guard.expire("access-admin"));
    assert!(!guard.expire("access-admin"));
    assert_eq!(guard.store().clears.get(), 1);
}

#[test]
fn rejected_login_clears_stale_storage_even_when_signed_out() {
    let store = CountingStore::default();
    let mut guard = SessionGuard::restore(store);
    guard.store().inner.save(&session("stale")).unwrap();

    assert!(!guard.end(SessionExit::LoginRejected));
    assert_eq!(guard.store().clears.get(), 1);
    assert_eq!(guard.store().inner.snapshot(), None);
}

#[test]
fn refcell_handle_drives_the_guard() {
    let handle = RefCell::new(SessionGuard::restore(MemoryStore::new()));
    assert_eq!(handle.bearer_token(), None);
    handle.establish(session("admin")).unwrap();
    assert_eq!(handle.bearer_token().as_deref(), Some("access-admin"));
    assert!(SessionHandle::end(&handle, SessionExit::Expired));
    assert!(!SessionHandle::end(&handle, SessionExit::Expired));
}

#[test]
fn debug_output_redacts_tokens() {
    let rendered = format!("{:?}", session("admin"));
    assert!(!rendered.contains("access-admin"));
    assert!(rendered.contains("admin"));
}

#[test]
fn session_from_tokens_keeps_optional_refresh() {
    let tokens = TokenPair { access: "a".to_owned(), refresh: None };
    let built = Session::from_tokens("admin", tokens);
    assert_eq!(built.token, "a");
    assert_eq!(built.refresh_token, None);
    assert_eq!(built.username, "admin");
}
