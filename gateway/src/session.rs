//! Session lifecycle: the one owner of authentication state.
//!
//! SYSTEM CONTEXT
//! ==============
//! A [`SessionGuard`] is restored from durable storage once at startup and is
//! mutated only by three transitions: establishing a session after login, and
//! ending it on logout, rejected login, or an expired authorization. Route
//! guards read it; the API client reads the bearer token from it.
//!
//! DESIGN
//! ======
//! Every exit from the authenticated state clears all persisted fields. The
//! expired exit is idempotent: once signed out, further 401s neither touch
//! storage nor report a transition, so views never see a second redirect.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

/// Client-held proof of authentication.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Access token sent as `Authorization: Bearer <token>`.
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    pub username: String,
}

impl Session {
    #[must_use]
    pub fn from_tokens(username: impl Into<String>, tokens: TokenPair) -> Self {
        Self { token: tokens.access, refresh_token: tokens.refresh, username: username.into() }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
            .field("username", &self.username)
            .finish()
    }
}

/// Body of a successful `POST /auth/login/`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct TokenPair {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("session storage unavailable")]
    Unavailable,
    #[error("session storage read failed: {0}")]
    Read(String),
    #[error("session storage write failed: {0}")]
    Write(String),
}

/// Durable storage for the session, read at startup and rewritten on every
/// transition.
pub trait TokenStore {
    /// Read the persisted session, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backing storage cannot be read.
    fn load(&self) -> Result<Option<Session>, StoreError>;

    /// Persist every field of `session`, replacing what was stored.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backing storage rejects the write.
    fn save(&self, session: &Session) -> Result<(), StoreError>;

    /// Remove every persisted session field.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backing storage rejects the removal.
    fn clear(&self) -> Result<(), StoreError>;
}

/// Process-local store. Clones share the same slot.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    slot: Arc<Mutex<Option<Session>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_session(session: Session) -> Self {
        Self { slot: Arc::new(Mutex::new(Some(session))) }
    }

    /// Current stored value, `None` when empty or poisoned.
    #[must_use]
    pub fn snapshot(&self) -> Option<Session> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }
}

impl TokenStore for MemoryStore {
    fn load(&self) -> Result<Option<Session>, StoreError> {
        let slot = self.slot.lock().map_err(|_| StoreError::Unavailable)?;
        Ok(slot.clone())
    }

    fn save(&self, session: &Session) -> Result<(), StoreError> {
        let mut slot = self.slot.lock().map_err(|_| StoreError::Unavailable)?;
        *slot = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        let mut slot = self.slot.lock().map_err(|_| StoreError::Unavailable)?;
        *slot = None;
        Ok(())
    }
}

/// Why a session is being torn down.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionExit {
    /// The user asked to sign out.
    Logout,
    /// A login attempt failed; any stale credentials go with it.
    LoginRejected,
    /// The backend answered 401 to an authenticated request.
    Expired,
}

/// Owns the current [`Session`] and keeps `store` in step with it.
#[derive(Clone, Debug)]
pub struct SessionGuard<S> {
    store: S,
    session: Option<Session>,
}

impl<S: TokenStore> SessionGuard<S> {
    /// Build a guard from whatever `store` holds. Read failures start signed out.
    pub fn restore(store: S) -> Self {
        let session = match store.load() {
            Ok(session) => session,
            Err(error) => {
                tracing::warn!(%error, "session restore failed; starting signed out");
                None
            }
        };
        if let Some(session) = &session {
            tracing::debug!(username = %session.username, "restored persisted session");
        }
        Self { store, session }
    }

    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.username.as_str())
    }

    #[must_use]
    pub fn bearer_token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.token.as_str())
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Persist `session` and become authenticated.
    ///
    /// # Errors
    ///
    /// Returns the store error when persisting fails; the guard is then
    /// signed out and storage is wiped so no half-written session survives.
    pub fn establish(&mut self, session: Session) -> Result<(), StoreError> {
        if let Err(error) = self.store.save(&session) {
            if let Err(clear_error) = self.store.clear() {
                tracing::warn!(error = %clear_error, "failed to wipe partial session write");
            }
            self.session = None;
            return Err(error);
        }
        tracing::info!(username = %session.username, "session established");
        self.session = Some(session);
        Ok(())
    }

    /// End the session because the backend rejected `token`. Only the
    /// session that owns `token` is ended; a late 401 for a token that has
    /// already been replaced leaves the newer session alone.
    pub fn expire(&mut self, token: &str) -> bool {
        if self.bearer_token() != Some(token) {
            tracing::debug!("ignoring 401 for a token that is no longer held");
            return false;
        }
        self.end(SessionExit::Expired)
    }

    /// End the session for `exit`. Returns whether the guard was authenticated.
    ///
    /// `Expired` is a no-op while signed out. The other exits always clear
    /// storage so stale tokens cannot outlive a failed login.
    pub fn end(&mut self, exit: SessionExit) -> bool {
        if exit == SessionExit::Expired && self.session.is_none() {
            return false;
        }
        if let Err(error) = self.store.clear() {
            tracing::warn!(%error, ?exit, "failed to clear persisted session");
        }
        let was_authenticated = self.session.take().is_some();
        if was_authenticated {
            tracing::info!(?exit, "session ended");
        }
        was_authenticated
    }
}

/// Shared handle through which the API client drives the guard.
///
/// Front ends wrap their guard in whatever cell their runtime prefers (a
/// `RefCell` in the CLI, a reactive signal in the browser) and hand the
/// handle to [`crate::ApiClient`].
pub trait SessionHandle {
    fn bearer_token(&self) -> Option<String>;

    /// # Errors
    ///
    /// See [`SessionGuard::establish`].
    fn establish(&self, session: Session) -> Result<(), StoreError>;

    fn end(&self, exit: SessionExit) -> bool;

    /// See [`SessionGuard::expire`].
    fn expire(&self, token: &str) -> bool;
}

impl<S: TokenStore> SessionHandle for RefCell<SessionGuard<S>> {
    fn bearer_token(&self) -> Option<String> {
        self.borrow().bearer_token().map(str::to_owned)
    }

    fn establish(&self, session: Session) -> Result<(), StoreError> {
        self.borrow_mut().establish(session)
    }

    fn end(&self, exit: SessionExit) -> bool {
        self.borrow_mut().end(exit)
    }

    fn expire(&self, token: &str) -> bool {
        self.borrow_mut().expire(token)
    }
}

impl<H: SessionHandle + ?Sized> SessionHandle for Rc<H> {
    fn bearer_token(&self) -> Option<String> {
        (**self).bearer_token()
    }

    fn establish(&self, session: Session) -> Result<(), StoreError> {
        (**self).establish(session)
    }

    fn end(&self, exit: SessionExit) -> bool {
        (**self).end(exit)
    }

    fn expire(&self, token: &str) -> bool {
        (**self).expire(token)
    }
}
