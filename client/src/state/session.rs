//! Reactive session context shared by the route guards and the API client.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` restores a [`SessionGuard`] from `localStorage` once, wraps it in a
//! signal, and provides the resulting [`SessionContext`] through Leptos
//! context. Route guards and the top bar subscribe to it; the API client
//! drives it through [`SessionHandle`].
//!
//! DESIGN
//! ======
//! A 401 that finds the guard already signed out updates nothing and notifies
//! no one, so a burst of failing requests produces a single redirect.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use gateway::{Session, SessionExit, SessionGuard, SessionHandle, StoreError, TokenStore};
use leptos::prelude::*;

use crate::net::storage::BrowserStorage;

pub struct SessionContext<S: 'static = BrowserStorage>(RwSignal<SessionGuard<S>>);

impl<S: 'static> Clone for SessionContext<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: 'static> Copy for SessionContext<S> {}

impl<S: TokenStore + Send + Sync + 'static> SessionContext<S> {
    pub fn new(guard: SessionGuard<S>) -> Self {
        Self(RwSignal::new(guard))
    }

    /// Reactive: re-runs the caller when the session starts or ends.
    pub fn is_authenticated(&self) -> bool {
        self.0.try_with(SessionGuard::is_authenticated).unwrap_or(false)
    }

    /// Reactive username of the signed-in user.
    pub fn username(&self) -> Option<String> {
        self.0.try_with(|g| g.username().map(str::to_owned)).flatten()
    }

    pub fn is_authenticated_untracked(&self) -> bool {
        self.0.try_with_untracked(SessionGuard::is_authenticated).unwrap_or(false)
    }
}

impl<S: TokenStore + Send + Sync + 'static> SessionHandle for SessionContext<S> {
    fn bearer_token(&self) -> Option<String> {
        self.0
            .try_with_untracked(|g| g.bearer_token().map(str::to_owned))
            .flatten()
    }

    fn establish(&self, session: Session) -> Result<(), StoreError> {
        self.0
            .try_update(|g| g.establish(session))
            .unwrap_or(Err(StoreError::Unavailable))
    }

    fn end(&self, exit: SessionExit) -> bool {
        self.0
            .try_maybe_update(|g| {
                let ended = g.end(exit);
                (ended, ended)
            })
            .unwrap_or(false)
    }

    fn expire(&self, token: &str) -> bool {
        self.0
            .try_maybe_update(|g| {
                let ended = g.expire(token);
                (ended, ended)
            })
            .unwrap_or(false)
    }
}

/// Avatar letter for the top bar.
pub fn initial(username: &str) -> String {
    username
        .trim()
        .chars()
        .next()
        .map_or_else(|| "?".to_owned(), |c| c.to_uppercase().collect())
}
