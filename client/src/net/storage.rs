//! `localStorage` token store.
//!
//! The session lives under three flat keys so it survives reloads and can be
//! inspected from dev tools. Off the browser every read is empty and writes
//! fail with [`StoreError::Unavailable`].

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use gateway::{Session, StoreError, TokenStore};

pub const TOKEN_KEY: &str = "token";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
pub const USERNAME_KEY: &str = "username";

/// Every key a session occupies.
pub const SESSION_KEYS: [&str; 3] = [TOKEN_KEY, REFRESH_TOKEN_KEY, USERNAME_KEY];

#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

/// Rebuild a session from raw key values. A missing or blank token means no
/// session, whatever else is stored.
#[cfg(any(test, feature = "csr"))]
pub(crate) fn session_from_parts(
    token: Option<String>,
    refresh_token: Option<String>,
    username: Option<String>,
) -> Option<Session> {
    let token = token.filter(|t| !t.trim().is_empty())?;
    Some(Session {
        token,
        refresh_token: refresh_token.filter(|t| !t.is_empty()),
        username: username.unwrap_or_default(),
    })
}

#[cfg(feature = "csr")]
fn local_storage() -> Result<web_sys::Storage, StoreError> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or(StoreError::Unavailable)
}

impl TokenStore for BrowserStorage {
    fn load(&self) -> Result<Option<Session>, StoreError> {
        #[cfg(feature = "csr")]
        {
            let storage = local_storage()?;
            let read = |key: &str| {
                storage
                    .get_item(key)
                    .map_err(|e| StoreError::Read(format!("{key}: {e:?}")))
            };
            Ok(session_from_parts(read(TOKEN_KEY)?, read(REFRESH_TOKEN_KEY)?, read(USERNAME_KEY)?))
        }
        #[cfg(not(feature = "csr"))]
        {
            Ok(None)
        }
    }

    fn save(&self, session: &Session) -> Result<(), StoreError> {
        #[cfg(feature = "csr")]
        {
            let storage = local_storage()?;
            let write = |key: &str, value: &str| {
                storage
                    .set_item(key, value)
                    .map_err(|e| StoreError::Write(format!("{key}: {e:?}")))
            };
            write(TOKEN_KEY, &session.token)?;
            write(USERNAME_KEY, &session.username)?;
            match &session.refresh_token {
                Some(refresh) => write(REFRESH_TOKEN_KEY, refresh),
                None => storage
                    .remove_item(REFRESH_TOKEN_KEY)
                    .map_err(|e| StoreError::Write(format!("{REFRESH_TOKEN_KEY}: {e:?}"))),
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = session;
            Err(StoreError::Unavailable)
        }
    }

    fn clear(&self) -> Result<(), StoreError> {
        #[cfg(feature = "csr")]
        {
            let storage = local_storage()?;
            for key in SESSION_KEYS {
                storage
                    .remove_item(key)
                    .map_err(|e| StoreError::Write(format!("{key}: {e:?}")))?;
            }
            Ok(())
        }
        #[cfg(not(feature = "csr"))]
        {
            Ok(())
        }
    }
}
