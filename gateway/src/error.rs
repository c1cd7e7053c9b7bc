//! Error taxonomy for backend calls.
//!
//! `Auth` is a rejected login and stays local to the login form.
//! `AuthorizationExpired` is a 401 on an authenticated call; by the time a
//! caller sees it the session has already been ended. `Validation` never
//! reaches the network. `Network` is a transport failure the user retries.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use serde_json::Value;

use crate::session::StoreError;
use crate::transport::{ApiResponse, TransportError};
use crate::validation::ValidationError;

pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid username or password";
pub const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired. Please sign in again.";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Auth(String),
    #[error("authorization expired")]
    AuthorizationExpired,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Network(#[from] TransportError),
    #[error("server returned status {status}")]
    Status { status: u16, message: Option<String> },
    #[error("invalid response body: {0}")]
    Decode(String),
    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl ApiError {
    /// Map a non-success response, keeping the backend's message if it sent one.
    #[must_use]
    pub fn from_response(response: &ApiResponse) -> Self {
        Self::Status { status: response.status, message: message_from_body(&response.body) }
    }

    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::AuthorizationExpired => Some(401),
            _ => None,
        }
    }

    /// Text for inline display. `fallback` covers failures with nothing
    /// better to say (the view's own "Failed to load ..." line).
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Auth(message) => message.clone(),
            Self::AuthorizationExpired => SESSION_EXPIRED_MESSAGE.to_owned(),
            Self::Validation(error) => error.to_string(),
            Self::Status { message: Some(message), .. } => message.clone(),
            Self::Status { message: None, .. } | Self::Network(_) | Self::Decode(_) | Self::Storage(_) => {
                fallback.to_owned()
            }
        }
    }
}

/// Pull `message` (or DRF-style `detail`) out of an error body.
fn message_from_body(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    ["message", "detail"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .filter(|message| !message.trim().is_empty())
        .map(ToOwned::to_owned)
}
