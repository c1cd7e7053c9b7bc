//! Typed gateway to the vaccination-tracker REST backend.
//!
//! This crate owns everything the browser dashboard and the CLI share: the
//! domain models, the session guard and its token-store seam, the transport
//! seam, and the interceptor-backed [`ApiClient`]. It links no HTTP stack of
//! its own; each front end plugs one in through [`Transport`].
//!
//! ARCHITECTURE
//! ============
//! - `session`: session lifecycle (restore, establish, end) over a [`TokenStore`].
//! - `client`: the single request boundary. Bearer attachment and the 401
//!   reaction live here and nowhere else.
//! - `api`: endpoint wrappers on top of `client`.
//! - `routes`, `validation`, `listing`, `metrics`, `reports`, `dates`: pure
//!   helpers the views build on.

pub mod api;
pub mod client;
pub mod config;
pub mod dates;
pub mod error;
pub mod listing;
pub mod metrics;
pub mod models;
pub mod reports;
pub mod routes;
pub mod session;
pub mod transport;
pub mod validation;

#[cfg(test)]
mod test_support;

pub use client::ApiClient;
pub use config::{ClientConfig, ConfigError};
pub use error::ApiError;
pub use session::{MemoryStore, Session, SessionExit, SessionGuard, SessionHandle, StoreError, TokenPair, TokenStore};
pub use transport::{ApiRequest, ApiResponse, Method, MultipartFile, RequestBody, Transport, TransportError};
pub use validation::ValidationError;
