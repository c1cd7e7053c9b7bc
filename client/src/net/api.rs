//! The dashboard's API client and how pages get hold of it.
//!
//! The client is cheap to clone: its session handle is a signal and its
//! transport holds only a timeout. Pages call [`use_api`] in the component
//! body and move clones into their async tasks.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::time::Duration;

use gateway::{ApiClient, ApiError, ClientConfig};
use gateway::config::DEFAULT_BASE_URL;
use leptos::prelude::*;

use super::transport::BrowserTransport;
use crate::state::session::SessionContext;

pub type DashboardApi = ApiClient<BrowserTransport, SessionContext>;

pub const NETWORK_ERROR_MESSAGE: &str = "Unable to reach the server. Please try again.";

/// Build-time settings: `VAX_API_BASE_URL` and `VAX_REQUEST_TIMEOUT_SECS`
/// are read by `option_env!` when the bundle is compiled.
pub fn build_config() -> ClientConfig {
    config_from(option_env!("VAX_API_BASE_URL"), option_env!("VAX_REQUEST_TIMEOUT_SECS"))
}

fn config_from(base_url: Option<&str>, timeout_secs: Option<&str>) -> ClientConfig {
    let config = match ClientConfig::new(base_url.unwrap_or(DEFAULT_BASE_URL)) {
        Ok(config) => config,
        Err(e) => {
            leptos::logging::warn!("{e}; falling back to {DEFAULT_BASE_URL}");
            ClientConfig::default()
        }
    };
    match timeout_secs.and_then(|raw| raw.trim().parse::<u64>().ok()) {
        Some(secs) if secs > 0 => config.with_timeout(Duration::from_secs(secs)),
        _ => config,
    }
}

pub fn new_api(config: ClientConfig, session: SessionContext) -> DashboardApi {
    let transport = BrowserTransport::new(config.request_timeout);
    ApiClient::new(config, transport, session)
}

/// The shared client from context.
///
/// # Panics
///
/// Panics when called outside the `App` tree.
pub fn use_api() -> DashboardApi {
    expect_context::<DashboardApi>()
}

/// Inline text for a failed load or save. Network failures get the shared
/// retry message; everything else prefers the backend's own words.
pub fn error_message(error: &ApiError, fallback: &str) -> String {
    match error {
        ApiError::Network(_) => NETWORK_ERROR_MESSAGE.to_owned(),
        other => other.user_message(fallback),
    }
}
