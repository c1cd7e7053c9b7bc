//! # client
//!
//! Leptos + WASM admin dashboard for the school vaccination tracker.
//!
//! This crate contains the route tree and its guards, pages, components,
//! per-page state, and the browser halves of the `gateway` seams: a
//! `gloo-net` transport and a `localStorage` token store. Everything that
//! needs a browser is gated on the `csr` feature so the crate still builds
//! and tests natively.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Install console logging and mount the app on `<body>`.
#[cfg(feature = "csr")]
pub fn mount() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::mount_to_body(app::App);
}
