//! Browser halves of the gateway seams.
//!
//! SYSTEM CONTEXT
//! ==============
//! `transport` sends requests with `gloo-net`, `storage` persists the session
//! in `localStorage`, and `api` assembles them into the client every page
//! uses.

pub mod api;
pub mod storage;
pub mod transport;
