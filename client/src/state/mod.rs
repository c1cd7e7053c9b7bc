//! Client-side state modules.
//!
//! ARCHITECTURE
//! ============
//! `session` is shared through context for the whole app. The listing and
//! dashboard states are page-local: each page owns one in an `RwSignal` and
//! the structs here keep their filter/paging rules testable without a DOM.

pub mod dashboard;
pub mod drives;
pub mod reports;
pub mod session;
pub mod students;
