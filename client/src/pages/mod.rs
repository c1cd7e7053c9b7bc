//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns its state signal and its backend calls, and delegates
//! rendering details to `components`. Pages never check authentication;
//! the route gates in `app` do.

pub mod dashboard;
pub mod drives;
pub mod login;
pub mod reports;
pub mod signup;
pub mod students;
