//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns from page and component
//! logic so the pages stay readable and the pure parts stay testable.

pub mod browser;
pub mod chart;
pub mod clock;
pub mod download;
