//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the dashboard chrome, dialogs and the chart. They read
//! the session from context and leave backend calls to the pages, except for
//! the top bar's logout.

pub mod bar_chart;
pub mod drive_modal;
pub mod error_banner;
pub mod guard;
pub mod layout;
pub mod pagination;
pub mod sidebar;
pub mod student_modal;
pub mod topbar;
