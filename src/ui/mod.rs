//! UI rendering module for City Weather CLI
//!
//! This module contains all the rendering logic for the terminal user interface,
//! using the ratatui library for TUI components.

pub mod format;
pub mod help_overlay;
pub mod icon;
pub mod notification;
pub mod search;

pub use help_overlay::render as render_help_overlay;
pub use icon::{icon_for, Icon};
pub use notification::render as render_notification;
pub use search::render as render_search;
