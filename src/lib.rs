//! City Weather CLI Library
//!
//! This module exposes the application modules for use by the binary and by
//! integration tests.

pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod logging;
pub mod lookup;
pub mod ui;
