//! Shared test utilities for the dashboard
//!
//! - Loaded view-model fixtures and key helpers
//! - TUI terminal testing helpers

pub mod fixtures;
pub mod terminal;
