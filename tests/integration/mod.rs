//! Integration tests for the dashboard
//!
//! These drive the view-model through key events and background results,
//! then check the rendered screen and the effects carried out.

#[path = "../common/mod.rs"]
pub mod common;

pub mod dashboard_render;
pub mod issue_actions;
pub mod refresh_flow;
