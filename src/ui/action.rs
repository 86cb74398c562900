//! Actions that can be triggered by keybindings
//!
//! Only tab-level shortcuts are actions. Keys inside dialogs are fixed and
//! handled by each dialog's state machine.

use serde::{Deserialize, Serialize};

/// All mappable tab-level actions
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    // ========== Global Actions ==========
    /// Quit the application
    Quit,
    /// Re-scan agents and re-fetch issues
    Refresh,
    /// Toggle the active-only agent filter
    ToggleActiveFilter,
    /// Open the keybinding help dialog
    ShowHelp,

    // ========== Tabs ==========
    NextTab,
    PrevTab,
    /// Switch to tab by number (1-based)
    SwitchToTab(u8),

    // ========== Issues Tab ==========
    SelectNext,
    SelectPrev,
    OpenInBrowser,
    /// Ask for confirmation before closing the selected issue
    CloseIssue,
    OpenCommandPicker,
    OpenPhasePicker,
    NewIssue,
}

impl Action {
    /// Get a human-readable description of the action
    pub fn description(&self) -> &'static str {
        match self {
            Action::Quit => "Quit",
            Action::Refresh => "Refresh agents and issues",
            Action::ToggleActiveFilter => "Toggle active-only filter",
            Action::ShowHelp => "Show help",
            Action::NextTab => "Next tab",
            Action::PrevTab => "Previous tab",
            Action::SwitchToTab(_) => "Switch to tab",
            Action::SelectNext => "Next issue",
            Action::SelectPrev => "Previous issue",
            Action::OpenInBrowser => "Open issue in browser",
            Action::CloseIssue => "Close issue",
            Action::OpenCommandPicker => "Run command on issue",
            Action::OpenPhasePicker => "Set issue phase",
            Action::NewIssue => "Create new issue",
        }
    }

    /// Config name of the action, as used in the `[keys]` table
    pub fn name(&self) -> String {
        match self {
            Action::Quit => "quit".into(),
            Action::Refresh => "refresh".into(),
            Action::ToggleActiveFilter => "toggle_active_filter".into(),
            Action::ShowHelp => "show_help".into(),
            Action::NextTab => "next_tab".into(),
            Action::PrevTab => "prev_tab".into(),
            Action::SwitchToTab(n) => format!("switch_to_tab_{}", n),
            Action::SelectNext => "select_next".into(),
            Action::SelectPrev => "select_prev".into(),
            Action::OpenInBrowser => "open_in_browser".into(),
            Action::CloseIssue => "close_issue".into(),
            Action::OpenCommandPicker => "open_command_picker".into(),
            Action::OpenPhasePicker => "open_phase_picker".into(),
            Action::NewIssue => "new_issue".into(),
        }
    }

    /// Whether the action acts on issue data, and so waits for a refresh to finish
    pub fn needs_issue_data(&self) -> bool {
        matches!(
            self,
            Action::Refresh
                | Action::CloseIssue
                | Action::OpenCommandPicker
                | Action::OpenPhasePicker
                | Action::NewIssue
        )
    }
}
