//! Dashboard state owned by the event loop
//!
//! Every mutation happens on the loop task through [`AppState::handle_event`]
//! (see `router.rs`); background work reports back with events, never by
//! touching this struct directly.

use crate::agent::{dedup_agents, filter_active, Agent};
use crate::config::{Config, IssueCommand, KeybindingConfig};
use crate::github::{Issue, IssueKey};
use crate::ui::components::{
    CommandPickerState, ConfirmCloseState, HelpDialogState, NewIssueState, PhasePickerState,
    Spinner,
};
use crate::ui::events::RefreshOutcome;
use crate::ui::navigation::{position, relocate};

/// Top-level tabs, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    #[default]
    Issues,
    Agents,
}

impl Tab {
    pub const ALL: [Tab; 2] = [Tab::Issues, Tab::Agents];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Issues => "Issues",
            Tab::Agents => "Agents",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Issues => 0,
            Tab::Agents => 1,
        }
    }

    /// Tab for a 1-based number key
    pub fn from_number(number: u8) -> Option<Tab> {
        Tab::ALL.get((number as usize).checked_sub(1)?).copied()
    }

    pub fn next(&self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    pub fn prev(&self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

/// The modal overlay, if any; at most one is open
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Dialog {
    #[default]
    None,
    Help(HelpDialogState),
    ConfirmClose(ConfirmCloseState),
    CommandPicker(CommandPickerState),
    PhasePicker(PhasePickerState),
    NewIssue(NewIssueState),
}

impl Dialog {
    pub fn is_open(&self) -> bool {
        !matches!(self, Dialog::None)
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub tab: Tab,
    pub agents: Vec<Agent>,
    pub issues: Vec<Issue>,
    /// Every repository seen by the last successful listing
    pub repositories: Vec<String>,
    pub selected: Option<IssueKey>,
    /// A refresh is in flight
    pub loading: bool,
    pub error: Option<String>,
    pub active_only: bool,
    pub dialog: Dialog,
    pub spinner: Spinner,
    pub width: u16,
    pub height: u16,
    pub should_quit: bool,
    pub keybindings: KeybindingConfig,
    pub commands: Vec<IssueCommand>,
    pub phases: Vec<String>,
}

impl AppState {
    /// Fresh state; `loading` starts set since the first refresh runs at startup
    pub fn new(config: &Config) -> Self {
        Self {
            tab: Tab::default(),
            agents: Vec::new(),
            issues: Vec::new(),
            repositories: Vec::new(),
            selected: None,
            loading: true,
            error: None,
            active_only: false,
            dialog: Dialog::None,
            spinner: Spinner::new(),
            width: 0,
            height: 0,
            should_quit: false,
            keybindings: config.keybindings.clone(),
            commands: config.commands.clone(),
            phases: config.phases.clone(),
        }
    }

    pub fn selected_issue(&self) -> Option<&Issue> {
        let key = self.selected.as_ref()?;
        self.issues.iter().find(|issue| issue.matches(key))
    }

    /// Agents to list: active-only filter applied, one per (name, directory)
    pub fn visible_agents(&self) -> Vec<&Agent> {
        dedup_agents(filter_active(&self.agents, self.active_only))
    }

    /// Replaces whatever dialog was open
    pub fn open_dialog(&mut self, dialog: Dialog) {
        self.dialog = dialog;
    }

    pub fn close_dialog(&mut self) {
        self.dialog = Dialog::None;
    }

    pub fn apply_refresh(&mut self, outcome: RefreshOutcome) {
        self.loading = false;
        self.agents = outcome.agents;
        if let Some(fetch) = outcome.issues {
            self.repositories = fetch.repositories;
            self.issues = fetch.issues;
            self.selected = relocate(&self.issues, self.selected.as_ref(), 0);
        }
        self.error = outcome.error;
    }

    /// Drop a closed issue; a selection on it moves to whatever now occupies
    /// the same row
    pub fn remove_issue(&mut self, key: &IssueKey) {
        let index = position(&self.issues, Some(key)).unwrap_or(0);
        self.issues.retain(|issue| !issue.matches(key));
        let keep = self.selected.as_ref().filter(|selected| *selected != key);
        self.selected = relocate(&self.issues, keep, index);
    }

    /// Apply a label locally; false if the issue is gone or already has it
    pub fn add_label(&mut self, key: &IssueKey, label: &str) -> bool {
        self.issues
            .iter_mut()
            .find(|issue| issue.matches(key))
            .is_some_and(|issue| issue.add_label(label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::IssueFetch;

    fn state() -> AppState {
        AppState::new(&Config::default())
    }

    fn fetch(issues: Vec<Issue>) -> IssueFetch {
        IssueFetch {
            repositories: vec!["o/a".to_string(), "o/b".to_string()],
            issues,
            failed: Vec::new(),
        }
    }

    #[test]
    fn test_tab_cycle() {
        assert_eq!(Tab::default(), Tab::Issues);
        assert_eq!(Tab::Issues.next(), Tab::Agents);
        assert_eq!(Tab::Agents.next(), Tab::Issues);
        assert_eq!(Tab::Issues.prev(), Tab::Agents);
        assert_eq!(Tab::from_number(2), Some(Tab::Agents));
        assert_eq!(Tab::from_number(0), None);
        assert_eq!(Tab::from_number(3), None);
    }

    #[test]
    fn test_first_refresh_selects_first_issue() {
        let mut state = state();
        assert!(state.loading);
        state.apply_refresh(RefreshOutcome {
            agents: Vec::new(),
            issues: Some(fetch(vec![Issue::new("o/b", 1, "b"), Issue::new("o/a", 4, "a")])),
            error: None,
        });
        assert!(!state.loading);
        assert_eq!(state.selected, Some(IssueKey::new("o/a", 4)));
        assert_eq!(state.repositories.len(), 2);
    }

    #[test]
    fn test_failed_listing_keeps_previous_issues() {
        let mut state = state();
        state.apply_refresh(RefreshOutcome {
            issues: Some(fetch(vec![Issue::new("o/a", 1, "a")])),
            ..Default::default()
        });
        state.apply_refresh(RefreshOutcome {
            error: Some("GitHub not authenticated. Run 'gh auth login'".to_string()),
            ..Default::default()
        });
        assert_eq!(state.issues.len(), 1);
        assert!(state.error.is_some());
    }

    #[test]
    fn test_remove_selected_issue_moves_to_same_row() {
        let mut state = state();
        state.apply_refresh(RefreshOutcome {
            issues: Some(fetch(vec![
                Issue::new("o/a", 1, "x"),
                Issue::new("o/a", 2, "y"),
                Issue::new("o/a", 3, "z"),
            ])),
            ..Default::default()
        });
        state.selected = Some(IssueKey::new("o/a", 2));
        state.remove_issue(&IssueKey::new("o/a", 2));
        assert_eq!(state.selected, Some(IssueKey::new("o/a", 3)));

        state.remove_issue(&IssueKey::new("o/a", 3));
        assert_eq!(state.selected, Some(IssueKey::new("o/a", 1)));

        state.remove_issue(&IssueKey::new("o/a", 1));
        assert_eq!(state.selected, None);
    }

    #[test]
    fn test_remove_other_issue_keeps_selection() {
        let mut state = state();
        state.apply_refresh(RefreshOutcome {
            issues: Some(fetch(vec![Issue::new("o/a", 1, "x"), Issue::new("o/a", 2, "y")])),
            ..Default::default()
        });
        state.selected = Some(IssueKey::new("o/a", 2));
        state.remove_issue(&IssueKey::new("o/a", 1));
        assert_eq!(state.selected, Some(IssueKey::new("o/a", 2)));
    }

    #[test]
    fn test_add_label_is_idempotent() {
        let mut state = state();
        state.issues = vec![Issue::new("o/a", 1, "x")];
        let key = IssueKey::new("o/a", 1);
        assert!(state.add_label(&key, "tester"));
        assert!(!state.add_label(&key, "tester"));
        assert!(!state.add_label(&IssueKey::new("o/a", 9), "tester"));
        assert_eq!(state.issues[0].labels, vec!["tester".to_string()]);
    }
}
