//! Input routing and the reducer for background results
//!
//! A key goes to the first layer that claims it:
//! 1. the new-issue title field, which takes every printable key
//! 2. the quit binding
//! 3. Esc, which closes any dialog
//! 4. the help search, which lets keys it does not use fall through
//! 5. the remaining dialogs, which swallow everything
//! 6. the keybindings of the current tab, then the global ones

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::config::{KeyCombo, KeyContext};
use crate::github::{issue_url, IssueKey};
use crate::ui::action::Action;
use crate::ui::components::{
    CommandPickerState, ConfirmCloseState, DialogOutcome, HelpDialogState, NewIssueRequest,
    NewIssueState, PhasePickerState,
};
use crate::ui::effect::Effect;
use crate::ui::events::{ActionOutcome, AppEvent};
use crate::ui::navigation::{move_next, move_previous};
use crate::ui::state::{AppState, Dialog, Tab};

impl AppState {
    /// Apply one event and return the side effects it asks for
    pub fn handle_event(&mut self, event: AppEvent) -> Vec<Effect> {
        match event {
            AppEvent::Key(key) if key.kind != KeyEventKind::Release => self.handle_key(key),
            AppEvent::Key(_) => Vec::new(),
            AppEvent::Tick => {
                if self.loading {
                    self.spinner.tick();
                }
                Vec::new()
            }
            AppEvent::Resize(width, height) => {
                self.width = width;
                self.height = height;
                Vec::new()
            }
            AppEvent::RefreshCompleted(outcome) => {
                self.apply_refresh(outcome);
                Vec::new()
            }
            AppEvent::ActionCompleted(outcome) => {
                self.apply_action_outcome(outcome);
                Vec::new()
            }
        }
    }

    fn apply_action_outcome(&mut self, outcome: ActionOutcome) {
        match outcome {
            ActionOutcome::IssueClosed(key) => {
                tracing::info!(repo = %key.repo, number = key.number, "Issue closed");
                self.remove_issue(&key);
            }
            ActionOutcome::Done(message) => tracing::debug!(%message, "Action finished"),
            ActionOutcome::Failed(message) => {
                tracing::warn!(%message, "Action failed");
                self.error = Some(message);
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        if let Dialog::NewIssue(wizard) = &mut self.dialog {
            if wizard.is_title_input() {
                let outcome = wizard.handle_key(&key);
                return self.finish_new_issue(outcome);
            }
        }

        let combo = KeyCombo::from_key_event(&key);
        let action = self
            .keybindings
            .get_action(&combo, KeyContext::from_tab(self.tab))
            .cloned();

        if action == Some(Action::Quit) {
            self.should_quit = true;
            return Vec::new();
        }

        if self.dialog.is_open() && key.code == KeyCode::Esc {
            self.close_dialog();
            return Vec::new();
        }

        match &mut self.dialog {
            Dialog::None => {}
            Dialog::Help(help) => {
                if help.handle_key(&key) == DialogOutcome::Consumed {
                    return Vec::new();
                }
            }
            Dialog::CommandPicker(picker) => {
                let target = picker.target.clone();
                let outcome = picker.handle_key(&key);
                return self.finish_command_picker(target, outcome);
            }
            Dialog::ConfirmClose(confirm) => {
                let target = confirm.target.clone();
                let outcome = confirm.handle_key(&key);
                return match self.settle(outcome) {
                    Some(()) => vec![Effect::CloseIssue(target)],
                    None => Vec::new(),
                };
            }
            Dialog::NewIssue(wizard) => {
                let outcome = wizard.handle_key(&key);
                return self.finish_new_issue(outcome);
            }
            Dialog::PhasePicker(picker) => {
                let target = picker.target.clone();
                let outcome = picker.handle_key(&key);
                return self.finish_phase_picker(target, outcome);
            }
        }

        match action {
            Some(action) => self.dispatch(action),
            None => Vec::new(),
        }
    }

    /// Close the dialog on Confirm or Cancel; the confirmed value, if any
    fn settle<T>(&mut self, outcome: DialogOutcome<T>) -> Option<T> {
        match outcome {
            DialogOutcome::Confirm(value) => {
                self.close_dialog();
                Some(value)
            }
            DialogOutcome::Cancel => {
                self.close_dialog();
                None
            }
            DialogOutcome::Consumed | DialogOutcome::Ignored => None,
        }
    }

    fn finish_command_picker(
        &mut self,
        target: IssueKey,
        outcome: DialogOutcome<usize>,
    ) -> Vec<Effect> {
        let Some(index) = self.settle(outcome) else {
            return Vec::new();
        };
        match self.commands.get(index) {
            Some(command) => vec![Effect::RunCommand {
                issue: target,
                prompt: command.prompt.clone(),
            }],
            None => Vec::new(),
        }
    }

    fn finish_phase_picker(
        &mut self,
        target: IssueKey,
        outcome: DialogOutcome<usize>,
    ) -> Vec<Effect> {
        let Some(label) = self
            .settle(outcome)
            .and_then(|index| self.phases.get(index).cloned())
        else {
            return Vec::new();
        };
        // gh treats a repeated label as a no-op, so the call is still sent
        if !self.add_label(&target, &label) {
            tracing::debug!(%label, number = target.number, "Label already present");
        }
        vec![Effect::AddLabel {
            issue: target,
            label,
        }]
    }

    fn finish_new_issue(&mut self, outcome: DialogOutcome<NewIssueRequest>) -> Vec<Effect> {
        match self.settle(outcome) {
            Some(NewIssueRequest { repo, title }) => vec![Effect::CreateIssue { repo, title }],
            None => Vec::new(),
        }
    }

    fn dispatch(&mut self, action: Action) -> Vec<Effect> {
        if self.loading && action.needs_issue_data() {
            tracing::debug!(action = %action.name(), "Ignored while loading");
            return Vec::new();
        }

        match action {
            Action::Quit => self.should_quit = true,
            Action::Refresh => {
                self.loading = true;
                return vec![Effect::Refresh];
            }
            Action::ToggleActiveFilter => self.active_only = !self.active_only,
            Action::ShowHelp => {
                self.open_dialog(Dialog::Help(HelpDialogState::new(&self.keybindings)))
            }
            Action::NextTab => self.tab = self.tab.next(),
            Action::PrevTab => self.tab = self.tab.prev(),
            Action::SwitchToTab(number) => {
                if let Some(tab) = Tab::from_number(number) {
                    self.tab = tab;
                }
            }
            Action::SelectNext => self.selected = move_next(&self.issues, self.selected.as_ref()),
            Action::SelectPrev => {
                self.selected = move_previous(&self.issues, self.selected.as_ref())
            }
            Action::OpenInBrowser => {
                if let Some(issue) = self.selected_issue() {
                    return vec![Effect::OpenUrl(issue_url(&issue.repo, issue.number))];
                }
            }
            Action::CloseIssue => {
                if let Some(issue) = self.selected_issue() {
                    let dialog = ConfirmCloseState::new(issue.key(), issue.title.clone());
                    self.open_dialog(Dialog::ConfirmClose(dialog));
                }
            }
            Action::OpenCommandPicker => {
                if let Some(issue) = self.selected_issue() {
                    let dialog = CommandPickerState::new(issue.key(), self.commands.len());
                    self.open_dialog(Dialog::CommandPicker(dialog));
                }
            }
            Action::OpenPhasePicker => {
                if let Some(issue) = self.selected_issue() {
                    let dialog = PhasePickerState::new(issue.key(), self.phases.len());
                    self.open_dialog(Dialog::PhasePicker(dialog));
                }
            }
            Action::NewIssue => {
                let dialog = NewIssueState::new(self.repositories.clone());
                self.open_dialog(Dialog::NewIssue(dialog));
            }
        }
        Vec::new()
    }
}
