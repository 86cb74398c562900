use crossterm::event::KeyEvent;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
};

use super::{DialogOutcome, PickerItem, PickerList, PickerState};
use crate::config::IssueCommand;
use crate::github::IssueKey;

/// Choice of agent command to run against one issue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandPickerState {
    pub target: IssueKey,
    pub picker: PickerState,
}

impl CommandPickerState {
    pub fn new(target: IssueKey, commands: usize) -> Self {
        Self {
            target,
            picker: PickerState::new(commands),
        }
    }

    /// Confirms with the index into the configured commands
    pub fn handle_key(&mut self, key: &KeyEvent) -> DialogOutcome<usize> {
        self.picker.handle_key(key)
    }
}

pub struct CommandPicker<'a> {
    state: &'a CommandPickerState,
    commands: &'a [IssueCommand],
    issue_title: &'a str,
}

impl<'a> CommandPicker<'a> {
    pub fn new(
        state: &'a CommandPickerState,
        commands: &'a [IssueCommand],
        issue_title: &'a str,
    ) -> Self {
        Self {
            state,
            commands,
            issue_title,
        }
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let header = Line::from(vec![
            Span::styled(
                format!("#{} ", self.state.target.number),
                Style::default().fg(Color::Yellow),
            ),
            Span::raw(self.issue_title),
        ]);
        let items = self
            .commands
            .iter()
            .map(|command| {
                PickerItem::new(command.name.as_str()).detail(command.prompt.as_str())
            })
            .collect();

        PickerList::new("Run Command", header, items, &self.state.picker).render(area, buf);
    }
}
