use crossterm::event::KeyEvent;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
};

use super::{DialogOutcome, PickerItem, PickerList, PickerState};
use crate::github::{Issue, IssueKey};

/// Choice of phase label to add to one issue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhasePickerState {
    pub target: IssueKey,
    pub picker: PickerState,
}

impl PhasePickerState {
    pub fn new(target: IssueKey, phases: usize) -> Self {
        Self {
            target,
            picker: PickerState::new(phases),
        }
    }

    /// Confirms with the index into the configured phases
    pub fn handle_key(&mut self, key: &KeyEvent) -> DialogOutcome<usize> {
        self.picker.handle_key(key)
    }
}

/// Phases already on the issue get a check mark
pub struct PhasePicker<'a> {
    state: &'a PhasePickerState,
    phases: &'a [String],
    issue: Option<&'a Issue>,
}

impl<'a> PhasePicker<'a> {
    pub fn new(state: &'a PhasePickerState, phases: &'a [String], issue: Option<&'a Issue>) -> Self {
        Self {
            state,
            phases,
            issue,
        }
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let header = Line::from(vec![
            Span::styled(
                format!("#{} ", self.state.target.number),
                Style::default().fg(Color::Yellow),
            ),
            Span::raw(self.issue.map_or("", |issue| issue.title.as_str())),
        ]);
        let items = self
            .phases
            .iter()
            .map(|phase| {
                let item = PickerItem::new(phase.as_str());
                if self.issue.is_some_and(|issue| issue.has_label(phase)) {
                    item.detail("✓")
                } else {
                    item
                }
            })
            .collect();

        PickerList::new("Set Phase", header, items, &self.state.picker).render(area, buf);
    }
}
