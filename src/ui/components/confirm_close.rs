use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use super::{DialogFrame, DialogOutcome, InstructionBar};
use crate::github::{bare_repo_name, IssueKey};

/// Pending close of one issue, waiting for y/n
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmCloseState {
    pub target: IssueKey,
    pub title: String,
}

impl ConfirmCloseState {
    pub fn new(target: IssueKey, title: impl Into<String>) -> Self {
        Self {
            target,
            title: title.into(),
        }
    }

    pub fn handle_key(&self, key: &KeyEvent) -> DialogOutcome<()> {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                DialogOutcome::Confirm(())
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => DialogOutcome::Cancel,
            _ => DialogOutcome::Consumed,
        }
    }
}

pub struct ConfirmCloseDialog<'a> {
    state: &'a ConfirmCloseState,
}

impl<'a> ConfirmCloseDialog<'a> {
    pub fn new(state: &'a ConfirmCloseState) -> Self {
        Self { state }
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let inner = DialogFrame::new("Close Issue", 60, 8)
            .border_color(Color::Red)
            .render(area, buf);

        let [question_area, title_area, _, hint_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(inner);

        let target = &self.state.target;
        Paragraph::new(Line::from(vec![
            Span::raw("Close "),
            Span::styled(
                format!("#{}", target.number),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(" in {}?", bare_repo_name(&target.repo))),
        ]))
        .alignment(Alignment::Center)
        .render(question_area, buf);

        Paragraph::new(Span::styled(
            self.state.title.as_str(),
            Style::default().fg(Color::Gray),
        ))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(title_area, buf);

        InstructionBar::new(vec![("y/Enter", "Close"), ("n/Esc", "Cancel")])
            .render(hint_area, buf);
    }
}
