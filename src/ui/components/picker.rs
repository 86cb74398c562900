//! Numbered list picker shared by the command and phase dialogs

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::{DialogFrame, DialogOutcome, InstructionBar};

/// Cursor over a fixed number of choices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerState {
    selected: usize,
    len: usize,
}

impl PickerState {
    pub fn new(len: usize) -> Self {
        Self { selected: 0, len }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.len {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Digits pick directly; unknown keys are swallowed so nothing leaks to
    /// the view underneath
    pub fn handle_key(&mut self, key: &KeyEvent) -> DialogOutcome<usize> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_prev();
                DialogOutcome::Consumed
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_next();
                DialogOutcome::Consumed
            }
            KeyCode::Enter | KeyCode::Char('y') if !self.is_empty() => {
                DialogOutcome::Confirm(self.selected)
            }
            KeyCode::Char('n') | KeyCode::Esc => DialogOutcome::Cancel,
            KeyCode::Char(c) => match c.to_digit(10).map(|d| d as usize) {
                Some(digit) if (1..=self.len).contains(&digit) => {
                    self.selected = digit - 1;
                    DialogOutcome::Confirm(self.selected)
                }
                _ => DialogOutcome::Consumed,
            },
            _ => DialogOutcome::Consumed,
        }
    }
}

/// One row in a picker
pub struct PickerItem<'a> {
    pub label: Span<'a>,
    pub detail: Option<Span<'a>>,
}

impl<'a> PickerItem<'a> {
    pub fn new(label: impl Into<Span<'a>>) -> Self {
        Self {
            label: label.into(),
            detail: None,
        }
    }

    pub fn detail(mut self, detail: impl Into<Span<'a>>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Framed numbered list with a header line and key hints
pub struct PickerList<'a> {
    title: &'a str,
    header: Line<'a>,
    items: Vec<PickerItem<'a>>,
    state: &'a PickerState,
}

impl<'a> PickerList<'a> {
    pub fn new(
        title: &'a str,
        header: Line<'a>,
        items: Vec<PickerItem<'a>>,
        state: &'a PickerState,
    ) -> Self {
        Self {
            title,
            header,
            items,
            state,
        }
    }

    pub fn render(self, area: Rect, buf: &mut Buffer) {
        let height = self.items.len() as u16 + 6;
        let inner = DialogFrame::new(self.title, 60, height).render(area, buf);

        let [header_area, _, list_area, hint_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        Paragraph::new(self.header).render(header_area, buf);

        let lines: Vec<Line> = self
            .items
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                let is_selected = i == self.state.selected();
                let style = if is_selected {
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Cyan)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                let mut spans = vec![
                    Span::styled(format!(" {}. ", i + 1), style),
                    item.label.patch_style(style),
                ];
                if let Some(detail) = item.detail {
                    spans.push(Span::raw(" "));
                    spans.push(detail.style(Style::default().fg(Color::DarkGray)));
                }
                Line::from(spans)
            })
            .collect();
        Paragraph::new(lines).render(list_area, buf);

        InstructionBar::new(vec![
            ("1-9", "Pick"),
            ("j/k", "Move"),
            ("Enter", "Confirm"),
            ("Esc", "Cancel"),
        ])
        .render(hint_area, buf);
    }
}
