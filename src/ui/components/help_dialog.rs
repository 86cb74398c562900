//! Help dialog listing every keybinding, filtered by a search string

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::{DialogFrame, DialogOutcome, InstructionBar};
use crate::config::{KeyContext, KeybindingConfig};

/// A keybinding entry for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeybindingEntry {
    pub context: KeyContext,
    pub key: String,
    pub action: String,
    pub description: &'static str,
}

impl KeybindingEntry {
    fn matches(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.key.to_lowercase().contains(needle)
            || self.action.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpDialogState {
    pub search: String,
    pub scroll_offset: usize,
    entries: Vec<KeybindingEntry>,
}

impl HelpDialogState {
    pub fn new(config: &KeybindingConfig) -> Self {
        let entries = config
            .entries()
            .into_iter()
            .map(|(context, key, action)| KeybindingEntry {
                context,
                key: key.to_string(),
                action: action.name(),
                description: action.description(),
            })
            .collect();
        Self {
            search: String::new(),
            scroll_offset: 0,
            entries,
        }
    }

    /// Entries whose key, action name or description contain the search
    pub fn filtered(&self) -> Vec<&KeybindingEntry> {
        let needle = self.search.to_lowercase();
        self.entries
            .iter()
            .filter(|entry| entry.matches(&needle))
            .collect()
    }

    /// Search editing and scrolling; anything else is left to the caller
    pub fn handle_key(&mut self, key: &KeyEvent) -> DialogOutcome<()> {
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return DialogOutcome::Ignored;
        }
        match key.code {
            KeyCode::Char(c) if c.is_alphanumeric() => {
                self.search.push(c);
                self.scroll_offset = 0;
            }
            KeyCode::Backspace => {
                self.search.pop();
                self.scroll_offset = 0;
            }
            KeyCode::Up => self.scroll_offset = self.scroll_offset.saturating_sub(1),
            KeyCode::Down => {
                if self.scroll_offset + 1 < self.filtered().len() {
                    self.scroll_offset += 1;
                }
            }
            _ => return DialogOutcome::Ignored,
        }
        DialogOutcome::Consumed
    }
}

pub struct HelpDialog<'a> {
    state: &'a HelpDialogState,
}

impl<'a> HelpDialog<'a> {
    pub fn new(state: &'a HelpDialogState) -> Self {
        Self { state }
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let width = (area.width * 70 / 100).clamp(50, 80);
        let height = (area.height * 80 / 100).clamp(15, 35);
        let inner = DialogFrame::new("Help - Keybindings", width, height).render(area, buf);

        let [search_area, _, list_area, hint_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        Paragraph::new(Line::from(vec![
            Span::styled(" Search: ", Style::default().fg(Color::DarkGray)),
            Span::raw(self.state.search.as_str()),
            Span::styled("█", Style::default().fg(Color::Cyan)),
        ]))
        .render(search_area, buf);

        let filtered = self.state.filtered();
        let lines: Vec<Line> = if filtered.is_empty() {
            vec![Line::from(Span::styled(
                " (no matches)",
                Style::default().fg(Color::DarkGray),
            ))]
        } else {
            let max_offset = filtered
                .len()
                .saturating_sub(list_area.height as usize);
            filtered
                .iter()
                .skip(self.state.scroll_offset.min(max_offset))
                .map(|entry| {
                    Line::from(vec![
                        Span::styled(
                            format!(" {:<8}", entry.context.label()),
                            Style::default().fg(Color::DarkGray),
                        ),
                        Span::styled(
                            format!("{:<12}", entry.key),
                            Style::default()
                                .fg(Color::Yellow)
                                .add_modifier(Modifier::BOLD),
                        ),
                        Span::raw(entry.description),
                    ])
                })
                .collect()
        };
        Paragraph::new(lines).render(list_area, buf);

        InstructionBar::new(vec![("type", "Search"), ("↑/↓", "Scroll"), ("Esc", "Close")])
            .render(hint_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_keybindings;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_lists_every_binding() {
        let config = default_keybindings();
        let state = HelpDialogState::new(&config);
        assert_eq!(state.filtered().len(), config.entries().len());
    }

    #[test]
    fn test_search_filters_case_insensitively() {
        let mut state = HelpDialogState::new(&default_keybindings());
        for c in "BROWSER".chars() {
            state.handle_key(&key(KeyCode::Char(c)));
        }
        let filtered = state.filtered();
        assert!(!filtered.is_empty());
        assert!(filtered.iter().all(|e| e.action == "open_in_browser"));
    }

    #[test]
    fn test_no_matches() {
        let mut state = HelpDialogState::new(&default_keybindings());
        for c in "zzzz".chars() {
            state.handle_key(&key(KeyCode::Char(c)));
        }
        assert!(state.filtered().is_empty());
        state.handle_key(&key(KeyCode::Backspace));
        assert_eq!(state.search, "zzz");
    }

    #[test]
    fn test_other_keys_fall_through() {
        let mut state = HelpDialogState::new(&default_keybindings());
        assert_eq!(state.handle_key(&key(KeyCode::Tab)), DialogOutcome::Ignored);
        assert_eq!(
            state.handle_key(&key(KeyCode::Char('?'))),
            DialogOutcome::Ignored
        );
        assert_eq!(
            state.handle_key(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            DialogOutcome::Ignored
        );
        assert!(state.search.is_empty());
    }
}
