//! Two-step wizard for opening an agent on a new issue
//!
//! The first step narrows the repository list with a fuzzy filter, the second
//! collects the title. Problems switch the wizard into an error step that any
//! key dismisses.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use super::{DialogFrame, DialogOutcome, InstructionBar};

/// Rows shown at once; also the reach of the digit shortcuts
const MAX_VISIBLE_REPOS: usize = 9;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardMode {
    RepoSelect,
    TitleInput { repo: String },
    Error(String),
}

/// Repository and title chosen in the wizard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIssueRequest {
    pub repo: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIssueState {
    pub mode: WizardMode,
    pub filter: String,
    pub title: String,
    repositories: Vec<String>,
    selected: usize,
}

/// Case-insensitive subsequence match
pub fn fuzzy_match(query: &str, candidate: &str) -> bool {
    let mut remaining = candidate.chars().flat_map(char::to_lowercase);
    query
        .chars()
        .flat_map(char::to_lowercase)
        .all(|wanted| remaining.any(|c| c == wanted))
}

impl NewIssueState {
    pub fn new(repositories: Vec<String>) -> Self {
        Self {
            mode: WizardMode::RepoSelect,
            filter: String::new(),
            title: String::new(),
            repositories,
            selected: 0,
        }
    }

    /// Repositories matching the current filter, in listing order
    pub fn filtered(&self) -> Vec<&str> {
        self.repositories
            .iter()
            .map(String::as_str)
            .filter(|repo| fuzzy_match(&self.filter, repo))
            .collect()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn is_title_input(&self) -> bool {
        matches!(self.mode, WizardMode::TitleInput { .. })
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> DialogOutcome<NewIssueRequest> {
        match self.mode {
            WizardMode::RepoSelect => self.handle_repo_key(key),
            WizardMode::TitleInput { .. } => self.handle_title_key(key),
            WizardMode::Error(_) => DialogOutcome::Cancel,
        }
    }

    fn handle_repo_key(&mut self, key: &KeyEvent) -> DialogOutcome<NewIssueRequest> {
        let visible = self.filtered().len();
        match key.code {
            KeyCode::Esc => return DialogOutcome::Cancel,
            KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down => {
                if self.selected + 1 < visible {
                    self.selected += 1;
                }
            }
            KeyCode::Enter => self.choose_repo(self.selected),
            KeyCode::Backspace => {
                self.filter.pop();
                self.clamp_selection();
            }
            KeyCode::Char(c) if !has_command_modifier(key) => {
                match c.to_digit(10).map(|d| d as usize) {
                    Some(digit) if digit >= 1 && digit <= visible.min(MAX_VISIBLE_REPOS) => {
                        self.choose_repo(digit - 1)
                    }
                    _ => {
                        self.filter.push(c);
                        self.clamp_selection();
                    }
                }
            }
            _ => {}
        }
        DialogOutcome::Consumed
    }

    fn clamp_selection(&mut self) {
        let len = self.filtered().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    /// First row of the visible window, keeping the selection on screen
    pub fn scroll_offset(&self) -> usize {
        (self.selected + 1).saturating_sub(MAX_VISIBLE_REPOS)
    }

    fn choose_repo(&mut self, index: usize) {
        let chosen = self.filtered().get(index).map(|repo| repo.to_string());
        self.mode = match chosen {
            Some(repo) => WizardMode::TitleInput { repo },
            None => WizardMode::Error("no repository selected".to_string()),
        };
    }

    fn handle_title_key(&mut self, key: &KeyEvent) -> DialogOutcome<NewIssueRequest> {
        match key.code {
            KeyCode::Esc => return DialogOutcome::Cancel,
            KeyCode::Enter => {
                let title = self.title.trim();
                if title.is_empty() {
                    self.mode = WizardMode::Error("issue title cannot be empty".to_string());
                    return DialogOutcome::Consumed;
                }
                if let WizardMode::TitleInput { repo } = &self.mode {
                    return DialogOutcome::Confirm(NewIssueRequest {
                        repo: repo.clone(),
                        title: title.to_string(),
                    });
                }
            }
            KeyCode::Backspace => {
                self.title.pop();
            }
            KeyCode::Char(c) if !has_command_modifier(key) => self.title.push(c),
            _ => {}
        }
        DialogOutcome::Consumed
    }
}

fn has_command_modifier(key: &KeyEvent) -> bool {
    key.modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}

pub struct NewIssueDialog<'a> {
    state: &'a NewIssueState,
}

impl<'a> NewIssueDialog<'a> {
    pub fn new(state: &'a NewIssueState) -> Self {
        Self { state }
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        match &self.state.mode {
            WizardMode::RepoSelect => self.render_repo_select(area, buf),
            WizardMode::TitleInput { repo } => self.render_title_input(repo, area, buf),
            WizardMode::Error(message) => render_error(message, area, buf),
        }
    }

    fn render_repo_select(&self, area: Rect, buf: &mut Buffer) {
        let filtered = self.state.filtered();
        let shown = filtered.len().min(MAX_VISIBLE_REPOS);
        let inner =
            DialogFrame::new("New Issue: Repository", 60, shown.max(1) as u16 + 6).render(area, buf);

        let [filter_area, _, list_area, hint_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        Paragraph::new(Line::from(vec![
            Span::styled("Filter: ", Style::default().fg(Color::DarkGray)),
            Span::raw(self.state.filter.as_str()),
            Span::styled("█", Style::default().fg(Color::Cyan)),
        ]))
        .render(filter_area, buf);

        let lines: Vec<Line> = if filtered.is_empty() {
            vec![Line::from(Span::styled(
                "No matching repositories",
                Style::default().fg(Color::DarkGray),
            ))]
        } else {
            filtered
                .iter()
                .enumerate()
                .skip(self.state.scroll_offset())
                .take(MAX_VISIBLE_REPOS)
                .map(|(i, repo)| {
                    let style = if i == self.state.selected() {
                        Style::default()
                            .fg(Color::Black)
                            .bg(Color::Cyan)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default()
                    };
                    Line::from(Span::styled(format!(" {}. {}", i + 1, repo), style))
                })
                .collect()
        };
        Paragraph::new(lines).render(list_area, buf);

        InstructionBar::new(vec![("1-9", "Pick"), ("Enter", "Select"), ("Esc", "Cancel")])
            .render(hint_area, buf);
    }

    fn render_title_input(&self, repo: &str, area: Rect, buf: &mut Buffer) {
        let inner = DialogFrame::new("New Issue: Title", 60, 7).render(area, buf);

        let [repo_area, title_area, _, hint_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(inner);

        Paragraph::new(Line::from(vec![
            Span::styled("Repository: ", Style::default().fg(Color::DarkGray)),
            Span::styled(repo, Style::default().fg(Color::Yellow)),
        ]))
        .render(repo_area, buf);

        Paragraph::new(Line::from(vec![
            Span::styled("Title: ", Style::default().fg(Color::DarkGray)),
            Span::raw(self.state.title.as_str()),
            Span::styled("█", Style::default().fg(Color::Cyan)),
        ]))
        .render(title_area, buf);

        InstructionBar::new(vec![("Enter", "Create"), ("Esc", "Cancel")]).render(hint_area, buf);
    }
}

fn render_error(message: &str, area: Rect, buf: &mut Buffer) {
    let inner = DialogFrame::new("New Issue", 50, 6)
        .border_color(Color::Red)
        .render(area, buf);

    let [message_area, hint_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);

    Paragraph::new(Span::styled(message, Style::default().fg(Color::Red)))
        .wrap(Wrap { trim: true })
        .render(message_area, buf);
    Paragraph::new(Span::styled(
        "Press any key to close",
        Style::default().fg(Color::DarkGray),
    ))
    .render(hint_area, buf);
}
