//! Pure rendering of [`AppState`]
//!
//! Nothing here performs I/O or mutates state; the same state always draws
//! the same buffer. At most one dialog is composited on top of the base view.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::config::KeyContext;
use crate::github::{Issue, IssueKey};
use crate::ui::action::Action;
use crate::ui::components::{
    CommandPicker, ConfirmCloseDialog, HelpDialog, NewIssueDialog, PhasePicker, TabBar,
};
use crate::ui::grouping::{group_by_repository, sorted_group_names};
use crate::ui::state::{AppState, Dialog, Tab};

pub const MIN_WIDTH: u16 = 80;
pub const MIN_HEIGHT: u16 = 24;

/// Narrowest a title is ever cut to
const MIN_TITLE_WIDTH: usize = 10;

pub fn draw(state: &AppState, frame: &mut Frame) {
    let area = frame.area();
    render(state, area, frame.buffer_mut());
}

pub fn render(state: &AppState, area: Rect, buf: &mut Buffer) {
    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        render_too_small(area, buf);
        return;
    }

    let [header_area, content_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(state, header_area, buf);
    render_content(state, content_area, buf);
    render_footer(state, footer_area, buf);
    render_dialog(state, area, buf);
}

fn render_too_small(area: Rect, buf: &mut Buffer) {
    let lines = vec![
        Line::from(Span::styled(
            "Terminal too small",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(format!(
            "Need at least {}x{}, got {}x{}",
            MIN_WIDTH, MIN_HEIGHT, area.width, area.height
        )),
    ];
    let top = area.height.saturating_sub(lines.len() as u16) / 2;
    let centered = Rect {
        y: area.y + top,
        height: area.height.saturating_sub(top),
        ..area
    };
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(centered, buf);
}

fn render_header(state: &AppState, area: Rect, buf: &mut Buffer) {
    let titles = Tab::ALL.iter().map(Tab::title).collect();
    let trailing = if state.loading {
        state.spinner.with_label("Loading...", Color::Yellow)
    } else {
        Vec::new()
    };
    TabBar::new(titles, state.tab.index())
        .trailing(trailing)
        .render(area, buf);
}

fn render_content(state: &AppState, area: Rect, buf: &mut Buffer) {
    let title = match state.tab {
        Tab::Issues => " GitHub Issues ",
        Tab::Agents => " Running Agents ",
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    block.render(area, buf);

    let mut lines = Vec::new();
    if let Some(error) = &state.error {
        lines.push(Line::from(Span::styled(
            format!("Error: {}", error),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
    }
    if state.loading {
        let mut spans = state.spinner.with_label("Loading...", Color::Yellow);
        spans.insert(0, Span::raw(" "));
        lines.push(Line::from(spans));
    }

    let selected_line = match state.tab {
        Tab::Agents => {
            agent_lines(state, &mut lines);
            None
        }
        Tab::Issues => issue_lines(state, inner.width as usize, &mut lines),
    };

    // Keep the selected issue on screen
    let height = inner.height as usize;
    let offset = match selected_line {
        Some(line) if line >= height => line + 1 - height,
        _ => 0,
    };

    Paragraph::new(lines)
        .scroll((offset as u16, 0))
        .render(inner, buf);
}

fn agent_lines(state: &AppState, lines: &mut Vec<Line<'_>>) {
    if state.active_only {
        lines.push(Line::from(Span::styled(
            " [Filtering: active only]",
            Style::default().fg(Color::Yellow),
        )));
    }

    let agents = state.visible_agents();
    if agents.is_empty() {
        if !state.loading {
            lines.push(Line::from(Span::styled(
                " No agents running",
                Style::default().fg(Color::DarkGray),
            )));
        }
        return;
    }

    for agent in agents {
        let marker = if agent.is_active {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        lines.push(Line::from(vec![
            Span::styled(" • ", marker),
            Span::styled(
                agent.name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(" @ "),
            Span::styled(agent.location().to_string(), Style::default().fg(Color::Cyan)),
        ]));
    }
}

/// Append the grouped issue list; returns the line index of the selection
fn issue_lines(state: &AppState, width: usize, lines: &mut Vec<Line<'_>>) -> Option<usize> {
    if state.issues.is_empty() {
        if !state.loading {
            lines.push(Line::from(Span::styled(
                " No issues found",
                Style::default().fg(Color::DarkGray),
            )));
        }
        return None;
    }

    let grouped = group_by_repository(&state.issues);
    let mut selected_line = None;
    for name in sorted_group_names(&grouped) {
        lines.push(Line::from(Span::styled(
            format!(" 📁 {}", name),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )));
        for issue in grouped.get(name).into_iter().flatten() {
            let is_selected = state
                .selected
                .as_ref()
                .is_some_and(|key| issue.matches(key));
            if is_selected {
                selected_line = Some(lines.len());
            }
            lines.push(issue_line(issue, width, is_selected));
        }
    }
    selected_line
}

fn issue_line(issue: &Issue, width: usize, is_selected: bool) -> Line<'static> {
    let prefix = format!("   #{} ", issue.number);
    let labels = if issue.labels.is_empty() {
        String::new()
    } else {
        format!(" [{}]", issue.labels.join(", "))
    };
    let available = width
        .saturating_sub(prefix.width() + labels.width())
        .max(MIN_TITLE_WIDTH);
    let title = truncate_to_width(&issue.title, available);

    let base = if is_selected {
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::styled(prefix, base.fg(Color::Yellow)),
        Span::styled(title, base),
        Span::styled(labels, base.fg(Color::Magenta)),
    ])
}

/// Truncate a string to fit within a maximum display width, adding "..." if truncated.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    let ellipsis = "...";
    let ellipsis_width = UnicodeWidthStr::width(ellipsis);

    if max_width <= ellipsis_width {
        return s.chars().take(max_width).collect();
    }

    if UnicodeWidthStr::width(s) <= max_width {
        return s.to_string();
    }

    let target_width = max_width - ellipsis_width;
    let mut width = 0;
    let mut result = String::new();

    for c in s.chars() {
        let char_width = UnicodeWidthChar::width(c).unwrap_or(0);
        if width + char_width > target_width {
            break;
        }
        result.push(c);
        width += char_width;
    }

    result.push_str(ellipsis);
    result
}

fn render_footer(state: &AppState, area: Rect, buf: &mut Buffer) {
    let context = KeyContext::from_tab(state.tab);
    let filter_label = if state.active_only { "all" } else { "active" };

    let mut hints: Vec<(Vec<Action>, &str)> = match state.tab {
        Tab::Issues => vec![
            (vec![Action::SelectNext, Action::SelectPrev], "move"),
            (vec![Action::OpenCommandPicker], "run"),
            (vec![Action::OpenInBrowser], "open"),
            (vec![Action::CloseIssue], "close"),
            (vec![Action::OpenPhasePicker], "phase"),
            (vec![Action::NewIssue], "new"),
        ],
        Tab::Agents => vec![(vec![Action::ToggleActiveFilter], filter_label)],
    };
    hints.extend([
        (vec![Action::Refresh], "refresh"),
        (vec![Action::ShowHelp], "help"),
        (vec![Action::Quit], "quit"),
    ]);

    let mut spans = vec![Span::raw(" ")];
    for (actions, label) in hints {
        let keys: Vec<String> = actions
            .iter()
            .filter_map(|action| state.keybindings.key_for(action, context))
            .collect();
        if keys.is_empty() {
            continue;
        }
        if spans.len() > 1 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(keys.join("/"), Style::default().fg(Color::Cyan)));
        spans.push(Span::styled(
            format!(": {}", label),
            Style::default().fg(Color::DarkGray),
        ));
    }

    Paragraph::new(Line::from(spans)).render(area, buf);
}

fn render_dialog(state: &AppState, area: Rect, buf: &mut Buffer) {
    match &state.dialog {
        Dialog::None => {}
        Dialog::Help(help) => HelpDialog::new(help).render(area, buf),
        Dialog::ConfirmClose(confirm) => ConfirmCloseDialog::new(confirm).render(area, buf),
        Dialog::CommandPicker(picker) => {
            let title = issue_title(state, &picker.target);
            CommandPicker::new(picker, &state.commands, title).render(area, buf)
        }
        Dialog::PhasePicker(picker) => {
            let issue = state.issues.iter().find(|i| i.matches(&picker.target));
            PhasePicker::new(picker, &state.phases, issue).render(area, buf)
        }
        Dialog::NewIssue(wizard) => NewIssueDialog::new(wizard).render(area, buf),
    }
}

fn issue_title<'a>(state: &'a AppState, key: &IssueKey) -> &'a str {
    state
        .issues
        .iter()
        .find(|issue| issue.matches(key))
        .map_or("", |issue| issue.title.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("a long issue title", 10), "a long ...");
        assert_eq!(truncate_to_width("abcdef", 3), "abc");
    }

    #[test]
    fn test_issue_line_keeps_minimum_title() {
        let issue = Issue::new("o/r", 1, "a very long title that will not fit")
            .with_labels(["bug", "implementation"]);
        let line = issue_line(&issue, 20, false);
        assert_eq!(line.spans[1].content, "a very ...");
    }

    #[test]
    fn test_issue_line_fits_width() {
        let issue = Issue::new("o/r", 42, "Fix the thing");
        let line = issue_line(&issue, 78, false);
        assert_eq!(line.spans[0].content, "   #42 ");
        assert_eq!(line.spans[1].content, "Fix the thing");
        assert_eq!(line.spans[2].content, "");
    }
}
