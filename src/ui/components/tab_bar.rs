use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// Numbered tab strip; the number doubles as the switch key
pub struct TabBar<'a> {
    tabs: Vec<&'a str>,
    active: usize,
    trailing: Vec<Span<'a>>,
}

impl<'a> TabBar<'a> {
    pub fn new(tabs: Vec<&'a str>, active: usize) -> Self {
        Self {
            tabs,
            active,
            trailing: Vec::new(),
        }
    }

    /// Spans drawn after the last tab, such as a loading indicator
    pub fn trailing(mut self, spans: Vec<Span<'a>>) -> Self {
        self.trailing = spans;
        self
    }

    pub fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = Vec::new();

        for (i, tab) in self.tabs.iter().enumerate() {
            let is_active = i == self.active;

            if is_active {
                spans.push(Span::styled(" ▶ ", Style::default().fg(Color::Cyan)));
            } else {
                spans.push(Span::raw("   "));
            }

            let tab_style = if is_active {
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };

            spans.push(Span::styled(format!("[{}] {}", i + 1, tab), tab_style));
            spans.push(Span::raw("  "));
        }

        spans.extend(self.trailing);

        Paragraph::new(Line::from(spans))
            .style(Style::default().bg(Color::Rgb(20, 20, 20)))
            .render(area, buf);
    }
}
