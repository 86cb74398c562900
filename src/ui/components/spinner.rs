use ratatui::{
    style::{Color, Style},
    text::Span,
};

const FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Animated spinner shown while a refresh is in flight
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spinner {
    frames: &'static [&'static str],
    tick: usize,
}

impl Spinner {
    /// Create a new spinner with default frames
    pub fn new() -> Self {
        Self {
            frames: FRAMES,
            tick: 0,
        }
    }

    /// Advance to the next frame
    pub fn tick(&mut self) {
        self.tick = (self.tick + 1) % self.frames.len();
    }

    /// Get current frame
    pub fn frame(&self) -> &'static str {
        self.frames[self.tick % self.frames.len()]
    }

    /// Get current frame with label
    pub fn with_label(&self, label: &str, color: Color) -> Vec<Span<'static>> {
        vec![
            Span::styled(self.frame().to_string(), Style::default().fg(color)),
            Span::raw(" "),
            Span::styled(label.to_string(), Style::default().fg(color)),
        ]
    }
}

impl Default for Spinner {
    fn default() -> Self {
        Self::new()
    }
}
