//! TUI testing utilities using Ratatui's TestBackend
//!
//! Renders an [`AppState`] into a test buffer and turns the output into
//! strings for assertions.

use ai_monitor::ui::render;
use ai_monitor::AppState;
use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

/// Create a test terminal with the minimum supported dimensions (80x24)
pub fn create_test_terminal() -> Terminal<TestBackend> {
    create_test_terminal_sized(80, 24)
}

/// Create a test terminal with custom dimensions
pub fn create_test_terminal_sized(width: u16, height: u16) -> Terminal<TestBackend> {
    let backend = TestBackend::new(width, height);
    Terminal::new(backend).expect("Failed to create test terminal")
}

/// Draw `state` once and return a copy of the resulting buffer
pub fn render_state(state: &AppState, width: u16, height: u16) -> Buffer {
    let mut terminal = create_test_terminal_sized(width, height);
    terminal
        .draw(|frame| render::draw(state, frame))
        .expect("Failed to draw state");
    terminal.backend().buffer().clone()
}

/// Convert a buffer to a string, one terminal row per line
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut output = String::new();

    for y in area.y..area.y + area.height {
        for x in area.x..area.x + area.width {
            if let Some(cell) = buffer.cell((x, y)) {
                output.push_str(cell.symbol());
            }
        }
        output.push('\n');
    }

    output
}

/// Check if the buffer contains a string anywhere
pub fn buffer_contains(buffer: &Buffer, text: &str) -> bool {
    buffer_to_string(buffer).contains(text)
}

/// Row index of the first line containing `text`
pub fn row_of(buffer: &Buffer, text: &str) -> Option<usize> {
    buffer_to_string(buffer)
        .lines()
        .position(|line| line.contains(text))
}

/// Assert that the buffer contains `expected`, printing the screen if not
pub fn assert_screen_contains(buffer: &Buffer, expected: &str) {
    let actual = buffer_to_string(buffer);
    assert!(
        actual.contains(expected),
        "Screen does not contain expected text.\nExpected: {}\nActual:\n{}",
        expected,
        actual
    );
}

/// Assert that the buffer does not contain `unexpected`
pub fn assert_screen_lacks(buffer: &Buffer, unexpected: &str) {
    let actual = buffer_to_string(buffer);
    assert!(
        !actual.contains(unexpected),
        "Screen unexpectedly contains text.\nUnexpected: {}\nActual:\n{}",
        unexpected,
        actual
    );
}
