//! Rendered screens for the main views and overlays

use ai_monitor::agent::Agent;
use ai_monitor::ui::{AppEvent, RefreshOutcome};
use ai_monitor::AppState;
use crossterm::event::KeyCode;

use super::common::fixtures::{agents, issues, loaded_state, press, test_config, type_text};
use super::common::terminal::{
    assert_screen_contains, assert_screen_lacks, buffer_to_string, render_state, row_of,
};

#[test]
fn test_issues_grouped_and_sorted() {
    let state = loaded_state(agents(), issues());
    let buffer = render_state(&state, 80, 24);

    assert_screen_contains(&buffer, "[1] Issues");
    assert_screen_contains(&buffer, "GitHub Issues");
    assert_screen_contains(&buffer, "#42 Fix the thing");
    assert_screen_contains(&buffer, "#7 Web bug [bug]");

    let first = row_of(&buffer, "#42").unwrap();
    let second = row_of(&buffer, "#50").unwrap();
    let third = row_of(&buffer, "#7 ").unwrap();
    assert!(first < second && second < third);
}

#[test]
fn test_empty_agents_is_not_an_error() {
    let mut state = AppState::new(&test_config());
    state.handle_event(AppEvent::RefreshCompleted(RefreshOutcome::default()));
    press(&mut state, KeyCode::Char('2'));

    let buffer = render_state(&state, 80, 24);
    assert_screen_contains(&buffer, "Running Agents");
    assert_screen_contains(&buffer, "No agents running");
    assert_screen_lacks(&buffer, "Error");
}

#[test]
fn test_agents_listing_and_filter() {
    let mut state = loaded_state(agents(), issues());
    press(&mut state, KeyCode::Char('2'));

    let buffer = render_state(&state, 80, 24);
    assert_screen_contains(&buffer, "OpenCode @ ai");
    assert_screen_contains(&buffer, "OpenCode @ web");
    assert_screen_contains(&buffer, "a: active");

    press(&mut state, KeyCode::Char('a'));
    let buffer = render_state(&state, 80, 24);
    assert_screen_contains(&buffer, "[Filtering: active only]");
    assert_screen_contains(&buffer, "OpenCode @ ai");
    assert_screen_lacks(&buffer, "OpenCode @ web");
    assert_screen_contains(&buffer, "a: all");
}

#[test]
fn test_agents_sharing_a_directory_render_once() {
    let mut state = loaded_state(
        vec![
            Agent::new("OpenCode", "", 10),
            Agent::new("OpenCode", "", 11),
            Agent::new("OpenCode", "/home/u/repos/ai", 12),
            Agent::new("OpenCode", "/home/u/repos/ai", 13),
        ],
        issues(),
    );
    press(&mut state, KeyCode::Char('2'));

    let screen = buffer_to_string(&render_state(&state, 80, 24));
    assert_eq!(screen.matches("OpenCode @ ai").count(), 1);
    assert_eq!(screen.matches("• OpenCode").count(), 2);
}

#[test]
fn test_error_is_an_inline_line_in_the_content_box() {
    let mut state = loaded_state(agents(), issues());
    state.error = Some("GitHub not authenticated. Run 'gh auth login'".to_string());

    let buffer = render_state(&state, 80, 24);
    // Directly after the content border, not inside a box of its own
    assert_screen_contains(&buffer, "│Error: GitHub not authenticated");
    let screen = buffer_to_string(&buffer);
    assert_eq!(screen.matches('┌').count(), 1);
    assert_screen_contains(&buffer, "#42 Fix the thing");
}

#[test]
fn test_loading_indicator() {
    let state = AppState::new(&test_config());
    let buffer = render_state(&state, 80, 24);
    assert_screen_contains(&buffer, "Loading...");
    assert_screen_lacks(&buffer, "No issues found");

    let state = loaded_state(Vec::new(), Vec::new());
    let buffer = render_state(&state, 80, 24);
    assert_screen_lacks(&buffer, "Loading...");
    assert_screen_contains(&buffer, "No issues found");
}

#[test]
fn test_terminal_too_small() {
    let state = loaded_state(agents(), issues());
    let buffer = render_state(&state, 79, 24);
    assert_screen_contains(&buffer, "Terminal too small");
    assert_screen_lacks(&buffer, "Fix the thing");

    let buffer = render_state(&state, 80, 23);
    assert_screen_contains(&buffer, "Terminal too small");
}

#[test]
fn test_render_is_pure() {
    let mut state = loaded_state(agents(), issues());
    press(&mut state, KeyCode::Char('p'));

    let first = render_state(&state, 100, 30);
    let second = render_state(&state, 100, 30);
    assert_eq!(first, second);
}

#[test]
fn test_command_picker_overlay() {
    let mut state = loaded_state(agents(), issues());
    press(&mut state, KeyCode::Enter);

    let buffer = render_state(&state, 80, 24);
    assert_screen_contains(&buffer, "Run Command");
    assert_screen_contains(&buffer, "1. Write tests");
    assert_screen_contains(&buffer, "3. Refactor");
    // The base view is still drawn around the overlay
    assert_screen_contains(&buffer, "[1] Issues");
}

#[test]
fn test_phase_picker_marks_applied_labels() {
    let mut state = loaded_state(agents(), issues());
    press(&mut state, KeyCode::Char('p'));
    press(&mut state, KeyCode::Char('1'));
    press(&mut state, KeyCode::Char('p'));

    let buffer = render_state(&state, 80, 24);
    assert_screen_contains(&buffer, "Set Phase");
    assert_screen_contains(&buffer, "tester ✓");
}

#[test]
fn test_help_without_matches() {
    let mut state = loaded_state(agents(), issues());
    press(&mut state, KeyCode::Char('?'));
    type_text(&mut state, "zzzz");

    let buffer = render_state(&state, 80, 24);
    assert_screen_contains(&buffer, "Help - Keybindings");
    assert_screen_contains(&buffer, "(no matches)");
}

#[test]
fn test_wizard_title_step() {
    let mut state = loaded_state(agents(), issues());
    press(&mut state, KeyCode::Char('n'));
    type_text(&mut state, "web");

    let buffer = render_state(&state, 80, 24);
    assert_screen_contains(&buffer, "Filter: web");
    assert_screen_contains(&buffer, "1. simonbrundin/web");
    assert_screen_lacks(&buffer, "simonbrundin/ai");

    press(&mut state, KeyCode::Enter);
    type_text(&mut state, "Add dark mode");
    let buffer = render_state(&state, 80, 24);
    assert_screen_contains(&buffer, "Repository: simonbrundin/web");
    assert_screen_contains(&buffer, "Title: Add dark mode");
}
