//! View-model fixtures

use std::path::PathBuf;

use ai_monitor::agent::Agent;
use ai_monitor::github::{Issue, IssueFetch};
use ai_monitor::ui::{AppEvent, Effect, RefreshOutcome};
use ai_monitor::{AppState, Config};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Defaults with a fixed checkout directory
pub fn test_config() -> Config {
    Config {
        repos_dir: PathBuf::from("/home/u/repos"),
        ..Config::default()
    }
}

pub fn issues() -> Vec<Issue> {
    vec![
        Issue::new("simonbrundin/web", 7, "Web bug").with_labels(["bug"]),
        Issue::new("simonbrundin/ai", 50, "Second"),
        Issue::new("simonbrundin/ai", 42, "Fix the thing"),
    ]
}

pub fn agents() -> Vec<Agent> {
    vec![
        Agent::new("OpenCode", "/home/u/repos/ai", 100).active(true),
        Agent::new("OpenCode", "/home/u/repos/web", 101),
    ]
}

/// State after one successful refresh
pub fn loaded_state(agents: Vec<Agent>, issues: Vec<Issue>) -> AppState {
    let mut repositories: Vec<String> = issues.iter().map(|i| i.repo.clone()).collect();
    repositories.sort();
    repositories.dedup();

    let mut state = AppState::new(&test_config());
    state.handle_event(AppEvent::RefreshCompleted(RefreshOutcome {
        agents,
        issues: Some(IssueFetch {
            repositories,
            issues,
            failed: Vec::new(),
        }),
        error: None,
    }));
    state
}

pub fn press(state: &mut AppState, code: KeyCode) -> Vec<Effect> {
    state.handle_event(AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE)))
}

pub fn type_text(state: &mut AppState, text: &str) -> Vec<Effect> {
    text.chars()
        .flat_map(|c| press(state, KeyCode::Char(c)))
        .collect()
}
