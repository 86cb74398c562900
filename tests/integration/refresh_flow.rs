//! Refresh results flowing from the collaborators into the view

use ai_monitor::agent::{Agent, MockAgentDetector};
use ai_monitor::github::{Issue, MockTracker, TrackerError};
use ai_monitor::ui::{run_refresh, AppEvent};
use ai_monitor::AppState;
use crossterm::event::KeyCode;

use super::common::fixtures::{agents, issues, loaded_state, press, test_config};
use super::common::terminal::{assert_screen_contains, assert_screen_lacks, render_state};

fn tracker_with(issues: Vec<Issue>) -> MockTracker {
    issues
        .into_iter()
        .fold(MockTracker::new(), |tracker, issue| tracker.with_issue(issue))
}

#[tokio::test]
async fn test_successful_refresh() {
    let detector = MockAgentDetector::with_agents(agents());
    let tracker = tracker_with(issues());

    let outcome = run_refresh(&detector, &tracker).await;
    assert_eq!(outcome.agents.len(), 2);
    assert_eq!(outcome.issues.as_ref().map(|f| f.issues.len()), Some(3));
    assert!(outcome.error.is_none());
    assert_eq!(detector.calls(), 1);
}

#[tokio::test]
async fn test_no_agents_is_not_an_error() {
    let detector = MockAgentDetector::empty();
    let tracker = tracker_with(issues());

    let outcome = run_refresh(&detector, &tracker).await;
    assert!(outcome.agents.is_empty());
    assert!(outcome.error.is_none());
}

#[tokio::test]
async fn test_agent_scan_failure_is_reported() {
    let detector = MockAgentDetector::failing("permission denied");
    let tracker = tracker_with(issues());

    let outcome = run_refresh(&detector, &tracker).await;
    let error = outcome.error.unwrap();
    assert!(error.contains("pgrep failed"), "{}", error);
    assert!(outcome.issues.is_some());
}

#[tokio::test]
async fn test_partial_fetch_keeps_successful_repositories() {
    let detector = MockAgentDetector::empty();
    let tracker = MockTracker::new()
        .with_issue(Issue::new("simonbrundin/ai", 1, "Works"))
        .with_repository("simonbrundin/broken")
        .with_issue(Issue::new("simonbrundin/web", 2, "Also works"))
        .failing_repo("simonbrundin/broken", TrackerError::Network);

    let outcome = run_refresh(&detector, &tracker).await;
    assert_eq!(
        outcome.error.as_deref(),
        Some("failed to fetch from repos: simonbrundin/broken")
    );

    let mut state = AppState::new(&test_config());
    state.handle_event(AppEvent::RefreshCompleted(outcome));
    assert_eq!(state.issues.len(), 2);

    let buffer = render_state(&state, 80, 24);
    assert_screen_contains(&buffer, "Error: failed to fetch from repos: simonbrundin/broken");
    assert_screen_contains(&buffer, "#1 Works");
    assert_screen_contains(&buffer, "#2 Also works");
}

#[tokio::test]
async fn test_listing_failure_keeps_previous_issues() {
    let mut state = loaded_state(agents(), issues());
    press(&mut state, KeyCode::Char('r'));
    assert!(state.loading);

    let detector = MockAgentDetector::with_agents(agents());
    let tracker = MockTracker::new().failing_listing(TrackerError::NotAuthenticated);
    let outcome = run_refresh(&detector, &tracker).await;
    state.handle_event(AppEvent::RefreshCompleted(outcome));

    assert!(!state.loading);
    assert_eq!(state.issues.len(), 3);
    let buffer = render_state(&state, 80, 24);
    assert_screen_contains(&buffer, "Error: GitHub not authenticated. Run 'gh auth login'");
    assert_screen_contains(&buffer, "#42 Fix the thing");
}

#[tokio::test]
async fn test_error_cleared_by_next_good_refresh() {
    let mut state = loaded_state(agents(), issues());
    state.error = Some("Network error. Check your internet connection".to_string());

    let detector = MockAgentDetector::with_agents(vec![Agent::new("OpenCode", "start", 9)]);
    let outcome = run_refresh(&detector, &tracker_with(issues())).await;
    state.handle_event(AppEvent::RefreshCompleted(outcome));

    assert!(state.error.is_none());
    let buffer = render_state(&state, 80, 24);
    assert_screen_lacks(&buffer, "Error:");
}

#[tokio::test]
async fn test_selection_survives_refresh_reorder() {
    let mut state = loaded_state(agents(), issues());
    press(&mut state, KeyCode::Char('j'));
    let selected = state.selected.clone();
    assert_eq!(selected.as_ref().map(|k| k.number), Some(50));

    let mut reordered = issues();
    reordered.reverse();
    reordered.push(Issue::new("simonbrundin/ai", 1, "New first"));
    let outcome = run_refresh(
        &MockAgentDetector::empty(),
        &tracker_with(reordered),
    )
    .await;
    state.handle_event(AppEvent::RefreshCompleted(outcome));

    assert_eq!(state.selected, selected);
}
