//! Key sequences through to the external commands they run

use std::sync::Arc;

use ai_monitor::agent::MockAgentDetector;
use ai_monitor::github::{IssueKey, MockTracker, TrackerCall, TrackerError};
use ai_monitor::ui::{run_effect, ActionOutcome, AppEvent, Effect, Services};
use ai_monitor::util::RecordingRunner;
use ai_monitor::AppState;
use crossterm::event::KeyCode;

use super::common::fixtures::{agents, issues, loaded_state, press, test_config, type_text};

fn services(tracker: Arc<MockTracker>, runner: Arc<RecordingRunner>) -> Services {
    Services {
        agents: Arc::new(MockAgentDetector::empty()),
        tracker,
        runner,
    }
}

/// Run each effect and feed the result back, as the event loop does
async fn settle(state: &mut AppState, effects: Vec<Effect>, services: &Services) {
    let config = test_config();
    for effect in effects {
        let event = run_effect(effect, services, &config).await;
        state.handle_event(event);
    }
}

fn send_keys(runner: &RecordingRunner) -> Vec<Vec<String>> {
    runner
        .argvs()
        .into_iter()
        .filter(|argv| argv.get(1).map(String::as_str) == Some("send-keys"))
        .collect()
}

#[tokio::test]
async fn test_command_picker_digit_runs_command_in_tmux() {
    let runner = Arc::new(RecordingRunner::new());
    let services = services(Arc::new(MockTracker::new()), runner.clone());
    let mut state = loaded_state(agents(), issues());

    press(&mut state, KeyCode::Enter);
    let effects = press(&mut state, KeyCode::Char('3'));
    settle(&mut state, effects, &services).await;

    let sent = send_keys(&runner);
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0][3], "ai:ai-42");
    assert_eq!(sent[0][4], r#"opencode --prompt "/refactor 42""#);
    assert!(runner
        .calls()
        .iter()
        .any(|call| call == "tmux new-window -d -t ai: -n ai-42 -c /home/u/repos/ai"));
    assert!(state.error.is_none());
}

#[tokio::test]
async fn test_tmux_failure_surfaces_as_error() {
    let runner = Arc::new(
        RecordingRunner::new()
            .fail_on("tmux has-session", "no server running")
            .fail_on("tmux new-session", "server exited unexpectedly"),
    );
    let services = services(Arc::new(MockTracker::new()), runner);
    let mut state = loaded_state(agents(), issues());

    press(&mut state, KeyCode::Enter);
    let effects = press(&mut state, KeyCode::Char('1'));
    settle(&mut state, effects, &services).await;

    let error = state.error.clone().unwrap();
    assert!(error.contains("tmux"), "{}", error);
    assert!(!state.dialog.is_open());
}

#[tokio::test]
async fn test_close_issue_flow() {
    let tracker = Arc::new(MockTracker::new());
    let services = services(tracker.clone(), Arc::new(RecordingRunner::new()));
    let mut state = loaded_state(agents(), issues());

    press(&mut state, KeyCode::Char('d'));
    let effects = press(&mut state, KeyCode::Char('y'));
    settle(&mut state, effects, &services).await;

    assert_eq!(
        tracker.calls(),
        vec![TrackerCall::Close {
            repo: "simonbrundin/ai".to_string(),
            number: 42,
        }]
    );
    assert!(state.issues.iter().all(|issue| issue.number != 42));
    assert_eq!(state.selected, Some(IssueKey::new("simonbrundin/ai", 50)));
}

#[tokio::test]
async fn test_failed_close_keeps_issue() {
    let tracker = Arc::new(MockTracker::new().failing_actions(TrackerError::RateLimited));
    let services = services(tracker, Arc::new(RecordingRunner::new()));
    let mut state = loaded_state(agents(), issues());

    press(&mut state, KeyCode::Char('d'));
    let effects = press(&mut state, KeyCode::Enter);
    settle(&mut state, effects, &services).await;

    assert_eq!(state.issues.len(), 3);
    assert_eq!(
        state.error.as_deref(),
        Some("GitHub API rate limited. Please wait and try again")
    );
    assert!(!state.dialog.is_open());
}

#[tokio::test]
async fn test_phase_label_is_persisted() {
    let tracker = Arc::new(MockTracker::new());
    let services = services(tracker.clone(), Arc::new(RecordingRunner::new()));
    let mut state = loaded_state(agents(), issues());

    press(&mut state, KeyCode::Char('p'));
    press(&mut state, KeyCode::Down);
    let effects = press(&mut state, KeyCode::Char('y'));
    settle(&mut state, effects, &services).await;

    assert_eq!(
        tracker.calls(),
        vec![TrackerCall::AddLabel {
            repo: "simonbrundin/ai".to_string(),
            number: 42,
            label: "implementation".to_string(),
        }]
    );
    assert!(state
        .selected_issue()
        .is_some_and(|issue| issue.has_label("implementation")));
}

#[tokio::test]
async fn test_new_issue_title_with_bound_letters() {
    let runner = Arc::new(RecordingRunner::new());
    let services = services(Arc::new(MockTracker::new()), runner.clone());
    let mut state = loaded_state(agents(), issues());

    press(&mut state, KeyCode::Char('n'));
    type_text(&mut state, "ai");
    press(&mut state, KeyCode::Enter);
    let typed = type_text(&mut state, "refresh docs");
    assert!(typed.is_empty());
    assert!(!state.loading);

    let effects = press(&mut state, KeyCode::Enter);
    assert_eq!(
        effects,
        vec![Effect::CreateIssue {
            repo: "simonbrundin/ai".to_string(),
            title: "refresh docs".to_string(),
        }]
    );
    settle(&mut state, effects, &services).await;

    let sent = send_keys(&runner);
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0][3], "ai:issue");
    assert_eq!(sent[0][4], r#"opencode --prompt "/issue refresh docs""#);
}

#[tokio::test]
async fn test_open_in_browser_falls_back() {
    let runner = Arc::new(RecordingRunner::new().fail_on("xdg-open", "not found"));
    let services = services(Arc::new(MockTracker::new()), runner.clone());
    let mut state = loaded_state(agents(), issues());

    let effects = press(&mut state, KeyCode::Char('o'));
    let config = test_config();
    let mut events = Vec::new();
    for effect in effects {
        events.push(run_effect(effect, &services, &config).await);
    }

    assert_eq!(
        runner.calls(),
        vec![
            "xdg-open https://github.com/simonbrundin/ai/issues/42".to_string(),
            "open https://github.com/simonbrundin/ai/issues/42".to_string(),
        ]
    );
    assert!(matches!(
        events.as_slice(),
        [AppEvent::ActionCompleted(ActionOutcome::Done(_))]
    ));
}
