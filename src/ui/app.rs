//! Terminal event loop
//!
//! One task owns [`AppState`]. Keys, ticks, resizes and background
//! completions are all funnelled into `AppState::handle_event`; the effects it
//! returns run on spawned tokio tasks that report back through the channel.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use crate::agent::AgentDetector;
use crate::config::Config;
use crate::github::{fetch_all_issues, IssueTracker};
use crate::tmux::{self, Launch};
use crate::ui::effect::Effect;
use crate::ui::events::{ActionOutcome, AppEvent, RefreshOutcome};
use crate::ui::render;
use crate::ui::state::AppState;
use crate::ui::terminal_guard::TerminalGuard;
use crate::util::{open_in_browser, CommandRunner};

const TICK_RATE: Duration = Duration::from_millis(100);

/// External collaborators, shared with background tasks
#[derive(Clone)]
pub struct Services {
    pub agents: Arc<dyn AgentDetector>,
    pub tracker: Arc<dyn IssueTracker>,
    pub runner: Arc<dyn CommandRunner>,
}

/// Main application
pub struct App {
    state: AppState,
    config: Arc<Config>,
    services: Services,
    /// Event channel sender
    event_tx: mpsc::UnboundedSender<AppEvent>,
    /// Event channel receiver
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl App {
    pub fn new(config: Config, services: Services) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        Self {
            state: AppState::new(&config),
            config: Arc::new(config),
            services,
            event_tx,
            event_rx,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Run until the user quits; the terminal is restored on every exit path
    pub async fn run(mut self) -> anyhow::Result<()> {
        let mut guard = TerminalGuard::enter()?;
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        terminal.clear()?;

        let result = self.event_loop(&mut terminal).await;

        guard.cleanup()?;
        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        let mut events = EventStream::new();
        let mut ticker = tokio::time::interval(TICK_RATE);

        // `loading` starts set, so the first refresh is spawned directly
        self.spawn_effect(Effect::Refresh);
        terminal.draw(|frame| render::draw(&self.state, frame))?;

        while !self.state.should_quit {
            let event = tokio::select! {
                _ = ticker.tick() => Some(AppEvent::Tick),
                Some(event) = self.event_rx.recv() => Some(event),
                input = events.next() => match input {
                    Some(Ok(Event::Key(key))) => Some(AppEvent::Key(key)),
                    Some(Ok(Event::Resize(width, height))) => Some(AppEvent::Resize(width, height)),
                    Some(Ok(_)) => None,
                    Some(Err(e)) => return Err(e.into()),
                    None => break,
                },
            };
            let Some(event) = event else {
                continue;
            };

            for effect in self.state.handle_event(event) {
                self.spawn_effect(effect);
            }
            terminal.draw(|frame| render::draw(&self.state, frame))?;
        }

        Ok(())
    }

    fn spawn_effect(&self, effect: Effect) {
        let services = self.services.clone();
        let config = Arc::clone(&self.config);
        let event_tx = self.event_tx.clone();
        tokio::spawn(async move {
            let event = run_effect(effect, &services, &config).await;
            // The receiver is gone once the loop has exited
            let _ = event_tx.send(event);
        });
    }
}

/// Scan agents and fetch issues concurrently
pub async fn run_refresh(
    detector: &dyn AgentDetector,
    tracker: &dyn IssueTracker,
) -> RefreshOutcome {
    let (agents, fetch) = tokio::join!(detector.detect(), fetch_all_issues(tracker));

    let mut errors = Vec::new();
    let agents = match agents {
        Ok(agents) => agents,
        Err(e) if e.is_no_agents() => Vec::new(),
        Err(e) => {
            tracing::warn!(error = %e, "Agent scan failed");
            errors.push(e.to_string());
            Vec::new()
        }
    };
    let issues = match fetch {
        Ok(fetch) => {
            if let Some(e) = fetch.error() {
                errors.push(e.to_string());
            }
            Some(fetch)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Issue fetch failed");
            errors.push(e.to_string());
            None
        }
    };

    tracing::info!(
        agents = agents.len(),
        issues = issues.as_ref().map_or(0, |fetch| fetch.issues.len()),
        "Refresh completed"
    );
    RefreshOutcome {
        agents,
        issues,
        error: (!errors.is_empty()).then(|| errors.join("; ")),
    }
}

/// Carry out one effect and describe the result as an event for the loop
pub async fn run_effect(effect: Effect, services: &Services, config: &Config) -> AppEvent {
    let outcome = match effect {
        Effect::Refresh => {
            let outcome = run_refresh(services.agents.as_ref(), services.tracker.as_ref()).await;
            return AppEvent::RefreshCompleted(outcome);
        }
        Effect::CloseIssue(key) => match services.tracker.close_issue(&key.repo, key.number).await
        {
            Ok(()) => ActionOutcome::IssueClosed(key),
            Err(e) => ActionOutcome::Failed(e.to_string()),
        },
        Effect::AddLabel { issue, label } => match services
            .tracker
            .add_label(&issue.repo, issue.number, &label)
            .await
        {
            Ok(()) => ActionOutcome::Done(format!("added {} to #{}", label, issue.number)),
            Err(e) => ActionOutcome::Failed(e.to_string()),
        },
        Effect::RunCommand { issue, prompt } => {
            let launch = Launch::for_issue(
                &config.repos_dir,
                &config.launcher,
                &issue.repo,
                issue.number,
                &prompt,
            );
            launch_outcome(services.runner.as_ref(), &launch).await
        }
        Effect::CreateIssue { repo, title } => {
            let launch = Launch::for_new_issue(&config.repos_dir, &config.launcher, &repo, &title);
            launch_outcome(services.runner.as_ref(), &launch).await
        }
        Effect::OpenUrl(url) => {
            match open_in_browser(services.runner.as_ref(), &config.browsers, &url) {
                Some(browser) => ActionOutcome::Done(format!("opened {} with {}", url, browser)),
                // Silent for the user; already logged
                None => ActionOutcome::Done(format!("no browser opened {}", url)),
            }
        }
    };
    AppEvent::ActionCompleted(outcome)
}

async fn launch_outcome(runner: &dyn CommandRunner, launch: &Launch) -> ActionOutcome {
    match tmux::launch(runner, launch).await {
        Ok(()) => ActionOutcome::Done(format!("opened {}:{}", launch.session, launch.window)),
        Err(e) => {
            tracing::warn!(error = %e, "tmux launch failed");
            ActionOutcome::Failed(e.to_string())
        }
    }
}
