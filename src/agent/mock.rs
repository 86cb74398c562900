//! Canned agent detector for tests and offline runs

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::agent::detector::{Agent, AgentDetector};
use crate::agent::error::AgentError;

#[derive(Debug, Clone)]
enum MockScan {
    Agents(Vec<Agent>),
    NoAgents,
    Failure(String),
}

/// Detector that replays a fixed scan result
#[derive(Debug)]
pub struct MockAgentDetector {
    scan: MockScan,
    calls: AtomicUsize,
}

impl MockAgentDetector {
    pub fn with_agents(agents: Vec<Agent>) -> Self {
        Self::from_scan(MockScan::Agents(agents))
    }

    pub fn empty() -> Self {
        Self::from_scan(MockScan::NoAgents)
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self::from_scan(MockScan::Failure(message.into()))
    }

    fn from_scan(scan: MockScan) -> Self {
        Self {
            scan,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of scans performed so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AgentDetector for MockAgentDetector {
    async fn detect(&self) -> Result<Vec<Agent>, AgentError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.scan {
            MockScan::Agents(agents) if agents.is_empty() => Err(AgentError::NoAgentsFound),
            MockScan::Agents(agents) => Ok(agents.clone()),
            MockScan::NoAgents => Err(AgentError::NoAgentsFound),
            MockScan::Failure(message) => Err(AgentError::CommandFailed {
                command: "pgrep".to_string(),
                message: message.clone(),
            }),
        }
    }
}
