//! Detection of locally running coding-agent processes
//!
//! Discovery shells out to `pgrep -f <pattern>` for candidate PIDs, `pwdx`
//! for each PID's working directory and `ps` for its scheduler state.

use async_trait::async_trait;
use std::collections::HashSet;
use tokio::process::Command;
use tracing::debug;

use crate::agent::error::AgentError;

/// Working directories that agents report when they were not started inside a project
const SENTINEL_PATHS: &[&str] = &["", "**", "start", "--stdio"];

/// CPU usage (percent) above which a sleeping agent still counts as active
const ACTIVE_CPU_THRESHOLD: f32 = 1.0;

/// A detected coding-assistant process
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    pub name: String,
    pub working_dir: String,
    pub pid: u32,
    pub is_active: bool,
}

impl Agent {
    pub fn new(name: impl Into<String>, working_dir: impl Into<String>, pid: u32) -> Self {
        Self {
            name: name.into(),
            working_dir: working_dir.into(),
            pid,
            is_active: false,
        }
    }

    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Short location label shown in the agents list
    pub fn location(&self) -> &str {
        display_location(&self.working_dir)
    }
}

/// Source of the current agent snapshot
#[async_trait]
pub trait AgentDetector: Send + Sync {
    /// Scan for agents. Returns `AgentError::NoAgentsFound` when nothing matches.
    async fn detect(&self) -> Result<Vec<Agent>, AgentError>;
}

/// Detector backed by `pgrep`, `pwdx` and `ps`
#[derive(Debug, Clone)]
pub struct ProcessAgentDetector {
    name: String,
    pattern: String,
}

impl ProcessAgentDetector {
    pub fn new(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
        }
    }

    async fn find_pids(&self) -> Result<Vec<u32>, AgentError> {
        let output = Command::new("pgrep")
            .args(["-f", &self.pattern])
            .output()
            .await?;

        // pgrep exits with 1 when nothing matched; that is an empty scan, not a failure
        if !output.status.success() && output.status.code() != Some(1) {
            return Err(AgentError::CommandFailed {
                command: "pgrep".to_string(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(parse_pids(&String::from_utf8_lossy(&output.stdout)))
    }

    async fn working_dir(pid: u32) -> Option<String> {
        let output = Command::new("pwdx")
            .arg(pid.to_string())
            .output()
            .await
            .ok()?;
        if !output.status.success() {
            debug!(pid, "pwdx failed, process probably exited");
            return None;
        }
        parse_pwdx(&String::from_utf8_lossy(&output.stdout))
    }

    async fn is_active(pid: u32) -> bool {
        match Command::new("ps")
            .args(["-o", "stat=,pcpu=", "-p", &pid.to_string()])
            .output()
            .await
        {
            Ok(output) if output.status.success() => {
                parse_ps_activity(&String::from_utf8_lossy(&output.stdout))
            }
            _ => false,
        }
    }
}

#[async_trait]
impl AgentDetector for ProcessAgentDetector {
    async fn detect(&self) -> Result<Vec<Agent>, AgentError> {
        let pids = self.find_pids().await?;
        if pids.is_empty() {
            return Err(AgentError::NoAgentsFound);
        }

        let mut agents = Vec::new();
        for pid in pids {
            let Some(working_dir) = Self::working_dir(pid).await else {
                continue;
            };

            let is_active = Self::is_active(pid).await;
            agents.push(Agent::new(&self.name, working_dir, pid).active(is_active));
        }

        if agents.is_empty() {
            return Err(AgentError::NoAgentsFound);
        }
        Ok(agents)
    }
}

/// Parse `pgrep` output (one PID per line), skipping blank and malformed lines
pub fn parse_pids(output: &str) -> Vec<u32> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| line.parse().ok())
        .collect()
}

/// Parse `pwdx` output (`<pid>: <path>`) into the path
pub fn parse_pwdx(output: &str) -> Option<String> {
    let (_, path) = output.trim().split_once(':')?;
    Some(path.trim().to_string())
}

/// Parse `ps -o stat=,pcpu=` output into an activity flag
pub fn parse_ps_activity(output: &str) -> bool {
    let mut fields = output.split_whitespace();
    let running = fields
        .next()
        .is_some_and(|stat| stat.starts_with('R'));
    let busy = fields
        .next()
        .and_then(|pcpu| pcpu.parse::<f32>().ok())
        .is_some_and(|pcpu| pcpu > ACTIVE_CPU_THRESHOLD);
    running || busy
}

/// Agents to show, honoring the active-only filter
pub fn filter_active(agents: &[Agent], active_only: bool) -> Vec<&Agent> {
    agents
        .iter()
        .filter(|agent| !active_only || agent.is_active)
        .collect()
}

/// Drop repeated (name, working directory) pairs, keeping the first of each
pub fn dedup_agents<'a>(agents: impl IntoIterator<Item = &'a Agent>) -> Vec<&'a Agent> {
    let mut seen = HashSet::new();
    agents
        .into_iter()
        .filter(|&agent: &&'a Agent| {
            seen.insert((agent.name.as_str(), agent.working_dir.as_str()))
        })
        .collect()
}

/// Last path component of a working directory, or the path itself for sentinels
pub fn display_location(path: &str) -> &str {
    if SENTINEL_PATHS.contains(&path) {
        return path;
    }
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|name| !name.is_empty())
        .unwrap_or(path)
}
