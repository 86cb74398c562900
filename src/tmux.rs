//! tmux glue for launching an agent inside a repository session
//!
//! A launch reuses the session named after the repository (creating it
//! detached when missing), opens a new window and types the command into it.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::github::bare_repo_name;
use crate::util::{CommandRunner, ProcessError};

#[derive(Error, Debug)]
pub enum TmuxError {
    #[error("tmux not found. Please install tmux")]
    NotInstalled,
    #[error("failed to create tmux window: {0}")]
    Command(String),
}

impl From<ProcessError> for TmuxError {
    fn from(err: ProcessError) -> Self {
        match err {
            ProcessError::NotInstalled(_) => TmuxError::NotInstalled,
            ProcessError::Failed { stderr, .. } => TmuxError::Command(stderr),
            ProcessError::Io(e) => TmuxError::Command(e.to_string()),
        }
    }
}

/// Everything needed to start one agent run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Launch {
    pub session: String,
    pub directory: PathBuf,
    pub window: String,
    pub command: String,
}

impl Launch {
    /// Run `prompt` for an issue in a window named `<repo>-<number>`
    pub fn for_issue(repos_dir: &Path, launcher: &str, repo: &str, number: u64, prompt: &str) -> Self {
        let name = bare_repo_name(repo);
        Self {
            session: session_name(repo),
            directory: repos_dir.join(name),
            window: format!("{}-{}", name, number),
            command: prompt_command(launcher, &format!("{} {}", prompt, number)),
        }
    }

    /// Draft a new issue from `title` in a window named `issue`
    pub fn for_new_issue(repos_dir: &Path, launcher: &str, repo: &str, title: &str) -> Self {
        Self {
            session: session_name(repo),
            directory: repos_dir.join(bare_repo_name(repo)),
            window: "issue".to_string(),
            command: prompt_command(launcher, &format!("/issue {}", title)),
        }
    }
}

/// Session name for a repository; tmux reserves `.` and `:` in targets
pub fn session_name(repo: &str) -> String {
    bare_repo_name(repo).replace(['.', ':'], "_")
}

/// `<launcher> --prompt "<prompt>"` with the prompt quoted for the shell
pub fn prompt_command(launcher: &str, prompt: &str) -> String {
    let mut quoted = String::with_capacity(prompt.len() + 2);
    quoted.push('"');
    for ch in prompt.chars() {
        if matches!(ch, '"' | '\\' | '$' | '`') {
            quoted.push('\\');
        }
        quoted.push(ch);
    }
    quoted.push('"');
    format!("{} --prompt {}", launcher, quoted)
}

fn argv<const N: usize>(parts: [&str; N]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

/// Create the session detached unless it already exists
pub async fn ensure_session(
    runner: &dyn CommandRunner,
    session: &str,
    directory: &Path,
) -> Result<(), TmuxError> {
    match runner
        .output("tmux", &argv(["has-session", "-t", &format!("={}", session)]))
        .await
    {
        Ok(_) => {
            debug!(session, "Reusing tmux session");
            Ok(())
        }
        Err(ProcessError::NotInstalled(_)) => Err(TmuxError::NotInstalled),
        Err(_) => {
            let dir = directory.to_string_lossy();
            runner
                .output("tmux", &argv(["new-session", "-d", "-s", session, "-c", &dir]))
                .await?;
            info!(session, dir = %dir, "Created tmux session");
            Ok(())
        }
    }
}

/// Open the window and type the command into it
pub async fn launch(runner: &dyn CommandRunner, launch: &Launch) -> Result<(), TmuxError> {
    ensure_session(runner, &launch.session, &launch.directory).await?;

    let dir = launch.directory.to_string_lossy();
    runner
        .output(
            "tmux",
            &argv([
                "new-window",
                "-d",
                "-t",
                &format!("{}:", launch.session),
                "-n",
                &launch.window,
                "-c",
                &dir,
            ]),
        )
        .await?;

    let target = format!("{}:{}", launch.session, launch.window);
    runner
        .output("tmux", &argv(["send-keys", "-t", &target, &launch.command, "Enter"]))
        .await?;

    info!(target = %target, command = %launch.command, "Launched agent");
    Ok(())
}
