//! External process execution
//!
//! Every shell-out goes through [`CommandRunner`] so the GitHub and tmux glue
//! can be exercised against [`RecordingRunner`] in tests.

use std::io::ErrorKind;
use std::process::Stdio;
use std::sync::Mutex;

use async_trait::async_trait;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("{0}: executable file not found in $PATH")]
    NotInstalled(String),
    #[error("{program} exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: String,
        stderr: String,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProcessError {
    fn from_spawn(program: &str, err: std::io::Error) -> Self {
        if err.kind() == ErrorKind::NotFound {
            ProcessError::NotInstalled(program.to_string())
        } else {
            ProcessError::Io(err)
        }
    }
}

#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run to completion and return trimmed stdout; a non-zero exit is an error carrying stderr
    async fn output(&self, program: &str, args: &[String]) -> Result<String, ProcessError>;

    /// Start without waiting for the process to finish
    fn spawn_detached(&self, program: &str, args: &[String]) -> Result<(), ProcessError>;
}

/// Runner that executes real processes with stdin detached from the TUI
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn output(&self, program: &str, args: &[String]) -> Result<String, ProcessError> {
        debug!(program, ?args, "Running command");
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| ProcessError::from_spawn(program, e))?;

        if !output.status.success() {
            return Err(ProcessError::Failed {
                program: program.to_string(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn spawn_detached(&self, program: &str, args: &[String]) -> Result<(), ProcessError> {
        debug!(program, ?args, "Spawning detached command");
        let mut child = std::process::Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| ProcessError::from_spawn(program, e))?;

        // Reap the child so it does not linger as a zombie
        std::thread::spawn(move || {
            let _ = child.wait();
        });
        Ok(())
    }
}

/// Try each launcher in order until one starts; returns the one that did
pub fn open_in_browser<'a>(
    runner: &dyn CommandRunner,
    browsers: &'a [String],
    url: &str,
) -> Option<&'a str> {
    let args = [url.to_string()];
    for browser in browsers {
        match runner.spawn_detached(browser, &args) {
            Ok(()) => return Some(browser.as_str()),
            Err(e) => debug!(browser = %browser, error = %e, "Browser launcher unavailable"),
        }
    }
    warn!(url, "No browser launcher could be started");
    None
}

/// In-memory runner that records every invocation
///
/// Commands fail when their joined command line starts with one of the
/// configured prefixes; everything else succeeds with the canned stdout.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    calls: Mutex<Vec<Vec<String>>>,
    failures: Vec<(String, String)>,
    outputs: Vec<(String, String)>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail any command line starting with `prefix`, reporting `stderr`
    pub fn fail_on(mut self, prefix: impl Into<String>, stderr: impl Into<String>) -> Self {
        self.failures.push((prefix.into(), stderr.into()));
        self
    }

    /// Return `stdout` for any command line starting with `prefix`
    pub fn respond(mut self, prefix: impl Into<String>, stdout: impl Into<String>) -> Self {
        self.outputs.push((prefix.into(), stdout.into()));
        self
    }

    /// Every recorded invocation as `program arg arg ...`
    pub fn calls(&self) -> Vec<String> {
        self.lock_calls()
            .iter()
            .map(|argv| argv.join(" "))
            .collect()
    }

    /// Every recorded invocation as an argv vector
    pub fn argvs(&self) -> Vec<Vec<String>> {
        self.lock_calls().clone()
    }

    fn lock_calls(&self) -> std::sync::MutexGuard<'_, Vec<Vec<String>>> {
        match self.calls.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn record(&self, program: &str, args: &[String]) -> Result<String, ProcessError> {
        let mut argv = Vec::with_capacity(args.len() + 1);
        argv.push(program.to_string());
        argv.extend(args.iter().cloned());
        let line = argv.join(" ");
        self.lock_calls().push(argv);

        if let Some((_, stderr)) = self.failures.iter().find(|(p, _)| line.starts_with(p)) {
            return Err(ProcessError::Failed {
                program: program.to_string(),
                status: "exit status: 1".to_string(),
                stderr: stderr.clone(),
            });
        }
        Ok(self
            .outputs
            .iter()
            .find(|(p, _)| line.starts_with(p))
            .map(|(_, out)| out.clone())
            .unwrap_or_default())
    }
}

#[async_trait]
impl CommandRunner for RecordingRunner {
    async fn output(&self, program: &str, args: &[String]) -> Result<String, ProcessError> {
        self.record(program, args)
    }

    fn spawn_detached(&self, program: &str, args: &[String]) -> Result<(), ProcessError> {
        self.record(program, args).map(|_| ())
    }
}
