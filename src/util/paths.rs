//! Path utilities for the ai-monitor data directory

use std::path::{Path, PathBuf};

/// Get the base data directory (~/.ai-monitor)
pub fn data_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".ai-monitor"))
        .unwrap_or_else(|| PathBuf::from(".ai-monitor"))
}

/// Get the logs directory (~/.ai-monitor/logs)
pub fn logs_dir() -> PathBuf {
    data_dir().join("logs")
}

/// Get the log file path (~/.ai-monitor/logs/ai-monitor.log)
pub fn log_file_path() -> PathBuf {
    logs_dir().join("ai-monitor.log")
}

/// Get the config file path (~/.ai-monitor/config.toml)
pub fn config_path() -> PathBuf {
    data_dir().join("config.toml")
}

/// Expand a leading `~` to the home directory
pub fn expand_home(path: &str) -> PathBuf {
    if path == "~" {
        return dirs::home_dir().unwrap_or_else(|| PathBuf::from(path));
    }
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => Path::new(path).to_path_buf(),
    }
}
