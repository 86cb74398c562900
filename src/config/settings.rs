use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::ui::action::Action;
use crate::util::paths::{config_path, expand_home};

use super::default_keys::default_keybindings;
use super::keys::{parse_key_notation, KeyContext, KeybindingConfig};

/// Example configuration file contents (bundled with the binary)
pub const EXAMPLE_CONFIG: &str = include_str!("config.toml.example");

/// A command offered by the command picker
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IssueCommand {
    /// Label shown in the picker
    pub name: String,
    /// Slash command sent to the agent, followed by the issue number
    pub prompt: String,
}

impl IssueCommand {
    pub fn new(name: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prompt: prompt.into(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Account whose repositories are listed; empty means the logged-in account
    pub owner: String,
    pub repo_limit: usize,
    pub issue_limit: usize,
    /// `pgrep -f` pattern used to find agents
    pub agent_pattern: String,
    /// Display name for detected agents
    pub agent_name: String,
    /// Command typed into new tmux windows
    pub launcher: String,
    /// Directory holding repository checkouts, one per bare repository name
    pub repos_dir: PathBuf,
    /// Browser launchers, tried in order
    pub browsers: Vec<String>,
    /// Labels offered by the phase picker
    pub phases: Vec<String>,
    /// Commands offered by the command picker
    pub commands: Vec<IssueCommand>,
    pub keybindings: KeybindingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            owner: String::new(),
            repo_limit: 20,
            issue_limit: 20,
            agent_pattern: "opencode".into(),
            agent_name: "OpenCode".into(),
            launcher: "opencode".into(),
            repos_dir: expand_home("~/repos"),
            browsers: ["xdg-open", "open", "wslview", "sensible-browser"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            phases: ["tester", "implementation", "refactor", "docs", "user_test", "pr"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            commands: vec![
                IssueCommand::new("Write tests", "/tdd"),
                IssueCommand::new("Implement", "/implement"),
                IssueCommand::new("Refactor", "/refactor"),
                IssueCommand::new("Document", "/docs"),
                IssueCommand::new("Create PR", "/pr"),
            ],
            keybindings: default_keybindings(),
        }
    }
}

/// TOML representation of keybinding configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlKeybindings {
    /// Global keybindings (apply to all tabs)
    #[serde(flatten)]
    pub global: HashMap<String, String>,

    /// Issues tab keybindings
    pub issues: Option<HashMap<String, String>>,

    /// Agents tab keybindings
    pub agents: Option<HashMap<String, String>>,
}

/// TOML representation of the config file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub owner: Option<String>,
    pub repo_limit: Option<usize>,
    pub issue_limit: Option<usize>,
    pub agent_pattern: Option<String>,
    pub agent_name: Option<String>,
    pub launcher: Option<String>,
    pub repos_dir: Option<String>,
    pub browsers: Option<Vec<String>>,
    pub phases: Option<Vec<String>>,
    pub commands: Option<Vec<IssueCommand>>,
    pub keys: Option<TomlKeybindings>,
}

impl TomlKeybindings {
    /// Convert TOML keybindings to KeybindingConfig
    fn to_keybinding_config(&self) -> KeybindingConfig {
        let mut config = KeybindingConfig::new();

        for (action_name, key_str) in &self.global {
            // Context sections are handled separately
            if matches!(action_name.as_str(), "issues" | "agents") {
                continue;
            }
            if let Some((combo, action)) = parse_binding(action_name, key_str) {
                config.global.insert(combo, action);
            }
        }

        if let Some(issues) = &self.issues {
            parse_context_bindings(&mut config, KeyContext::Issues, issues);
        }
        if let Some(agents) = &self.agents {
            parse_context_bindings(&mut config, KeyContext::Agents, agents);
        }

        config
    }
}

fn parse_binding(action_name: &str, key_str: &str) -> Option<(super::KeyCombo, Action)> {
    match (parse_key_notation(key_str), parse_action(action_name)) {
        (Ok(combo), Some(action)) => Some((combo, action)),
        (Err(e), _) => {
            warn!(action = action_name, key = key_str, error = %e, "Ignoring invalid key");
            None
        }
        (_, None) => {
            warn!(action = action_name, "Ignoring unknown action");
            None
        }
    }
}

/// Parse context-specific keybindings
fn parse_context_bindings(
    config: &mut KeybindingConfig,
    context: KeyContext,
    bindings: &HashMap<String, String>,
) {
    let context_map = config.context.entry(context).or_default();
    for (action_name, key_str) in bindings {
        if let Some((combo, action)) = parse_binding(action_name, key_str) {
            context_map.insert(combo, action);
        }
    }
}

/// Parse an action name string into an Action
pub fn parse_action(name: &str) -> Option<Action> {
    match name {
        "quit" => Some(Action::Quit),
        "refresh" => Some(Action::Refresh),
        "toggle_active_filter" => Some(Action::ToggleActiveFilter),
        "show_help" => Some(Action::ShowHelp),

        "next_tab" => Some(Action::NextTab),
        "prev_tab" => Some(Action::PrevTab),

        "select_next" => Some(Action::SelectNext),
        "select_prev" => Some(Action::SelectPrev),
        "open_in_browser" => Some(Action::OpenInBrowser),
        "close_issue" => Some(Action::CloseIssue),
        "open_command_picker" => Some(Action::OpenCommandPicker),
        "open_phase_picker" => Some(Action::OpenPhasePicker),
        "new_issue" => Some(Action::NewIssue),

        _ => name
            .strip_prefix("switch_to_tab_")
            .and_then(|n| n.parse().ok())
            .map(Action::SwitchToTab),
    }
}

impl Config {
    /// Load configuration from the default location, merging with defaults
    pub fn load() -> Self {
        let config_file = config_path();

        // Create example config on first run
        if !config_file.exists() {
            Self::create_default_config(&config_file);
        }

        Self::load_from(&config_file)
    }

    /// Load configuration from `path`; a missing or invalid file yields defaults
    pub fn load_from(path: &Path) -> Self {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "No config file, using defaults");
                return Config::default();
            }
        };

        match toml::from_str::<TomlConfig>(&contents) {
            Ok(toml_config) => Config::default().apply(toml_config),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to parse config, using defaults");
                Config::default()
            }
        }
    }

    fn apply(mut self, toml: TomlConfig) -> Self {
        if let Some(owner) = toml.owner {
            self.owner = owner;
        }
        if let Some(limit) = toml.repo_limit.filter(|n| *n > 0) {
            self.repo_limit = limit;
        }
        if let Some(limit) = toml.issue_limit.filter(|n| *n > 0) {
            self.issue_limit = limit;
        }
        if let Some(pattern) = toml.agent_pattern.filter(|s| !s.is_empty()) {
            self.agent_pattern = pattern;
        }
        if let Some(name) = toml.agent_name.filter(|s| !s.is_empty()) {
            self.agent_name = name;
        }
        if let Some(launcher) = toml.launcher.filter(|s| !s.is_empty()) {
            self.launcher = launcher;
        }
        if let Some(dir) = toml.repos_dir.filter(|s| !s.is_empty()) {
            self.repos_dir = expand_home(&dir);
        }
        // Empty lists would leave a picker with nothing to pick
        if let Some(browsers) = toml.browsers.filter(|v| !v.is_empty()) {
            self.browsers = browsers;
        }
        if let Some(phases) = toml.phases.filter(|v| !v.is_empty()) {
            self.phases = phases;
        }
        if let Some(commands) = toml.commands.filter(|v| !v.is_empty()) {
            self.commands = commands;
        }
        if let Some(keys) = toml.keys {
            let user_bindings = keys.to_keybinding_config();
            self.keybindings.merge(user_bindings);
        }
        self
    }

    /// Create the default config file from the bundled example
    fn create_default_config(path: &PathBuf) {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                if let Err(e) = fs::create_dir_all(parent) {
                    warn!(error = %e, "Failed to create config directory");
                    return;
                }
            }
        }

        if let Err(e) = fs::write(path, EXAMPLE_CONFIG) {
            warn!(error = %e, "Failed to write default config");
        }
    }
}
