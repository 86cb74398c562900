//! Tool availability detection
//!
//! The dashboard shells out to a handful of binaries. Missing ones are
//! reported once at startup; the collaborators surface their own errors when
//! a call actually fails.

use std::path::PathBuf;

/// External tools the dashboard depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    /// GitHub CLI, needed for every issue operation
    Gh,
    /// Terminal multiplexer, needed to launch agents
    Tmux,
    Pgrep,
    Pwdx,
    Ps,
}

impl Tool {
    pub fn binary_name(&self) -> &'static str {
        match self {
            Tool::Gh => "gh",
            Tool::Tmux => "tmux",
            Tool::Pgrep => "pgrep",
            Tool::Pwdx => "pwdx",
            Tool::Ps => "ps",
        }
    }

    pub fn install_hint(&self) -> &'static str {
        match self {
            Tool::Gh => "https://cli.github.com",
            Tool::Tmux => "https://github.com/tmux/tmux/wiki/Installing",
            Tool::Pgrep | Tool::Pwdx | Tool::Ps => "install procps",
        }
    }

    pub fn all() -> &'static [Tool] {
        &[Tool::Gh, Tool::Tmux, Tool::Pgrep, Tool::Pwdx, Tool::Ps]
    }
}

/// Resolved location of each tool, `None` when not on `PATH`
#[derive(Debug, Clone, Default)]
pub struct ToolAvailability {
    found: Vec<(Tool, Option<PathBuf>)>,
}

impl ToolAvailability {
    pub fn detect() -> Self {
        Self::detect_with(|tool| which::which(tool.binary_name()).ok())
    }

    /// Detect using a custom lookup, used by tests
    pub fn detect_with(lookup: impl Fn(Tool) -> Option<PathBuf>) -> Self {
        Self {
            found: Tool::all().iter().map(|&tool| (tool, lookup(tool))).collect(),
        }
    }

    pub fn is_available(&self, tool: Tool) -> bool {
        self.path(tool).is_some()
    }

    pub fn path(&self, tool: Tool) -> Option<&PathBuf> {
        self.found
            .iter()
            .find(|(t, _)| *t == tool)
            .and_then(|(_, path)| path.as_ref())
    }

    pub fn missing_tools(&self) -> Vec<Tool> {
        Tool::all()
            .iter()
            .copied()
            .filter(|&tool| !self.is_available(tool))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_names() {
        assert_eq!(Tool::Gh.binary_name(), "gh");
        assert_eq!(Tool::Tmux.binary_name(), "tmux");
        assert_eq!(Tool::Pwdx.binary_name(), "pwdx");
    }

    #[test]
    fn test_missing_tools() {
        let availability = ToolAvailability::detect_with(|tool| match tool {
            Tool::Gh | Tool::Ps => Some(PathBuf::from("/usr/bin").join(tool.binary_name())),
            _ => None,
        });

        assert!(availability.is_available(Tool::Gh));
        assert!(!availability.is_available(Tool::Tmux));
        assert_eq!(
            availability.path(Tool::Ps),
            Some(&PathBuf::from("/usr/bin/ps"))
        );
        assert_eq!(
            availability.missing_tools(),
            vec![Tool::Tmux, Tool::Pgrep, Tool::Pwdx]
        );
    }
}
