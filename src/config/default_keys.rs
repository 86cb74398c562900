//! Default keybindings
//!
//! This module defines the default keybindings that are used
//! when no user configuration is present.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyModifiers};

use super::keys::{KeyCombo, KeyContext, KeybindingConfig};
use crate::ui::action::Action;
use crate::ui::state::Tab;

/// Helper to insert a keybinding
fn bind(map: &mut HashMap<KeyCombo, Action>, key: &str, action: Action) {
    if let Ok(combo) = key.parse() {
        map.insert(combo, action);
    }
}

/// Create the default keybindings configuration
pub fn default_keybindings() -> KeybindingConfig {
    let mut config = KeybindingConfig::new();

    // ========== Global Keybindings ==========
    bind(&mut config.global, "q", Action::Quit);
    bind(&mut config.global, "C-c", Action::Quit);
    bind(&mut config.global, "r", Action::Refresh);
    bind(&mut config.global, "a", Action::ToggleActiveFilter);
    bind(&mut config.global, "?", Action::ShowHelp);

    config
        .global
        .insert(KeyCombo::new(KeyCode::Tab, KeyModifiers::NONE), Action::NextTab);
    config
        .global
        .insert(KeyCombo::new(KeyCode::BackTab, KeyModifiers::NONE), Action::PrevTab);

    for i in 1..=Tab::ALL.len() as u8 {
        bind(&mut config.global, &i.to_string(), Action::SwitchToTab(i));
    }

    // ========== Issues Tab ==========
    let issues = config.context.entry(KeyContext::Issues).or_default();

    bind(issues, "j", Action::SelectNext);
    bind(issues, "k", Action::SelectPrev);
    issues.insert(KeyCombo::new(KeyCode::Down, KeyModifiers::NONE), Action::SelectNext);
    issues.insert(KeyCombo::new(KeyCode::Up, KeyModifiers::NONE), Action::SelectPrev);
    issues.insert(KeyCombo::new(KeyCode::Enter, KeyModifiers::NONE), Action::OpenCommandPicker);
    bind(issues, "o", Action::OpenInBrowser);
    bind(issues, "d", Action::CloseIssue);
    bind(issues, "p", Action::OpenPhasePicker);
    bind(issues, "n", Action::NewIssue);

    // ========== Agents Tab ==========
    // Only global keys apply; the entry exists so user overrides have a home
    config.context.entry(KeyContext::Agents).or_default();

    config
}
