//! Application configuration
//!
//! Loaded from a JSON file; every field is optional and falls back to the
//! defaults below.

use crate::controller::{ClearFocus, Options, ResultWiring};
use crate::error::Result;
use crate::logging::LogLevel;
use crate::page::Selector;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// How each page role is located
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub search_field: Selector,
    pub clear_button: Selector,
    pub results: Selector,
    pub loading: Selector,
    pub result_link: Selector,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            search_field: Selector::Class("search-field".into()),
            clear_button: Selector::Class("clear-button".into()),
            results: Selector::Class("search-results".into()),
            loading: Selector::Class("loading".into()),
            result_link: Selector::Class("result-link".into()),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Selectors for the page roles
    pub selectors: Selectors,
    /// Whether the search field gets focus back after clearing
    pub focus_after_clear: ClearFocus,
    /// Whether result links are wired once or matched at click time
    pub result_wiring: ResultWiring,
    /// Minimum level written to the log file
    pub log_level: LogLevel,
    /// Log file path; next to the executable when unset
    pub log_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            selectors: Selectors::default(),
            focus_after_clear: ClearFocus::Restore,
            result_wiring: ResultWiring::Snapshot,
            log_level: LogLevel::Info,
            log_file: None,
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Load `path` if given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text)?;
        Ok(())
    }

    pub fn controller_options(&self) -> Options {
        Options {
            focus_after_clear: self.focus_after_clear,
            result_wiring: self.result_wiring,
        }
    }
}
