//! Error types for searchfield
//!
//! Every failure a host page or controller can hit, plus the I/O and
//! terminal errors of the binaries.

use crate::page::ElementId;
use thiserror::Error;

/// Main error type for searchfield operations
#[derive(Error, Debug)]
pub enum SearchFieldError {
    #[error("Missing {role} element (selector '{selector}')")]
    MissingElement { role: &'static str, selector: String },

    #[error("Element {0:?} is no longer part of the document")]
    StaleElement(ElementId),

    #[error("Invalid selector: '{0}'")]
    InvalidSelector(String),

    #[error("Invalid step '{0}'")]
    InvalidStep(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Terminal error: {0}")]
    TerminalError(String),

    #[error("GUI error: {0}")]
    GuiError(String),
}

/// Result type alias for searchfield operations
pub type Result<T> = std::result::Result<T, SearchFieldError>;

impl SearchFieldError {
    /// Shorthand for a missing required element
    pub fn missing(role: &'static str, selector: impl Into<String>) -> Self {
        SearchFieldError::MissingElement {
            role,
            selector: selector.into(),
        }
    }

    /// Whether the error means the page no longer has an element the
    /// controller was wired to
    pub fn is_missing_element(&self) -> bool {
        matches!(
            self,
            SearchFieldError::MissingElement { .. } | SearchFieldError::StaleElement(_)
        )
    }
}
