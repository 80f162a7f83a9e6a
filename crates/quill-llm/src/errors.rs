//! Completion-service error contract.

use thiserror::Error;

/// Message that signals user-configured suppression rather than a fault.
pub const DISABLED_MESSAGE: &str = "disabled";

/// Errors surfaced by a [`crate::CompletionService`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CompletionError {
    /// Suggestions are turned off on the host side. Expected, never logged
    /// as a failure.
    #[error("completions disabled")]
    Disabled,

    /// Provider or network failure with the provider's message.
    #[error("completion service error: {0}")]
    Service(String),

    /// The provider did not answer within its own deadline.
    #[error("completion request timed out")]
    Timeout,
}

impl CompletionError {
    /// Map a raw provider error message onto the contract.
    ///
    /// Exactly `"disabled"` becomes [`CompletionError::Disabled`]; anything
    /// else is a [`CompletionError::Service`] fault.
    #[must_use]
    pub fn from_message(message: impl Into<String>) -> Self {
        let message = message.into();
        if message == DISABLED_MESSAGE {
            Self::Disabled
        } else {
            Self::Service(message)
        }
    }

    /// Whether this error is the expected suppression signal.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        matches!(self, Self::Disabled)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
