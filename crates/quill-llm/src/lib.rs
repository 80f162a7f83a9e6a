//! # quill-llm
//!
//! The boundary between the suggestion engine and the external completion
//! service.
//!
//! - **Trait**: [`CompletionService`] — one method, one error contract.
//!   Provider selection, transport, authentication, and prompt caching all
//!   live behind implementations of this trait, outside this workspace.
//! - **Errors**: [`CompletionError`] — a `Disabled` variant models the
//!   host-configured suppression signal (wire message `"disabled"`), which
//!   the pipeline treats as expected rather than a fault.
//! - **Test double**: [`testutil::ScriptedCompletions`] — a queue-backed
//!   fake used by engine tests.
//!
//! ## Crate Position
//!
//! Leaf crate. Depended on by quill-engine.

#![deny(unsafe_code)]

pub mod errors;
pub mod testutil;

pub use errors::CompletionError;

use async_trait::async_trait;

/// A system/user prompt pair sent to the completion service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    /// Instruction template with tone guidance and anti-pattern rules.
    pub system: String,
    /// Assembled writing context with the continuation instruction.
    pub user: String,
}

impl CompletionRequest {
    /// Build a request from its two prompt halves.
    #[must_use]
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
        }
    }
}

/// External text-completion provider.
///
/// Calls may be slow and may be memoized by the implementation; callers must
/// guard every continuation with their own staleness check rather than rely
/// on timing. An `Ok` result may be the empty string — the prompt explicitly
/// allows it when no good continuation exists.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Request one completion for the given prompt pair.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
