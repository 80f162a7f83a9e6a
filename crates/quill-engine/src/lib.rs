//! # quill-engine
//!
//! The suggestion engine: everything between a surface-change notification
//! and ghost text at the caret.
//!
//! - **Pipeline**: [`SuggestionPipeline`] — debounced triggering, the
//!   private generation counter, completion calls with one quality retry
//! - **Quality**: [`quality::validate`] — rejection ladder plus a 0–100
//!   heuristic score with a configurable floor
//! - **Prompts**: [`prompt`] — tone-aware system prompt and context-built
//!   user prompt, with the amended retry variant
//! - **Overlay**: [`SuggestionOverlay`] — presentation state machine with
//!   the fade-out handshake and caret tracking
//! - **Config**: [`EngineConfig`] — tuning resolved from quill-settings
//!
//! External collaborators plug in behind three traits: the completion
//! service ([`quill_llm::CompletionService`]), the overlay host
//! ([`OverlayHost`]), and the text injector ([`TextInjector`]).
//!
//! ## Crate Position
//!
//! Top of the workspace. Depends on every other quill crate.

#![deny(unsafe_code)]

pub mod config;
pub mod injector;
pub mod overlay;
pub mod pipeline;
pub mod prompt;
pub mod quality;
pub mod testutil;

pub use config::EngineConfig;
pub use injector::TextInjector;
pub use overlay::{OverlayHost, OverlayState, SuggestionOverlay};
pub use pipeline::{PipelinePhase, SuggestionPipeline};
