//! # quill-context
//!
//! Turns a rendered-surface snapshot into a structured [`WritingContext`].
//!
//! - **Extractor**: [`extractor::extract`] — locates the caret inside the
//!   layout tree, gathers the text consumed so far, and isolates the active
//!   sentence
//! - **Tone**: [`tone::classify`] — keyword-lexicon scoring over the
//!   extracted text
//!
//! The caret-to-text mapping is a best-effort geometric heuristic: the span
//! under the caret is truncated by pixel ratio, which can be off by a
//! character at the boundary. Consumers must not assume exactness.
//!
//! ## Crate Position
//!
//! Depends on: quill-core, quill-surface. Depended on by: quill-engine.

#![deny(unsafe_code)]

pub mod extractor;
pub mod tone;

pub use extractor::extract;
pub use tone::classify;

pub use quill_core::WritingContext;
