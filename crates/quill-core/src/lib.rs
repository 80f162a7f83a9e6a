//! # quill-core
//!
//! Foundation types and utilities for the Quill inline-suggestion engine.
//!
//! This crate provides the shared vocabulary that all other Quill crates
//! depend on:
//!
//! - **Tone**: [`types::Tone`] — coarse stylistic register of the document
//! - **Writing context**: [`types::WritingContext`] — the per-cycle snapshot
//!   of what the user is writing, extracted from surface geometry
//! - **Quality verdicts**: [`types::QualityVerdict`] and
//!   [`types::RejectReason`] — the outcome of the candidate quality gate
//! - **Constants**: [`constants`] — extraction, debounce, and scoring tuning
//! - **Text**: [`text`] — char-counted truncation helpers
//! - **Logging**: [`logging`] — tracing-subscriber bootstrap
//!
//! ## Crate Position
//!
//! Foundation crate. Depended on by all other quill crates.

#![deny(unsafe_code)]

pub mod constants;
pub mod logging;
pub mod text;
pub mod types;

pub use types::{QualityVerdict, RejectReason, Tone, WritingContext};
