//! # quill-surface
//!
//! Abstraction over the host's rendered text surface.
//!
//! The suggestion engine never touches the host editor directly. It sees the
//! surface through two narrow capabilities:
//!
//! - **Snapshots**: [`SurfaceSnapshot`] — the geometric layout of paragraphs,
//!   lines, and sub-spans with bounding boxes, plus the caret box and the
//!   font metrics at the caret
//! - **Change notifications**: a broadcast feed of [`SurfaceChange`] values,
//!   one per rendered-content mutation
//!
//! [`testutil::ScriptedSurface`] provides a scripted implementation for
//! tests in dependent crates.
//!
//! ## Crate Position
//!
//! Leaf crate. Depended on by quill-context and quill-engine.

#![deny(unsafe_code)]

pub mod geometry;
pub mod snapshot;
pub mod testutil;

pub use geometry::Rect;
pub use snapshot::{FontSpec, LineLayout, ParagraphLayout, SpanLayout, SurfaceSnapshot};

use tokio::sync::broadcast;

/// Notification that the surface's rendered content changed.
///
/// Carries no payload: consumers re-query geometry through
/// [`TextSurface::snapshot`] when they care.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct SurfaceChange;

/// The host editing surface, as seen by the suggestion engine.
///
/// Implementations wrap whatever rendering stack the host uses; the engine
/// only requires that geometry is queryable and that content mutations are
/// observable.
pub trait TextSurface: Send + Sync {
    /// Capture the current rendered layout and caret position.
    fn snapshot(&self) -> SurfaceSnapshot;

    /// Subscribe to content-change notifications.
    ///
    /// Each call returns an independent receiver; missed messages (receiver
    /// lag) are acceptable because any later change re-triggers the same
    /// work.
    fn changes(&self) -> broadcast::Receiver<SurfaceChange>;
}
