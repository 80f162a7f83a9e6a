//! Geometric layout snapshot of the rendered surface.
//!
//! A snapshot is a moment-in-time copy of the layout tree: paragraphs made
//! of wrapped lines, lines made of styled sub-spans, each with a bounding
//! box. Snapshots are cheap value types; the engine takes one per trigger
//! cycle and discards it.

use crate::geometry::Rect;

/// Font metrics at the caret, used to style the ghost overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    /// CSS font family.
    pub family: String,
    /// Font size in pixels.
    pub size_px: f64,
    /// CSS weight (400 normal, 700 bold, …).
    pub weight: u16,
    /// Line height in pixels.
    pub line_height: f64,
    /// Letter spacing in pixels.
    pub letter_spacing: f64,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: "serif".to_owned(),
            size_px: 16.0,
            weight: 400,
            line_height: 24.0,
            letter_spacing: 0.0,
        }
    }
}

/// A run of uniformly-styled text within one rendered line.
#[derive(Debug, Clone, PartialEq)]
pub struct SpanLayout {
    /// Bounding box of the run.
    pub rect: Rect,
    /// The run's text.
    pub text: String,
}

/// One rendered (possibly soft-wrapped) line of a paragraph.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineLayout {
    /// Bounding box of the line.
    pub rect: Rect,
    /// Sub-spans in left-to-right order.
    pub spans: Vec<SpanLayout>,
}

impl LineLayout {
    /// The line's text: its spans concatenated in order.
    #[must_use]
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

/// A paragraph-level block with its wrapped lines.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParagraphLayout {
    /// Bounding box of the whole paragraph.
    pub rect: Rect,
    /// Rendered lines in top-to-bottom order.
    pub lines: Vec<LineLayout>,
}

impl ParagraphLayout {
    /// The paragraph's plain text with soft wraps undone.
    ///
    /// Wrapped lines are rejoined with a single space unless the break
    /// already sits next to whitespace.
    #[must_use]
    pub fn text(&self) -> String {
        join_wrapped(self.lines.iter().map(LineLayout::text))
    }
}

/// Moment-in-time copy of the surface's rendered layout.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SurfaceSnapshot {
    /// Paragraph blocks in document order.
    pub paragraphs: Vec<ParagraphLayout>,
    /// Caret bounding box, absent when the surface has no caret indicator.
    pub caret: Option<Rect>,
    /// Font metrics at the caret.
    pub caret_font: FontSpec,
}

/// Rejoin soft-wrapped fragments, inserting a space at breaks where neither
/// side already carries one.
///
/// Extraction uses this for partially-consumed paragraphs, so it is public.
pub fn join_wrapped<I>(fragments: I) -> String
where
    I: IntoIterator<Item = String>,
{
    let mut out = String::new();
    for fragment in fragments {
        if fragment.is_empty() {
            continue;
        }
        if !out.is_empty()
            && !out.ends_with(char::is_whitespace)
            && !fragment.starts_with(char::is_whitespace)
        {
            out.push(' ');
        }
        out.push_str(&fragment);
    }
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
