//! Shared test utilities for surface consumers.
//!
//! Provides [`MonoLayout`] — a monospace layout builder that turns plain
//! strings into a geometrically consistent [`SurfaceSnapshot`] — and
//! [`ScriptedSurface`], a [`TextSurface`] whose snapshot and change feed are
//! driven by the test.

use parking_lot::Mutex;
use tokio::sync::broadcast;

use crate::geometry::Rect;
use crate::snapshot::{FontSpec, LineLayout, ParagraphLayout, SpanLayout, SurfaceSnapshot};
use crate::{SurfaceChange, TextSurface};

/// Monospace layout builder.
///
/// Every char is `char_width` px wide and every line `line_height` px tall,
/// so tests can compute caret coordinates from character offsets instead of
/// hand-picking pixels.
pub struct MonoLayout {
    /// Width of one character cell.
    pub char_width: f64,
    /// Height of one rendered line.
    pub line_height: f64,
    /// Vertical gap between paragraphs.
    pub paragraph_gap: f64,
    /// Left margin of all text.
    pub margin_x: f64,
    cursor_y: f64,
    paragraphs: Vec<ParagraphLayout>,
}

impl Default for MonoLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl MonoLayout {
    /// A builder with 8×20 px character cells and a 12 px paragraph gap.
    #[must_use]
    pub fn new() -> Self {
        Self {
            char_width: 8.0,
            line_height: 20.0,
            paragraph_gap: 12.0,
            margin_x: 10.0,
            cursor_y: 10.0,
            paragraphs: Vec::new(),
        }
    }

    /// Append a paragraph whose rendered lines each hold one span.
    pub fn paragraph(&mut self, lines: &[&str]) -> &mut Self {
        let spanned: Vec<Vec<&str>> = lines.iter().map(|l| vec![*l]).collect();
        self.paragraph_spanned(&spanned)
    }

    /// Append a paragraph with explicit sub-spans per line.
    pub fn paragraph_spanned(&mut self, lines: &[Vec<&str>]) -> &mut Self {
        let top = self.cursor_y;
        let mut laid_lines = Vec::new();
        let mut max_right = self.margin_x;

        for line_spans in lines {
            let line_y = self.cursor_y;
            let mut x = self.margin_x;
            let mut spans = Vec::new();
            for text in line_spans {
                let width = text.chars().count() as f64 * self.char_width;
                spans.push(SpanLayout {
                    rect: Rect::new(x, line_y, width, self.line_height),
                    text: (*text).to_owned(),
                });
                x += width;
            }
            max_right = max_right.max(x);
            laid_lines.push(LineLayout {
                rect: Rect::new(self.margin_x, line_y, x - self.margin_x, self.line_height),
                spans,
            });
            self.cursor_y += self.line_height;
        }

        self.paragraphs.push(ParagraphLayout {
            rect: Rect::new(
                self.margin_x,
                top,
                max_right - self.margin_x,
                self.cursor_y - top,
            ),
            lines: laid_lines,
        });
        self.cursor_y += self.paragraph_gap;
        self
    }

    /// Caret box positioned `chars` character cells into the given line.
    ///
    /// `chars` may be fractional to land mid-character.
    #[must_use]
    pub fn caret_at(&self, paragraph: usize, line: usize, chars: f64) -> Rect {
        let line_rect = self.paragraphs[paragraph].lines[line].rect;
        Rect::new(
            self.margin_x + chars * self.char_width,
            line_rect.y,
            1.0,
            self.line_height,
        )
    }

    /// A caret box below all laid-out content, at the left margin.
    #[must_use]
    pub fn caret_below_content(&self) -> Rect {
        Rect::new(self.margin_x, self.cursor_y + 100.0, 1.0, self.line_height)
    }

    /// Build the snapshot with the given caret box.
    #[must_use]
    pub fn snapshot(&self, caret: Option<Rect>) -> SurfaceSnapshot {
        SurfaceSnapshot {
            paragraphs: self.paragraphs.clone(),
            caret,
            caret_font: FontSpec::default(),
        }
    }
}

/// Scripted [`TextSurface`] for tests.
///
/// The test sets the snapshot and fires change notifications explicitly.
pub struct ScriptedSurface {
    snapshot: Mutex<SurfaceSnapshot>,
    tx: broadcast::Sender<SurfaceChange>,
}

impl Default for ScriptedSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedSurface {
    /// An empty surface with no caret.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(16);
        Self {
            snapshot: Mutex::new(SurfaceSnapshot::default()),
            tx,
        }
    }

    /// A surface seeded with an initial snapshot.
    #[must_use]
    pub fn with_snapshot(snapshot: SurfaceSnapshot) -> Self {
        let surface = Self::new();
        *surface.snapshot.lock() = snapshot;
        surface
    }

    /// Replace the snapshot without notifying subscribers.
    pub fn set_snapshot(&self, snapshot: SurfaceSnapshot) {
        *self.snapshot.lock() = snapshot;
    }

    /// Replace the snapshot and fire a change notification.
    pub fn edit(&self, snapshot: SurfaceSnapshot) {
        self.set_snapshot(snapshot);
        self.touch();
    }

    /// Fire a change notification without altering the snapshot.
    pub fn touch(&self) {
        // No receivers is fine — the pipeline may not have started yet.
        let _ = self.tx.send(SurfaceChange);
    }
}

impl TextSurface for ScriptedSurface {
    fn snapshot(&self) -> SurfaceSnapshot {
        self.snapshot.lock().clone()
    }

    fn changes(&self) -> broadcast::Receiver<SurfaceChange> {
        self.tx.subscribe()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
