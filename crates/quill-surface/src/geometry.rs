//! Bounding boxes in surface coordinates.
//!
//! All positions are CSS-style pixels: x grows rightward, y grows downward.

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width, ≥ 0.
    pub width: f64,
    /// Height, ≥ 0.
    pub height: f64,
}

impl Rect {
    /// Construct a rect from its left/top corner and size.
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Vertical midpoint.
    #[must_use]
    pub fn mid_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Whether `y` falls inside this rect's vertical span, widened by
    /// `tolerance` on both sides.
    ///
    /// Rendered line boxes and caret boxes rarely align exactly, so every
    /// vertical containment test in the engine goes through this tolerant
    /// form.
    #[must_use]
    pub fn contains_y(&self, y: f64, tolerance: f64) -> bool {
        y >= self.y - tolerance && y <= self.bottom() + tolerance
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
