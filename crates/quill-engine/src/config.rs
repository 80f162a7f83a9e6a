//! Engine tuning derived from settings.

use std::time::Duration;

use quill_core::constants::{
    DEBOUNCE_DELAY_MS, FADE_FALLBACK_MS, FRAME_INTERVAL_MS, MAX_RETRIES, QUALITY_MIN_SCORE,
};
use quill_settings::QuillSettings;

/// Resolved tuning values for one pipeline instance.
///
/// Captured once at construction; a settings reload takes effect on the next
/// pipeline, not mid-flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Master switch; a disabled pipeline observes nothing.
    pub enabled: bool,
    /// Quiet period after the last surface change before a cycle starts.
    pub debounce_delay: Duration,
    /// Acceptance floor for the quality score.
    pub min_score: u8,
    /// Retries after a quality rejection of the first attempt.
    pub max_retries: u32,
    /// Bound on waiting for the overlay fade-out completion signal.
    pub fade_fallback: Duration,
    /// Interval of the overlay position-tracking loop.
    pub frame_interval: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            debounce_delay: Duration::from_millis(DEBOUNCE_DELAY_MS),
            min_score: QUALITY_MIN_SCORE,
            max_retries: MAX_RETRIES,
            fade_fallback: Duration::from_millis(FADE_FALLBACK_MS),
            frame_interval: Duration::from_millis(FRAME_INTERVAL_MS),
        }
    }
}

impl EngineConfig {
    /// Resolve config from loaded settings.
    #[must_use]
    pub fn from_settings(settings: &QuillSettings) -> Self {
        Self {
            enabled: settings.suggestions.enabled,
            debounce_delay: Duration::from_millis(settings.suggestions.debounce_ms),
            min_score: settings.suggestions.min_score,
            max_retries: settings.suggestions.max_retries,
            fade_fallback: Duration::from_millis(settings.overlay.fade_fallback_ms),
            frame_interval: Duration::from_millis(settings.overlay.frame_interval_ms),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
