//! Settings type definitions.
//!
//! All types use `#[serde(rename_all = "camelCase")]` to match the host's
//! JSON settings format. Each type implements [`Default`] with production
//! default values, and `#[serde(default)]` allows partial JSON — missing
//! fields get their default during deserialization.

use serde::{Deserialize, Serialize};

/// Root settings type for the Quill engine.
///
/// Loaded from `~/.quill/settings.json` with defaults applied for missing
/// fields; `QUILL_*` environment variables override specific values.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuillSettings {
    /// Settings schema version.
    pub version: String,
    /// Suggestion pipeline behavior.
    pub suggestions: SuggestionSettings,
    /// Ghost overlay timing.
    pub overlay: OverlaySettings,
    /// Logging configuration.
    pub logging: LoggingSettings,
}

impl Default for QuillSettings {
    fn default() -> Self {
        Self {
            version: "0.1.0".to_string(),
            suggestions: SuggestionSettings::default(),
            overlay: OverlaySettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl QuillSettings {
    /// Correct out-of-range values in place.
    ///
    /// Called during loading. Invalid values are clamped with a warning
    /// rather than rejected, so users get corrected behavior instead of a
    /// confusing error.
    pub fn validate(&mut self) {
        if self.suggestions.min_score > 100 {
            tracing::warn!(
                min_score = self.suggestions.min_score,
                "minScore above 100, clamped"
            );
            self.suggestions.min_score = 100;
        }
        if self.suggestions.debounce_ms == 0 {
            tracing::warn!("debounceMs of 0 disables coalescing, raised to 50");
            self.suggestions.debounce_ms = 50;
        }
        if self.overlay.frame_interval_ms == 0 {
            tracing::warn!("frameIntervalMs of 0 would spin, raised to 16");
            self.overlay.frame_interval_ms = 16;
        }
    }
}

/// Suggestion pipeline behavior.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SuggestionSettings {
    /// Master switch: when false the pipeline never starts a cycle.
    pub enabled: bool,
    /// Quiet period after the last edit before a cycle starts.
    pub debounce_ms: u64,
    /// Acceptance floor for the quality score.
    pub min_score: u8,
    /// Retries after a quality rejection of the first attempt.
    pub max_retries: u32,
}

impl Default for SuggestionSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            debounce_ms: 500,
            min_score: 40,
            max_retries: 1,
        }
    }
}

/// Ghost overlay timing.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OverlaySettings {
    /// Bound on waiting for the fade-out completion signal.
    pub fade_fallback_ms: u64,
    /// Interval of the position-tracking loop.
    pub frame_interval_ms: u64,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            fade_fallback_ms: 250,
            frame_interval_ms: 16,
        }
    }
}

/// Logging configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingSettings {
    /// Default filter level when `QUILL_LOG` is unset.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_compiled_constants() {
        let settings = QuillSettings::default();
        assert!(settings.suggestions.enabled);
        assert_eq!(settings.suggestions.debounce_ms, 500);
        assert_eq!(settings.suggestions.min_score, 40);
        assert_eq!(settings.suggestions.max_retries, 1);
        assert_eq!(settings.overlay.fade_fallback_ms, 250);
        assert_eq!(settings.overlay.frame_interval_ms, 16);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let settings: QuillSettings =
            serde_json::from_str(r#"{"suggestions": {"debounceMs": 750}}"#).unwrap();
        assert_eq!(settings.suggestions.debounce_ms, 750);
        assert_eq!(settings.suggestions.min_score, 40);
        assert!(settings.suggestions.enabled);
    }

    #[test]
    fn camel_case_wire_format() {
        let json = serde_json::to_value(QuillSettings::default()).unwrap();
        assert!(json["suggestions"]["debounceMs"].is_u64());
        assert!(json["overlay"]["fadeFallbackMs"].is_u64());
    }

    #[test]
    fn validate_clamps_min_score() {
        let mut settings = QuillSettings::default();
        settings.suggestions.min_score = 250;
        settings.validate();
        assert_eq!(settings.suggestions.min_score, 100);
    }

    #[test]
    fn validate_raises_zero_intervals() {
        let mut settings = QuillSettings::default();
        settings.suggestions.debounce_ms = 0;
        settings.overlay.frame_interval_ms = 0;
        settings.validate();
        assert_eq!(settings.suggestions.debounce_ms, 50);
        assert_eq!(settings.overlay.frame_interval_ms, 16);
    }
}
