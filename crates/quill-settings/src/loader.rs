//! Settings loading: defaults ← file deep-merge ← env overrides.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::warn;

use crate::errors::{Result, SettingsError};
use crate::types::QuillSettings;

/// Env var overriding `suggestions.enabled` (`true`/`false`/`1`/`0`).
pub const ENV_ENABLED: &str = "QUILL_SUGGESTIONS_ENABLED";
/// Env var overriding `suggestions.debounceMs`.
pub const ENV_DEBOUNCE_MS: &str = "QUILL_DEBOUNCE_MS";
/// Env var overriding `suggestions.minScore`.
pub const ENV_MIN_SCORE: &str = "QUILL_MIN_SCORE";

/// Path of the user settings file: `~/.quill/settings.json`.
pub fn settings_path() -> Result<PathBuf> {
    let home = std::env::var_os("HOME").ok_or(SettingsError::NoHome)?;
    Ok(PathBuf::from(home).join(".quill").join("settings.json"))
}

/// Load settings from the default path with env overrides applied.
///
/// A missing file is not an error: defaults are used.
pub fn load_settings() -> Result<QuillSettings> {
    let path = settings_path()?;
    if path.exists() {
        load_settings_from_path(&path)
    } else {
        let mut settings = QuillSettings::default();
        apply_env_overrides(&mut settings);
        settings.validate();
        Ok(settings)
    }
}

/// Load settings from a specific file, deep-merged over defaults, with env
/// overrides applied last.
pub fn load_settings_from_path(path: &Path) -> Result<QuillSettings> {
    let raw = std::fs::read_to_string(path)?;
    let file_value: Value = serde_json::from_str(&raw)?;
    let defaults = serde_json::to_value(QuillSettings::default())?;
    let merged = deep_merge(defaults, file_value);
    let mut settings: QuillSettings = serde_json::from_value(merged)?;
    apply_env_overrides(&mut settings);
    settings.validate();
    Ok(settings)
}

/// Recursively merge `overlay` into `base`.
///
/// Objects merge key-by-key; any other value in `overlay` replaces the base
/// value wholesale (arrays included).
#[must_use]
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                let merged = match base_map.remove(&key) {
                    Some(base_value) => deep_merge(base_value, overlay_value),
                    None => overlay_value,
                };
                let _ = base_map.insert(key, merged);
            }
            Value::Object(base_map)
        }
        (_, overlay) => overlay,
    }
}

/// Apply `QUILL_*` env overrides (highest priority layer).
///
/// Unparseable values are ignored with a warning; a broken env var should
/// not take the whole engine down.
pub fn apply_env_overrides(settings: &mut QuillSettings) {
    if let Ok(raw) = std::env::var(ENV_ENABLED) {
        match raw.as_str() {
            "true" | "1" => settings.suggestions.enabled = true,
            "false" | "0" => settings.suggestions.enabled = false,
            other => warn!(value = other, "ignoring unparseable {ENV_ENABLED}"),
        }
    }
    if let Ok(raw) = std::env::var(ENV_DEBOUNCE_MS) {
        match raw.parse::<u64>() {
            Ok(ms) => settings.suggestions.debounce_ms = ms,
            Err(_) => warn!(value = %raw, "ignoring unparseable {ENV_DEBOUNCE_MS}"),
        }
    }
    if let Ok(raw) = std::env::var(ENV_MIN_SCORE) {
        match raw.parse::<u8>() {
            Ok(score) => settings.suggestions.min_score = score,
            Err(_) => warn!(value = %raw, "ignoring unparseable {ENV_MIN_SCORE}"),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
