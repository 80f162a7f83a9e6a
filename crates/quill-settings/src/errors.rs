//! Settings loading errors.

use thiserror::Error;

/// Result alias for settings operations.
pub type Result<T> = std::result::Result<T, SettingsError>;

/// Errors raised while loading or parsing settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The settings file could not be read.
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    /// The settings file is not valid JSON for the schema.
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    /// The home directory could not be determined.
    #[error("cannot locate home directory")]
    NoHome,
}
