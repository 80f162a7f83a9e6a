//! Tracing bootstrap.
//!
//! Embedders call [`init`] once at startup. Filtering is controlled by the
//! `QUILL_LOG` env var (`tracing_subscriber::EnvFilter` syntax), defaulting
//! to `info`.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
pub const LOG_ENV_VAR: &str = "QUILL_LOG";

/// Install the global tracing subscriber.
///
/// Safe to call more than once; subsequent calls are no-ops (the first
/// subscriber wins).
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("info"));
    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        init();
        init();
    }
}
