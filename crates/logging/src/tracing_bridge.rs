//! crates/logging/src/tracing_bridge.rs
//! Subscriber setup for the launcher's tracing output.
//!
//! Events are written to stderr by a `tracing-subscriber` fmt layer behind an
//! [`EnvFilter`]. The filter comes either from explicit directives or from the
//! [`LOG_ENV`] environment variable, falling back to [`DEFAULT_DIRECTIVES`].
//!
//! # Usage
//!
//! ```rust,ignore
//! // RSYNC_LAUNCHER_LOG=rsync_launcher=debug
//! logging::init_from_env()?;
//! ```

use std::env;

use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

/// Environment variable holding filter directives.
pub const LOG_ENV: &str = "RSYNC_LAUNCHER_LOG";

/// Directives used when [`LOG_ENV`] is unset or empty.
pub const DEFAULT_DIRECTIVES: &str = "warn";

/// Error raised while installing the global subscriber.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The filter directives could not be parsed.
    #[error("invalid log filter '{directives}': {source}")]
    Filter {
        /// Directives as supplied.
        directives: String,
        /// Parser diagnostic.
        source: ParseError,
    },
    /// A global subscriber was already installed.
    #[error("failed to install tracing subscriber: {0}")]
    Init(#[from] TryInitError),
}

/// Parses `directives` into an [`EnvFilter`].
pub fn build_filter(directives: &str) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_new(directives).map_err(|source| LoggingError::Filter {
        directives: directives.to_owned(),
        source,
    })
}

/// Returns the directives from [`LOG_ENV`], or the defaults.
#[must_use]
pub fn directives_from_env() -> String {
    env::var(LOG_ENV)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_DIRECTIVES.to_owned())
}

/// Installs a global stderr subscriber filtered by `directives`.
pub fn init_tracing(directives: &str) -> Result<(), LoggingError> {
    let filter = build_filter(directives)?;
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;
    Ok(())
}

/// Installs a global stderr subscriber configured from [`LOG_ENV`].
pub fn init_from_env() -> Result<(), LoggingError> {
    init_tracing(&directives_from_env())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_target_directives() {
        assert!(build_filter("rsync_launcher::spawn=debug,warn").is_ok());
    }

    #[test]
    fn rejects_unknown_level() {
        let error = build_filter("rsync_launcher=loud").unwrap_err();

        assert!(error.to_string().contains("rsync_launcher=loud"));
    }
}
