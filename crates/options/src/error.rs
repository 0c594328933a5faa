use thiserror::Error;

/// Error raised while normalizing a loosely-typed configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration root was not a JSON object.
    #[error("rsync configuration must be an object, found {found}")]
    NotAnObject {
        /// Kind of value that was supplied instead.
        found: &'static str,
    },
    /// A recognised field carried a value of the wrong shape.
    #[error("rsync configuration field '{field}' must be {expected}")]
    InvalidField {
        /// Name of the offending field.
        field: String,
        /// Description of the accepted shapes.
        expected: &'static str,
    },
    /// The configuration text was not valid JSON.
    #[error("failed to parse rsync configuration: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConfigError {
    pub(crate) fn invalid(field: impl Into<String>, expected: &'static str) -> Self {
        Self::InvalidField {
            field: field.into(),
            expected,
        }
    }
}
