/// Convenience result type used across alertfx.
pub type AlertResult<T> = Result<T, AlertError>;

/// Error taxonomy for the configuration and loading boundary.
///
/// Presentation operations never return errors: out-of-range input is normalized and conflicting
/// requests resolve to no-ops. Errors only surface when reading external data.
#[derive(thiserror::Error, Debug)]
pub enum AlertError {
    /// Invalid user-provided value (unknown style name, malformed direction, ...).
    #[error("validation error: {0}")]
    Validation(String),

    /// Configuration document contained a value that cannot be normalized.
    #[error("config error: {0}")]
    Config(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AlertError {
    /// Build an [`AlertError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build an [`AlertError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build an [`AlertError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for AlertError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
