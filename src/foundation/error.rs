/// Result alias used across the crate.
pub type DotfieldResult<T> = Result<T, DotfieldError>;

/// Errors produced while configuring, rendering or hosting a dot field.
///
/// None of these are meant to reach the page user. Hosts log them and skip
/// the affected frame.
#[derive(thiserror::Error, Debug)]
pub enum DotfieldError {
    /// Rejected configuration values.
    #[error("validation error: {0}")]
    Validation(String),

    /// A drawing surface could not be created or read back.
    #[error("render error: {0}")]
    Render(String),

    /// The host environment (browser APIs, frame scheduler) failed.
    #[error("platform error: {0}")]
    Platform(String),

    /// Options could not be parsed or written.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped foreign error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DotfieldError {
    /// Build a [`DotfieldError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`DotfieldError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`DotfieldError::Platform`].
    pub fn platform(msg: impl Into<String>) -> Self {
        Self::Platform(msg.into())
    }

    /// Build a [`DotfieldError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for DotfieldError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
