/// Convenience result type used across the backdrop core.
pub type BackdropResult<T> = Result<T, BackdropError>;

/// Top-level error taxonomy for the backdrop core.
///
/// None of these escape the host-facing [`crate::Backdrop`] entry points; they are logged and
/// the affected frame is superseded by the next eligible one.
#[derive(thiserror::Error, Debug)]
pub enum BackdropError {
    /// Invalid host-provided data (sizes, filter parameters, settings).
    #[error("validation error: {0}")]
    Validation(String),

    /// The drawable surface is unavailable or rejected an operation.
    #[error("surface error: {0}")]
    Surface(String),

    /// Errors while synthesizing a frame (buffer allocation, size overflow).
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing host settings.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BackdropError {
    /// Build a [`BackdropError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`BackdropError::Surface`] value.
    pub fn surface(msg: impl Into<String>) -> Self {
        Self::Surface(msg.into())
    }

    /// Build a [`BackdropError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`BackdropError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
