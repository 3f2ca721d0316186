//! Shared error types used across submodules.

use thiserror::Error;

/// Top-level error type for the crate.
///
/// Field points that coincide with the wire are not an error: both integration rules clamp
/// the source distance at [`crate::constants::MIN_SOURCE_DISTANCE`] so batch evaluation stays
/// total.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoilError {
    /// Raised for non-positive physical quantities, degenerate geometry or unknown names.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Raised when a point array's shape or orientation cannot be resolved.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),
}

impl CoilError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub(crate) fn shape(message: impl Into<String>) -> Self {
        Self::ShapeMismatch(message.into())
    }
}

/// Result alias used by fallible operations in this crate.
pub type Result<T> = std::result::Result<T, CoilError>;

/// Fails with [`CoilError::InvalidArgument`] unless `value` is finite and strictly positive.
pub(crate) fn ensure_positive(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CoilError::invalid(format!("{name} must be positive, got {value}")))
    }
}

/// Fails with [`CoilError::InvalidArgument`] unless `value` is finite.
pub(crate) fn ensure_finite(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CoilError::invalid(format!("{name} must be finite, got {value}")))
    }
}
