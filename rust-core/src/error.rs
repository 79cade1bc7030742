use thiserror::Error;

/// Errors raised by orientation computations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum OrientationError {
    /// Unknown rotation convention name
    #[error("rotation convention \"{0}\" not supported (expected zxz or xyz)")]
    InvalidConvention(String),

    /// Batches that must be aligned element-wise have different lengths
    #[error("shape mismatch in {context}: expected {expected}, got {found}")]
    ShapeMismatch {
        context: &'static str,
        expected: usize,
        found: usize,
    },

    /// Euler extraction hit gimbal lock (sin(Phi) ~ 0 for zxz, cos(Phi) ~ 0 for xyz)
    #[error("singular orientation: Phi = {phi} rad leaves phi1 and phi2 indeterminate")]
    SingularOrientation { phi: f64 },

    /// Averaging or relationship estimation over zero measurements
    #[error("empty selection: {0}")]
    EmptySelection(String),

    /// No cubic image of an analytic relationship's direction lies in its plane
    #[error("inconsistent variant count for {phase} phase: {found} of 24 direction images lie in the plane")]
    InconsistentVariantCount { phase: &'static str, found: usize },

    /// Invalid parameter value (zero-length axis, bad grid size, ...)
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type for orientation operations
pub type Result<T> = std::result::Result<T, OrientationError>;
