//! Error types for the rating engine
//!
//! Every failure here is a caller mistake detected up front. Inference itself
//! is pure arithmetic and has no transient failure modes.

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, SkillError>;

/// Errors raised when building a configuration or submitting a match
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SkillError {
    #[error("Draw probability must be between 0 and 100, got {percentage}")]
    DrawProbabilityOutOfRange { percentage: f64 },

    #[error("Invalid parameter {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("Malformed match: {reason}")]
    MalformedMatch { reason: String },

    #[error("Unsupported number of entrants: expected {expected}, got {actual}")]
    UnsupportedArity { expected: usize, actual: usize },
}
