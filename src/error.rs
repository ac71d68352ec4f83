//! Error types for lattice and implication-base computation.
//!
//! Three kinds of failure exist:
//!
//! - [`FcaError::InvalidPattern`]: a pattern or index outside the configured
//!   domain reached a derive operation. Recoverable; the caller should
//!   validate its input.
//! - [`FcaError::AlgebraInvariantViolation`]: join/meet/order behaved
//!   inconsistently during an enumeration step. Fatal to the run.
//! - [`FcaError::ConfigurationError`]: malformed conditions or an attribute
//!   order that does not match the relation. Raised at construction time,
//!   before any enumeration step.
//!
//! Any error terminates the current enumeration. Implications gathered
//! before the error are not guaranteed to form a consistent base.

use thiserror::Error;

/// Errors raised while building contexts or enumerating concepts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FcaError {
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    #[error(
        "Algebra invariant violated: {message} \
         (pattern: {pattern}, candidate: {candidate}, closure: {closure}, extent: {extent})"
    )]
    AlgebraInvariantViolation {
        message: String,
        pattern: String,
        candidate: String,
        closure: String,
        extent: String,
    },

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl FcaError {
    /// Whether the error ends the run regardless of caller action.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::AlgebraInvariantViolation { .. })
    }
}

pub type Result<T> = std::result::Result<T, FcaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invariant_violation_message_carries_context() {
        let err = FcaError::AlgebraInvariantViolation {
            message: "closure is not extensive".to_string(),
            pattern: "{0}".to_string(),
            candidate: "{0, 2}".to_string(),
            closure: "{2}".to_string(),
            extent: "RoaringBitmap<[1]>".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("closure is not extensive"));
        assert!(text.contains("candidate: {0, 2}"));
        assert!(text.contains("closure: {2}"));
        assert!(text.contains("extent: RoaringBitmap<[1]>"));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_recoverable_errors() {
        assert!(!FcaError::InvalidPattern("x".into()).is_fatal());
        assert!(!FcaError::ConfigurationError("y".into()).is_fatal());
    }
}
