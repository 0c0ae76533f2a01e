//! Error type for Lyndon-basis derivation.
//!
//! Two classes of failure exist. [`Error::InvalidSpec`] is a configuration
//! error reported before any generation work starts. Every other variant
//! means the derivation itself went wrong: the computation is a pure
//! function of the `LyndonSpec`, so none of them is retryable and no partial result
//! is ever returned alongside them.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors raised while generating Lyndon words or deriving the basis transform.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The alphabet size or the depth is zero.
    #[error("invalid Lyndon spec: alphabet_size = {alphabet_size}, depth = {depth} (both must be at least 1)")]
    InvalidSpec {
        /// Requested alphabet size.
        alphabet_size: usize,
        /// Requested maximum word length.
        depth: usize,
    },

    /// `alphabet_size^depth` does not fit in `usize`, so tensor-algebra
    /// coordinates cannot be addressed.
    #[error("tensor algebra of alphabet_size = {alphabet_size} at depth = {depth} is not addressable")]
    IndexOverflow {
        /// Alphabet size of the offending spec.
        alphabet_size: usize,
        /// Depth of the offending spec.
        depth: usize,
    },

    /// An exact integer coefficient left the `i64` range.
    #[error("coefficient overflow while {context}")]
    CoefficientOverflow {
        /// Stage that overflowed.
        context: &'static str,
    },

    /// An internal invariant of word generation, bracketing or the
    /// triangular solve does not hold. Always a bug, never user error.
    #[error("internal invariant violated: {0}")]
    InvariantViolation(String),
}

impl Error {
    pub(crate) fn invariant(message: impl Into<String>) -> Self {
        Self::InvariantViolation(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_spec() {
        let e = Error::InvalidSpec {
            alphabet_size: 0,
            depth: 3,
        };
        assert_eq!(
            e.to_string(),
            "invalid Lyndon spec: alphabet_size = 0, depth = 3 (both must be at least 1)"
        );
    }

    #[test]
    fn display_invariant() {
        let e = Error::invariant("leaf word 2 has no factorization");
        assert_eq!(
            e.to_string(),
            "internal invariant violated: leaf word 2 has no factorization"
        );
    }

    #[test]
    fn display_overflow() {
        let e = Error::CoefficientOverflow {
            context: "expanding brackets",
        };
        assert_eq!(e.to_string(), "coefficient overflow while expanding brackets");
    }
}
