//! Crate-wide error type.
//!
//! Mirrors the teacher's hand-rolled `Display` + `std::error::Error` pattern
//! (no `thiserror`): a plain enum, a `fmt::Display` impl that renders a
//! human-readable message, and a blanket `std::error::Error` impl.

use std::fmt;

/// Errors that can occur while constructing or operating on kernel values.
///
/// `RuleMismatch` (a tile's matching rule doesn't allow an adjacency) and
/// "no such substitution rule" are *not* represented here: the former is a
/// `CanAdd::No` outcome from the tile manager, the latter is an `Option`/
/// empty iterator from the substitution lookup. Both are expected, common
/// outcomes of normal operation, not exceptional conditions.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KernelError {
    /// A value of the wrong shape was supplied where a specific invariant is
    /// required (e.g. a non-convex polygon where convexity is assumed).
    TypeMismatch {
        /// What was expected.
        expected: &'static str,
        /// What was found instead, rendered for diagnostics.
        found: String,
    },
    /// A value was in range syntactically but violates a domain constraint
    /// (e.g. a `RationalInterval` constructed with `low > high`).
    DomainValue {
        /// Name of the constraint that was violated.
        constraint: &'static str,
        /// Rendered description of the offending value(s).
        detail: String,
    },
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TypeMismatch { expected, found } => {
                write!(f, "type mismatch: expected {expected}, found {found}")
            }
            Self::DomainValue { constraint, detail } => {
                write!(f, "domain constraint violated ({constraint}): {detail}")
            }
        }
    }
}

impl std::error::Error for KernelError {}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, KernelError>;
