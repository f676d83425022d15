//! Error types for property access and matcher evaluation
//!
//! Two tiers exist and they are never merged:
//!
//! - A failing read accessor ([`InvocationError::Target`]) is an ordinary
//!   mismatch. The matcher returns `false` and explains why.
//! - An accessor that cannot be invoked at all ([`InvocationError::IllegalAccess`],
//!   [`InvocationError::IllegalArgument`]) means the matcher or registry was
//!   misconfigured. That surfaces as a [`MatchError`], never as `false`.
//!
//! # Example
//!
//! ```
//! use stillmatch::{InvocationError, MatchError};
//!
//! let thrown = InvocationError::target("no name yet");
//! assert!(thrown.is_target());
//!
//! let err = MatchError::invariant_violation(
//!     "Person::get_name() -> String",
//!     InvocationError::illegal_access("private"),
//! );
//! assert_eq!(
//!     err.to_string(),
//!     "Calling: 'Person::get_name() -> String' should not have thrown IllegalAccess: private"
//! );
//! ```

use std::error::Error as StdError;
use std::fmt;

/// Why a read accessor did not produce a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvocationError {
    /// The accessor ran and failed on its own terms.
    Target {
        /// The failure message, if the accessor supplied one.
        message: Option<String>,
    },
    /// The accessor may not be called.
    IllegalAccess(String),
    /// The accessor was handed a receiver it does not accept.
    IllegalArgument(String),
}

impl InvocationError {
    /// Create a target failure carrying `message`.
    pub fn target(message: impl Into<String>) -> Self {
        InvocationError::Target {
            message: Some(message.into()),
        }
    }

    /// Create a target failure without a message.
    pub fn target_without_message() -> Self {
        InvocationError::Target { message: None }
    }

    /// Create an illegal-access failure.
    pub fn illegal_access(reason: impl Into<String>) -> Self {
        InvocationError::IllegalAccess(reason.into())
    }

    /// Create an illegal-argument failure.
    pub fn illegal_argument(reason: impl Into<String>) -> Self {
        InvocationError::IllegalArgument(reason.into())
    }

    /// Returns `true` if the accessor itself failed.
    ///
    /// Only these failures are reported as mismatches.
    pub fn is_target(&self) -> bool {
        matches!(self, InvocationError::Target { .. })
    }
}

impl fmt::Display for InvocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvocationError::Target {
                message: Some(message),
            } => write!(f, "Target: {}", message),
            InvocationError::Target { message: None } => write!(f, "Target"),
            InvocationError::IllegalAccess(reason) => write!(f, "IllegalAccess: {}", reason),
            InvocationError::IllegalArgument(reason) => write!(f, "IllegalArgument: {}", reason),
        }
    }
}

impl StdError for InvocationError {}

/// A failure that must not be reported as an ordinary mismatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    /// A read accessor could not be invoked.
    InvariantViolation {
        /// Signature of the accessor being called.
        accessor: String,
        /// What went wrong.
        cause: InvocationError,
    },
}

impl MatchError {
    /// Create an invariant violation for `accessor`.
    pub fn invariant_violation(accessor: impl Into<String>, cause: InvocationError) -> Self {
        MatchError::InvariantViolation {
            accessor: accessor.into(),
            cause,
        }
    }

    /// Abort the current evaluation with this error.
    ///
    /// Used by the infallible matcher entry points, which have no way to
    /// return the error.
    #[track_caller]
    pub fn raise(self) -> ! {
        panic!("{}", self)
    }
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchError::InvariantViolation { accessor, cause } => {
                write!(f, "Calling: '{}' should not have thrown {}", accessor, cause)
            }
        }
    }
}

impl StdError for MatchError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            MatchError::InvariantViolation { cause, .. } => Some(cause),
        }
    }
}
