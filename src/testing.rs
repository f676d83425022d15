//! Assertion helpers built on matchers
//!
//! This module turns a failed match into a readable report and provides
//! the assertion macros used in tests.
//!
//! # Examples
//!
//! ## Assertion Macros
//!
//! ```rust
//! use stillmatch::prelude::*;
//! use stillmatch::{assert_mismatch, assert_that};
//!
//! assert_that!(42, equal_to(42));
//! assert_that!("Iain".to_string(), instance_of::<String>(), "names are strings");
//!
//! assert_mismatch!(41, equal_to(42));
//! assert_mismatch!(41, equal_to(42), "was 41");
//! ```
//!
//! ## Reports
//!
//! ```rust
//! use stillmatch::prelude::*;
//! use stillmatch::testing::verify_that;
//!
//! let report = verify_that("answer", &41, &equal_to(42)).unwrap_err();
//! assert_eq!(report.to_string(), "answer\nExpected: 42\n     but: was 41");
//! ```

use std::fmt;

use crate::description::Description;
use crate::matcher::Matcher;
use crate::object::Object;

/// A failed match, ready to show to a person.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchReport {
    /// Caller-supplied context, possibly empty.
    pub reason: String,
    /// Description of the matcher.
    pub expected: String,
    /// Why the value did not match.
    pub actual: String,
}

impl fmt::Display for MatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.reason)?;
        writeln!(f, "Expected: {}", self.expected)?;
        write!(f, "     but: {}", self.actual)
    }
}

impl std::error::Error for MatchReport {}

/// Check `item` against `matcher`, producing a report on mismatch.
///
/// # Panics
///
/// Panics if evaluation hits an invariant violation; those are never
/// reported as ordinary mismatches.
pub fn verify_that<M>(reason: &str, item: &dyn Object, matcher: &M) -> Result<(), MatchReport>
where
    M: Matcher + ?Sized,
{
    let mut mismatch = Description::new();
    match matcher.try_matches(item, &mut mismatch) {
        Ok(true) => Ok(()),
        Ok(false) => Err(MatchReport {
            reason: reason.to_string(),
            expected: Description::of(matcher),
            actual: mismatch.into_string(),
        }),
        Err(err) => err.raise(),
    }
}

/// Assert that a value matches a matcher.
///
/// Panics with an `Expected: ... but: ...` report if the
/// value doesn't match.
///
/// # Example
///
/// ```rust
/// use stillmatch::{assert_that, equal_to};
///
/// assert_that!(42, equal_to(42));
/// assert_that!(42, equal_to(42), "checking {}", "the answer");
/// ```
#[macro_export]
macro_rules! assert_that {
    ($value:expr, $matcher:expr) => {
        $crate::assert_that!($value, $matcher, "")
    };
    ($value:expr, $matcher:expr, $($arg:tt)+) => {{
        let value = &$value;
        let matcher = &$matcher;
        if let ::std::result::Result::Err(report) =
            $crate::testing::verify_that(&format!($($arg)+), value, matcher)
        {
            panic!("assertion failed: {}", report);
        }
    }};
}

/// Assert that a value does not match a matcher.
///
/// With a third argument, also checks the mismatch description.
///
/// # Example
///
/// ```rust
/// use stillmatch::{assert_mismatch, equal_to};
///
/// assert_mismatch!(1, equal_to(2));
/// assert_mismatch!(1, equal_to(2), "was 1");
/// ```
#[macro_export]
macro_rules! assert_mismatch {
    ($value:expr, $matcher:expr) => {{
        let value = &$value;
        let matcher = &$matcher;
        if $crate::Matcher::matches(matcher, value) {
            panic!(
                "Expected mismatch, but {:?} matched {}",
                value,
                $crate::Description::of(matcher)
            );
        }
    }};
    ($value:expr, $matcher:expr, $expected:expr) => {{
        let value = &$value;
        let matcher = &$matcher;
        let mut mismatch = $crate::Description::new();
        match $crate::Matcher::try_matches(matcher, value, &mut mismatch) {
            ::std::result::Result::Ok(false) => assert_eq!(mismatch.as_str(), $expected),
            ::std::result::Result::Ok(true) => panic!(
                "Expected mismatch {:?}, but {:?} matched {}",
                $expected,
                value,
                $crate::Description::of(matcher)
            ),
            ::std::result::Result::Err(err) => err.raise(),
        }
    }};
}
