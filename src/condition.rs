//! Short-circuiting steps for multi-stage matching
//!
//! A [`Condition`] threads a value through a sequence of steps that may
//! each stop the chain. Steps write their own explanation into the shared
//! mismatch [`Description`] when they stop, so the caller only ever sees a
//! single accumulated message.
//!
//! Steps return `Result<Condition<U>, MatchError>`: `NotMatched` is an
//! ordinary mismatch, while `Err` aborts the evaluation entirely.
//!
//! # Example
//!
//! ```rust
//! use stillmatch::condition::{Condition, ConditionResultExt};
//! use stillmatch::{equal_to, Description, Object};
//!
//! let mut mismatch = Description::new();
//! let matched = Condition::matched(21)
//!     .step(|n, _| Ok(Condition::matched(Box::new(n * 2) as Box<dyn Object>)), &mut mismatch)
//!     .matching(&equal_to(42), "doubled ", &mut mismatch);
//!
//! assert_eq!(matched, Ok(true));
//! assert!(mismatch.is_empty());
//! ```

use crate::description::Description;
use crate::error::MatchError;
use crate::matcher::Matcher;
use crate::object::Object;

/// Result of a single step in a matching chain.
pub type StepResult<T> = Result<Condition<T>, MatchError>;

/// The state of a matching chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Condition<T> {
    /// Every step so far succeeded, producing this value.
    Matched(T),
    /// A step stopped the chain and described why.
    NotMatched,
}

impl<T> Condition<T> {
    /// Start a chain with `value`.
    #[inline]
    pub fn matched(value: T) -> Self {
        Condition::Matched(value)
    }

    /// A stopped chain.
    #[inline]
    pub fn not_matched() -> Self {
        Condition::NotMatched
    }

    /// Returns `true` if the chain is still running.
    #[inline]
    pub fn is_matched(&self) -> bool {
        matches!(self, Condition::Matched(_))
    }

    /// Transform the carried value without a chance of failing.
    pub fn map<U, F>(self, f: F) -> Condition<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Condition::Matched(value) => Condition::Matched(f(value)),
            Condition::NotMatched => Condition::NotMatched,
        }
    }

    /// Run the next step if the chain is still running.
    ///
    /// A stopped chain skips `step` entirely.
    pub fn step<U, F>(self, step: F, mismatch: &mut Description) -> StepResult<U>
    where
        F: FnOnce(T, &mut Description) -> StepResult<U>,
    {
        match self {
            Condition::Matched(value) => step(value, mismatch),
            Condition::NotMatched => Ok(Condition::NotMatched),
        }
    }

    /// Convert into an `Option`, dropping the stop reason.
    pub fn into_option(self) -> Option<T> {
        match self {
            Condition::Matched(value) => Some(value),
            Condition::NotMatched => None,
        }
    }
}

impl<T: AsRef<dyn Object>> Condition<T> {
    /// Finish the chain by applying `matcher` to the carried value.
    ///
    /// On failure, `label` is appended first and then the matcher's own
    /// mismatch description.
    pub fn matching<M>(
        self,
        matcher: &M,
        label: &str,
        mismatch: &mut Description,
    ) -> Result<bool, MatchError>
    where
        M: Matcher + ?Sized,
    {
        match self {
            Condition::Matched(value) => match_labelled(matcher, value.as_ref(), label, mismatch),
            Condition::NotMatched => Ok(false),
        }
    }
}

/// Chaining for conditions still wrapped in a [`StepResult`].
pub trait ConditionResultExt<T> {
    /// Run the next step on a running chain, passing errors through.
    fn step<U, F>(self, step: F, mismatch: &mut Description) -> StepResult<U>
    where
        F: FnOnce(T, &mut Description) -> StepResult<U>;

    /// Finish the chain by applying `matcher` to the carried value.
    fn matching<M>(
        self,
        matcher: &M,
        label: &str,
        mismatch: &mut Description,
    ) -> Result<bool, MatchError>
    where
        M: Matcher + ?Sized,
        T: AsRef<dyn Object>;
}

impl<T> ConditionResultExt<T> for StepResult<T> {
    fn step<U, F>(self, step: F, mismatch: &mut Description) -> StepResult<U>
    where
        F: FnOnce(T, &mut Description) -> StepResult<U>,
    {
        self?.step(step, mismatch)
    }

    fn matching<M>(
        self,
        matcher: &M,
        label: &str,
        mismatch: &mut Description,
    ) -> Result<bool, MatchError>
    where
        M: Matcher + ?Sized,
        T: AsRef<dyn Object>,
    {
        self?.matching(matcher, label, mismatch)
    }
}

fn match_labelled<M>(
    matcher: &M,
    value: &dyn Object,
    label: &str,
    mismatch: &mut Description,
) -> Result<bool, MatchError>
where
    M: Matcher + ?Sized,
{
    let mut inner = Description::new();
    if matcher.try_matches(value, &mut inner)? {
        return Ok(true);
    }
    mismatch.append_text(label).append_text(inner.as_str());
    Ok(false)
}
