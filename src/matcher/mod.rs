//! Self-describing matchers
//!
//! A [`Matcher`] is a predicate over `&dyn Object` that can also explain
//! what it expects and why a given value did not satisfy it. Matchers are
//! immutable once built and compose through [`MatcherExt`].
//!
//! # Example
//!
//! ```rust
//! use stillmatch::prelude::*;
//!
//! let m = equal_to(42).or(equal_to(7));
//! assert!(m.matches(&42));
//! assert!(!m.matches(&8));
//! assert_eq!(Description::of(&m), "(42 or 7)");
//! ```

mod basic;
mod combinators;
mod instance_of;

use std::sync::Arc;

use crate::description::{Description, SelfDescribing};
use crate::error::MatchError;
use crate::object::Object;

pub use basic::{anything, equal_to, Anything, EqualTo};
pub use combinators::{all_of, any_of, AllOf, And, AnyOf, Not, Or};
pub use instance_of::{instance_of, is_a, InstanceOf};

/// A self-describing predicate over dynamically typed values.
///
/// Implementors only provide [`try_matches`](Matcher::try_matches) and
/// [`describe_to`](SelfDescribing::describe_to). `try_matches` appends to
/// `mismatch` only when it returns `Ok(false)`.
///
/// # Implementing Custom Matchers
///
/// ```rust
/// use stillmatch::{Description, MatchError, Matcher, Object, SelfDescribing};
///
/// struct IsEven;
///
/// impl SelfDescribing for IsEven {
///     fn describe_to(&self, description: &mut Description) {
///         description.append_text("an even number");
///     }
/// }
///
/// impl Matcher for IsEven {
///     fn try_matches(
///         &self,
///         item: &dyn Object,
///         mismatch: &mut Description,
///     ) -> Result<bool, MatchError> {
///         match item.as_any().downcast_ref::<i32>() {
///             Some(n) if n % 2 == 0 => Ok(true),
///             _ => {
///                 mismatch.append_text("was ").append_value(item);
///                 Ok(false)
///             }
///         }
///     }
/// }
///
/// assert!(IsEven.matches(&4));
/// assert!(!IsEven.matches(&3));
/// ```
pub trait Matcher: SelfDescribing + Send + Sync {
    /// Evaluate `item`, explaining a mismatch in `mismatch`.
    ///
    /// `Err` is reserved for invariant violations that must not be read as
    /// an ordinary `false`.
    fn try_matches(
        &self,
        item: &dyn Object,
        mismatch: &mut Description,
    ) -> Result<bool, MatchError>;

    /// Evaluate `item`.
    ///
    /// # Panics
    ///
    /// Panics if evaluation hits an invariant violation.
    fn matches(&self, item: &dyn Object) -> bool {
        let mut discarded = Description::new();
        match self.try_matches(item, &mut discarded) {
            Ok(matched) => matched,
            Err(err) => err.raise(),
        }
    }

    /// Explain why `item` does not match.
    ///
    /// Writes nothing when `item` matches.
    ///
    /// # Panics
    ///
    /// Panics if evaluation hits an invariant violation.
    fn describe_mismatch(&self, item: &dyn Object, mismatch: &mut Description) {
        if let Err(err) = self.try_matches(item, mismatch) {
            err.raise();
        }
    }
}

impl<S: SelfDescribing + ?Sized> SelfDescribing for &S {
    fn describe_to(&self, description: &mut Description) {
        (**self).describe_to(description)
    }
}

impl<S: SelfDescribing + ?Sized> SelfDescribing for Box<S> {
    fn describe_to(&self, description: &mut Description) {
        (**self).describe_to(description)
    }
}

impl<S: SelfDescribing + ?Sized> SelfDescribing for Arc<S> {
    fn describe_to(&self, description: &mut Description) {
        (**self).describe_to(description)
    }
}

impl<M: Matcher + ?Sized> Matcher for &M {
    #[inline]
    fn try_matches(
        &self,
        item: &dyn Object,
        mismatch: &mut Description,
    ) -> Result<bool, MatchError> {
        (**self).try_matches(item, mismatch)
    }
}

impl<M: Matcher + ?Sized> Matcher for Box<M> {
    #[inline]
    fn try_matches(
        &self,
        item: &dyn Object,
        mismatch: &mut Description,
    ) -> Result<bool, MatchError> {
        (**self).try_matches(item, mismatch)
    }
}

impl<M: Matcher + ?Sized> Matcher for Arc<M> {
    #[inline]
    fn try_matches(
        &self,
        item: &dyn Object,
        mismatch: &mut Description,
    ) -> Result<bool, MatchError> {
        (**self).try_matches(item, mismatch)
    }
}

/// Extension trait for combining matchers.
///
/// All methods return concrete types, so composition does not allocate.
///
/// # Example
///
/// ```rust
/// use stillmatch::prelude::*;
///
/// let m = instance_of::<i32>().and(equal_to(5).not());
/// assert!(m.matches(&4));
/// assert!(!m.matches(&5));
/// assert!(!m.matches(&"five"));
/// ```
pub trait MatcherExt: Matcher + Sized {
    /// Match only when both matchers match.
    fn and<M: Matcher>(self, other: M) -> And<Self, M> {
        And(self, other)
    }

    /// Match when either matcher matches.
    fn or<M: Matcher>(self, other: M) -> Or<Self, M> {
        Or(self, other)
    }

    /// Invert the matcher.
    fn not(self) -> Not<Self> {
        Not(self)
    }

    /// Erase the concrete type.
    fn boxed(self) -> Box<dyn Matcher>
    where
        Self: 'static,
    {
        Box::new(self)
    }
}

impl<M: Matcher> MatcherExt for M {}
