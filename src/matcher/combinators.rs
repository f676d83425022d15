//! Logical combinators for matchers
//!
//! `And`, `Or` and `Not` are built through [`MatcherExt`](super::MatcherExt);
//! `AllOf` and `AnyOf` take any number of boxed matchers.

use super::Matcher;
use crate::description::{Description, SelfDescribing};
use crate::error::MatchError;
use crate::object::Object;

/// AND combinator - both matchers must match.
#[derive(Clone, Copy, Debug)]
pub struct And<M1, M2>(pub M1, pub M2);

impl<M1: SelfDescribing, M2: SelfDescribing> SelfDescribing for And<M1, M2> {
    fn describe_to(&self, description: &mut Description) {
        description
            .append_text("(")
            .append_description_of(&self.0)
            .append_text(" and ")
            .append_description_of(&self.1)
            .append_text(")");
    }
}

impl<M1: Matcher, M2: Matcher> Matcher for And<M1, M2> {
    fn try_matches(
        &self,
        item: &dyn Object,
        mismatch: &mut Description,
    ) -> Result<bool, MatchError> {
        all_match(&[&self.0 as &dyn Matcher, &self.1], item, mismatch)
    }
}

/// OR combinator - either matcher must match.
#[derive(Clone, Copy, Debug)]
pub struct Or<M1, M2>(pub M1, pub M2);

impl<M1: SelfDescribing, M2: SelfDescribing> SelfDescribing for Or<M1, M2> {
    fn describe_to(&self, description: &mut Description) {
        description
            .append_text("(")
            .append_description_of(&self.0)
            .append_text(" or ")
            .append_description_of(&self.1)
            .append_text(")");
    }
}

impl<M1: Matcher, M2: Matcher> Matcher for Or<M1, M2> {
    fn try_matches(
        &self,
        item: &dyn Object,
        mismatch: &mut Description,
    ) -> Result<bool, MatchError> {
        any_match(&[&self.0 as &dyn Matcher, &self.1], item, mismatch)
    }
}

/// NOT combinator - inverts the matcher.
#[derive(Clone, Copy, Debug)]
pub struct Not<M>(pub M);

impl<M: SelfDescribing> SelfDescribing for Not<M> {
    fn describe_to(&self, description: &mut Description) {
        description.append_text("not ").append_description_of(&self.0);
    }
}

impl<M: Matcher> Matcher for Not<M> {
    fn try_matches(
        &self,
        item: &dyn Object,
        mismatch: &mut Description,
    ) -> Result<bool, MatchError> {
        let mut ignored = Description::new();
        if !self.0.try_matches(item, &mut ignored)? {
            return Ok(true);
        }
        mismatch.append_text("was ").append_value(item);
        Ok(false)
    }
}

/// Matches when every matcher matches.
///
/// # Example
///
/// ```rust
/// use stillmatch::prelude::*;
///
/// let m = all_of(vec![instance_of::<i32>().boxed(), equal_to(3).not().boxed()]);
/// assert!(m.matches(&4));
/// assert!(!m.matches(&3));
/// ```
#[derive(Default)]
pub struct AllOf(pub Vec<Box<dyn Matcher>>);

impl std::fmt::Debug for AllOf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("AllOf").field(&Description::of(self)).finish()
    }
}

impl SelfDescribing for AllOf {
    fn describe_to(&self, description: &mut Description) {
        describe_list(&self.0, " and ", description);
    }
}

impl Matcher for AllOf {
    fn try_matches(
        &self,
        item: &dyn Object,
        mismatch: &mut Description,
    ) -> Result<bool, MatchError> {
        let matchers: Vec<&dyn Matcher> = self.0.iter().map(|m| &**m).collect();
        all_match(&matchers, item, mismatch)
    }
}

/// Create a matcher that requires every matcher in `matchers` to match.
pub fn all_of(matchers: Vec<Box<dyn Matcher>>) -> AllOf {
    AllOf(matchers)
}

/// Matches when at least one matcher matches.
#[derive(Default)]
pub struct AnyOf(pub Vec<Box<dyn Matcher>>);

impl std::fmt::Debug for AnyOf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("AnyOf").field(&Description::of(self)).finish()
    }
}

impl SelfDescribing for AnyOf {
    fn describe_to(&self, description: &mut Description) {
        describe_list(&self.0, " or ", description);
    }
}

impl Matcher for AnyOf {
    fn try_matches(
        &self,
        item: &dyn Object,
        mismatch: &mut Description,
    ) -> Result<bool, MatchError> {
        let matchers: Vec<&dyn Matcher> = self.0.iter().map(|m| &**m).collect();
        any_match(&matchers, item, mismatch)
    }
}

/// Create a matcher that requires at least one matcher in `matchers` to match.
pub fn any_of(matchers: Vec<Box<dyn Matcher>>) -> AnyOf {
    AnyOf(matchers)
}

// Reports the first failing matcher as "<description> <mismatch>".
fn all_match(
    matchers: &[&dyn Matcher],
    item: &dyn Object,
    mismatch: &mut Description,
) -> Result<bool, MatchError> {
    for &matcher in matchers {
        let mut inner = Description::new();
        if !matcher.try_matches(item, &mut inner)? {
            mismatch
                .append_description_of(matcher)
                .append_text(" ")
                .append_text(inner.as_str());
            return Ok(false);
        }
    }
    Ok(true)
}

fn any_match(
    matchers: &[&dyn Matcher],
    item: &dyn Object,
    mismatch: &mut Description,
) -> Result<bool, MatchError> {
    for matcher in matchers {
        let mut ignored = Description::new();
        if matcher.try_matches(item, &mut ignored)? {
            return Ok(true);
        }
    }
    mismatch.append_text("was ").append_value(item);
    Ok(false)
}

fn describe_list(matchers: &[Box<dyn Matcher>], separator: &str, description: &mut Description) {
    description.append_text("(");
    for (i, matcher) in matchers.iter().enumerate() {
        if i > 0 {
            description.append_text(separator);
        }
        description.append_description_of(matcher);
    }
    description.append_text(")");
}
