//! Equality and catch-all matchers

use std::fmt::Debug;

use super::Matcher;
use crate::description::{Description, SelfDescribing};
use crate::error::MatchError;
use crate::object::Object;

/// Matcher for equality with an expected value.
#[derive(Clone, Copy, Debug)]
pub struct EqualTo<T>(pub T);

impl<T> EqualTo<T>
where
    T: PartialEq + Debug + Send + Sync + 'static,
{
    fn is_equal(&self, item: &dyn Object) -> bool {
        if let Some(value) = item.as_any().downcast_ref::<T>() {
            return *value == self.0;
        }
        // String and &'static str compare by content.
        match (Object::as_str(&self.0), item.as_str()) {
            (Some(expected), Some(actual)) => expected == actual,
            _ => false,
        }
    }
}

impl<T: Debug> SelfDescribing for EqualTo<T> {
    fn describe_to(&self, description: &mut Description) {
        description.append_value(&self.0);
    }
}

impl<T> Matcher for EqualTo<T>
where
    T: PartialEq + Debug + Send + Sync + 'static,
{
    fn try_matches(
        &self,
        item: &dyn Object,
        mismatch: &mut Description,
    ) -> Result<bool, MatchError> {
        if self.is_equal(item) {
            return Ok(true);
        }
        mismatch.append_text("was ").append_value(item);
        Ok(false)
    }
}

/// Create a matcher that checks for equality.
///
/// The candidate must have the same concrete type as `expected`, except
/// that `String` and `&'static str` compare by content.
///
/// # Example
///
/// ```rust
/// use stillmatch::prelude::*;
///
/// assert!(equal_to(5).matches(&5));
/// assert!(!equal_to(5).matches(&4));
/// assert!(!equal_to(5).matches(&5u8));
/// assert!(equal_to("Iain").matches(&String::from("Iain")));
/// ```
pub fn equal_to<T>(expected: T) -> EqualTo<T>
where
    T: PartialEq + Debug + Send + Sync + 'static,
{
    EqualTo(expected)
}

/// Matcher that accepts every value.
#[derive(Clone, Copy, Debug, Default)]
pub struct Anything;

impl SelfDescribing for Anything {
    fn describe_to(&self, description: &mut Description) {
        description.append_text("ANYTHING");
    }
}

impl Matcher for Anything {
    #[inline]
    fn try_matches(
        &self,
        _item: &dyn Object,
        _mismatch: &mut Description,
    ) -> Result<bool, MatchError> {
        Ok(true)
    }
}

/// Create a matcher that always matches.
pub fn anything() -> Anything {
    Anything
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[test]
    fn test_equal_to_same_type() {
        assert!(equal_to(Point { x: 1, y: 2 }).matches(&Point { x: 1, y: 2 }));
        assert!(!equal_to(Point { x: 1, y: 2 }).matches(&Point { x: 2, y: 1 }));
    }

    #[test]
    fn test_equal_to_other_type_never_matches() {
        assert!(!equal_to(1i64).matches(&1i32));
    }

    #[test]
    fn test_equal_to_strings_compare_by_content() {
        assert!(equal_to("Iain").matches(&"Iain".to_string()));
        assert!(equal_to("Iain".to_string()).matches(&"Iain"));
        assert!(!equal_to("Iain").matches(&"Bob".to_string()));
    }

    #[test]
    fn test_equal_to_descriptions() {
        assert_eq!(Description::of(&equal_to("Iain")), "\"Iain\"");

        let mut mismatch = Description::new();
        assert_eq!(equal_to("Bob").try_matches(&"Iain".to_string(), &mut mismatch), Ok(false));
        assert_eq!(mismatch.as_str(), "was \"Iain\"");
    }

    #[test]
    fn test_anything() {
        assert!(anything().matches(&()));
        assert!(anything().matches(&Point { x: 0, y: 0 }));
        assert_eq!(Description::of(&anything()), "ANYTHING");
    }
}
