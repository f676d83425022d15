//! Runtime type check

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;

use super::Matcher;
use crate::description::{Description, SelfDescribing};
use crate::error::MatchError;
use crate::object::Object;

/// Matcher for values whose concrete type is `T`.
///
/// `Some(t)` of `Option<T>` also matches; `None` never does.
pub struct InstanceOf<T> {
    _type: PhantomData<fn() -> T>,
}

impl<T> Clone for InstanceOf<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for InstanceOf<T> {}

impl<T> fmt::Debug for InstanceOf<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("InstanceOf")
            .field(&std::any::type_name::<T>())
            .finish()
    }
}

impl<T: Any> InstanceOf<T> {
    fn is_instance(item: &dyn Object) -> bool {
        let any = item.as_any();
        any.is::<T>() || any.downcast_ref::<Option<T>>().is_some_and(Option::is_some)
    }
}

impl<T> SelfDescribing for InstanceOf<T> {
    fn describe_to(&self, description: &mut Description) {
        description
            .append_text("an instance of ")
            .append_text(std::any::type_name::<T>());
    }
}

impl<T: Any> Matcher for InstanceOf<T> {
    fn try_matches(
        &self,
        item: &dyn Object,
        mismatch: &mut Description,
    ) -> Result<bool, MatchError> {
        if Self::is_instance(item) {
            return Ok(true);
        }
        if item.as_any().is::<Option<T>>() {
            mismatch.append_text("was None");
        } else {
            mismatch
                .append_value(item)
                .append_text(" is a ")
                .append_text(item.type_name());
        }
        Ok(false)
    }
}

/// Create a matcher that checks the candidate's concrete type.
///
/// Rust has no subclassing, so only `T` itself (or `Some` of it) matches.
///
/// # Example
///
/// ```rust
/// use stillmatch::prelude::*;
///
/// assert!(instance_of::<String>().matches(&String::from("Iain")));
/// assert!(instance_of::<String>().matches(&Some(String::from("Iain"))));
/// assert!(!instance_of::<String>().matches(&None::<String>));
/// assert!(!instance_of::<String>().matches(&42));
/// assert_eq!(Description::of(&instance_of::<String>()), "an instance of alloc::string::String");
/// ```
pub fn instance_of<T: Any>() -> InstanceOf<T> {
    InstanceOf { _type: PhantomData }
}

/// Alias of [`instance_of`].
pub fn is_a<T: Any>() -> InstanceOf<T> {
    instance_of()
}
