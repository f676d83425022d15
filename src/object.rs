//! Dynamic value model shared by every matcher.
//!
//! Candidates and resolved property values are passed around as
//! `&dyn Object`. Every `'static` type that implements [`Debug`] is an
//! `Object`, so callers never implement this trait by hand.
//!
//! # Example
//!
//! ```rust
//! use stillmatch::Object;
//!
//! let value: &dyn Object = &String::from("Iain");
//! assert_eq!(value.as_str(), Some("Iain"));
//! assert!(value.as_any().is::<String>());
//! assert_eq!(value.type_name(), "alloc::string::String");
//! ```

use std::any::Any;
use std::fmt::Debug;

/// A value that can be inspected at runtime.
pub trait Object: Any + Debug {
    /// View the value as [`Any`] for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Fully qualified name of the concrete type.
    fn type_name(&self) -> &'static str;

    /// String view of `String` and `&'static str` values.
    fn as_str(&self) -> Option<&str>;
}

impl<T: Any + Debug> Object for T {
    fn as_any(&self) -> &dyn Any {
        match boxed_inner(self) {
            Some(inner) => inner.as_any(),
            None => self,
        }
    }

    fn type_name(&self) -> &'static str {
        match boxed_inner(self) {
            Some(inner) => inner.type_name(),
            None => std::any::type_name::<T>(),
        }
    }

    fn as_str(&self) -> Option<&str> {
        let any = self.as_any();
        any.downcast_ref::<String>()
            .map(String::as_str)
            .or_else(|| any.downcast_ref::<&'static str>().copied())
    }
}

// A `Box<dyn Object>` is itself an `Object`; it stands for the value inside.
fn boxed_inner(value: &dyn Any) -> Option<&dyn Object> {
    value.downcast_ref::<Box<dyn Object>>().map(|inner| &**inner)
}
