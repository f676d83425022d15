//! # Stillmatch
//!
//! Small, composable matchers that test a value and explain themselves.
//!
//! ## Philosophy
//!
//! A matcher is a pure predicate with a voice:
//! - it says what it expects ([`SelfDescribing`]),
//! - it says why a value failed ([`Matcher::describe_mismatch`]).
//!
//! Mismatches are ordinary `false` results with a description. Misuse that
//! must not be mistaken for a failing test surfaces as a [`MatchError`].
//!
//! ## Quick Example
//!
//! ```rust
//! use stillmatch::beans::{BeanInfo, Registry};
//! use stillmatch::prelude::*;
//!
//! #[derive(Debug)]
//! struct Person {
//!     name: String,
//! }
//!
//! Registry::global().register(
//!     BeanInfo::builder::<Person>().getter("getName", |p| p.name.clone()).build(),
//! );
//!
//! let iain = Person { name: "Iain".to_string() };
//!
//! assert!(instance_of::<Person>().matches(&iain));
//! assert!(has_property_with_value("name", equal_to("Iain")).matches(&iain));
//!
//! let m = has_property_with_value("name", equal_to("Bob"));
//! let mut mismatch = Description::new();
//! m.describe_mismatch(&iain, &mut mismatch);
//! assert_eq!(mismatch.as_str(), " property 'name' was \"Iain\"");
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod beans;
pub mod condition;
pub mod description;
pub mod error;
pub mod matcher;
pub mod object;
pub mod testing;

// Re-exports
pub use beans::{has_property, has_property_at_path, has_property_with_value, Registry};
pub use condition::Condition;
pub use description::{Description, SelfDescribing};
pub use error::{InvocationError, MatchError};
pub use matcher::{anything, equal_to, instance_of, is_a, Matcher, MatcherExt};
pub use object::Object;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::beans::{
        has_property, has_property_at_path, has_property_with_value,
        has_property_with_value_formatted, Bean, BeanInfo, Registry,
    };
    pub use crate::description::{Description, SelfDescribing};
    pub use crate::error::{InvocationError, MatchError};
    pub use crate::matcher::{
        all_of, any_of, anything, equal_to, instance_of, is_a, Matcher, MatcherExt,
    };
    pub use crate::object::Object;
}
