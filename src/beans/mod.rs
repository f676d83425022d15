//! Property matchers for bean-style values
//!
//! Rust has no runtime reflection, so readable properties are declared up
//! front: a [`BeanInfo`] lists what a type exposes and a [`Registry`] maps
//! runtime types to their `BeanInfo`. Matchers built here resolve property
//! names through a registry at evaluation time.
//!
//! # Example
//!
//! ```rust
//! use stillmatch::beans::{Bean, BeanInfo, Registry};
//! use stillmatch::prelude::*;
//!
//! #[derive(Debug)]
//! struct Person {
//!     name: String,
//!     age: Option<u32>,
//! }
//!
//! impl Bean for Person {
//!     fn bean_info() -> BeanInfo {
//!         BeanInfo::builder::<Self>()
//!             .getter("getName", |p| p.name.clone())
//!             .try_getter("getAge", |p| p.age.ok_or("age unknown"))
//!             .build()
//!     }
//! }
//!
//! let registry = Registry::new();
//! registry.register_bean::<Person>();
//!
//! let iain = Person { name: "Iain".to_string(), age: None };
//! assert!(registry.has_property_with_value("name", equal_to("Iain")).matches(&iain));
//!
//! // A failing accessor is a mismatch, not a crash.
//! let m = registry.has_property_with_value("age", anything());
//! let mut mismatch = Description::new();
//! assert_eq!(m.try_matches(&iain, &mut mismatch), Ok(false));
//! assert!(mismatch.as_str().ends_with("\"age unknown\""));
//! ```

mod has_property;
mod introspect;
mod registry;

pub use has_property::{
    has_property, has_property_at_path, has_property_with_value, has_property_with_value_formatted,
    HasProperty, HasPropertyWithValue, PATH_FORMAT, PROPERTY_FORMAT,
};
pub use introspect::{
    property_name_for_accessor, Bean, BeanInfo, BeanInfoBuilder, Feature, MethodDescriptor,
    PropertyDescriptor, ReadMethod,
};
pub use registry::Registry;
