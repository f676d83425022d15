//! Text sink for self-describing matchers
//!
//! A [`Description`] accumulates the human-readable text used in assertion
//! failures: what a matcher expects, and why a particular value did not
//! satisfy it.
//!
//! # Example
//!
//! ```rust
//! use stillmatch::Description;
//!
//! let mut description = Description::new();
//! description
//!     .append_text("hasProperty(")
//!     .append_value("name")
//!     .append_text(")");
//!
//! assert_eq!(description.as_str(), "hasProperty(\"name\")");
//! ```

use std::fmt::{self, Debug};

/// Something that can write a description of itself.
pub trait SelfDescribing {
    /// Append a description of `self` to `description`.
    fn describe_to(&self, description: &mut Description);
}

/// Accumulated human-readable text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Description {
    text: String,
}

impl Description {
    /// Create an empty description.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append raw text.
    pub fn append_text(&mut self, text: &str) -> &mut Self {
        self.text.push_str(text);
        self
    }

    /// Append a value using its `Debug` rendering.
    ///
    /// Strings come out quoted and escaped, which is what assertion
    /// messages want.
    pub fn append_value<V: Debug + ?Sized>(&mut self, value: &V) -> &mut Self {
        use std::fmt::Write;
        // Writing into a String cannot fail.
        let _ = write!(self.text, "{:?}", value);
        self
    }

    /// Append the description of another self-describing value.
    pub fn append_description_of<S: SelfDescribing + ?Sized>(&mut self, value: &S) -> &mut Self {
        value.describe_to(self);
        self
    }

    /// Returns `true` if nothing has been appended.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Borrow the accumulated text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Consume the description, returning the accumulated text.
    pub fn into_string(self) -> String {
        self.text
    }

    /// Render the description of `value` into a fresh string.
    pub fn of<S: SelfDescribing + ?Sized>(value: &S) -> String {
        let mut description = Self::new();
        value.describe_to(&mut description);
        description.into_string()
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
