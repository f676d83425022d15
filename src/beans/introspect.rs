//! Explicit property metadata for bean-style types
//!
//! A [`BeanInfo`] lists the properties and zero-argument methods a type
//! exposes, each with an optional [`ReadMethod`]. It is the hand-written
//! counterpart of runtime reflection: the host registers what can be read,
//! and matchers look it up by the candidate's runtime type.

use std::any::{type_name, Any, TypeId};
use std::fmt::{self, Display};
use std::marker::PhantomData;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use crate::error::InvocationError;
use crate::object::Object;

type InvokeFn = dyn Fn(&dyn Object) -> Result<Box<dyn Object>, InvocationError> + Send + Sync;

/// A zero-argument accessor that reads a value off a bean.
#[derive(Clone)]
pub struct ReadMethod {
    signature: String,
    return_type: &'static str,
    void: bool,
    invoke: Arc<InvokeFn>,
}

impl ReadMethod {
    /// Wrap a typed accessor.
    ///
    /// The receiver is downcast to `B` before `f` runs; a receiver of any
    /// other type is an [`InvocationError::IllegalArgument`]. A panic inside
    /// `f` is reported as an [`InvocationError::Target`] failure.
    pub fn typed<B, R, F>(name: &str, f: F) -> Self
    where
        B: Object,
        R: Object,
        F: Fn(&B) -> Result<R, InvocationError> + Send + Sync + 'static,
    {
        let signature = format!("{}::{}() -> {}", type_name::<B>(), name, type_name::<R>());
        let invoke = move |bean: &dyn Object| -> Result<Box<dyn Object>, InvocationError> {
            let receiver = bean.as_any().downcast_ref::<B>().ok_or_else(|| {
                InvocationError::illegal_argument(format!(
                    "object is not an instance of declaring type {}",
                    type_name::<B>()
                ))
            })?;
            let value = catch_unwind(AssertUnwindSafe(|| f(receiver))).map_err(panic_failure)??;
            Ok(Box::new(value) as Box<dyn Object>)
        };
        ReadMethod {
            signature,
            return_type: type_name::<R>(),
            void: TypeId::of::<R>() == TypeId::of::<()>(),
            invoke: Arc::new(invoke),
        }
    }

    /// Wrap an untyped accessor supplied by the host.
    ///
    /// Nothing is checked: `f` receives the bean as-is and its errors are
    /// passed through unchanged.
    pub fn from_fn<F>(signature: impl Into<String>, return_type: &'static str, f: F) -> Self
    where
        F: Fn(&dyn Object) -> Result<Box<dyn Object>, InvocationError> + Send + Sync + 'static,
    {
        ReadMethod {
            signature: signature.into(),
            return_type,
            void: return_type == "()",
            invoke: Arc::new(f),
        }
    }

    /// Human-readable accessor signature, used in diagnostics.
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Name of the returned type.
    pub fn return_type(&self) -> &'static str {
        self.return_type
    }

    /// Returns `true` if the accessor returns `()`.
    pub fn is_void(&self) -> bool {
        self.void
    }

    /// Call the accessor on `bean`.
    pub fn invoke(&self, bean: &dyn Object) -> Result<Box<dyn Object>, InvocationError> {
        (self.invoke)(bean)
    }
}

impl fmt::Debug for ReadMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadMethod")
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

fn panic_failure(payload: Box<dyn Any + Send>) -> InvocationError {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        InvocationError::target(*message)
    } else if let Some(message) = payload.downcast_ref::<String>() {
        InvocationError::target(message.clone())
    } else {
        InvocationError::target_without_message()
    }
}

/// A named property and the accessor that reads it, if any.
#[derive(Clone, Debug)]
pub struct PropertyDescriptor {
    name: String,
    read_method: Option<ReadMethod>,
}

impl PropertyDescriptor {
    /// Create a descriptor.
    pub fn new(name: impl Into<String>, read_method: Option<ReadMethod>) -> Self {
        PropertyDescriptor {
            name: name.into(),
            read_method,
        }
    }

    /// Property name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The accessor, unless the property is write-only.
    pub fn read_method(&self) -> Option<&ReadMethod> {
        self.read_method.as_ref()
    }
}

/// A named zero-argument method.
#[derive(Clone, Debug)]
pub struct MethodDescriptor {
    name: String,
    method: ReadMethod,
}

impl MethodDescriptor {
    /// Create a descriptor.
    pub fn new(name: impl Into<String>, method: ReadMethod) -> Self {
        MethodDescriptor {
            name: name.into(),
            method,
        }
    }

    /// Method name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The method itself.
    pub fn method(&self) -> &ReadMethod {
        &self.method
    }
}

/// Either kind of descriptor found by name.
#[derive(Clone, Copy, Debug)]
pub enum Feature<'a> {
    /// A property.
    Property(&'a PropertyDescriptor),
    /// A zero-argument method.
    Method(&'a MethodDescriptor),
}

impl<'a> Feature<'a> {
    /// Name of the property or method.
    pub fn name(&self) -> &'a str {
        match self {
            Feature::Property(property) => property.name(),
            Feature::Method(method) => method.name(),
        }
    }

    /// The accessor to call, if there is one.
    pub fn read_method(&self) -> Option<&'a ReadMethod> {
        match self {
            Feature::Property(property) => property.read_method(),
            Feature::Method(method) => Some(method.method()),
        }
    }
}

/// Everything readable on one runtime type.
#[derive(Clone, Debug)]
pub struct BeanInfo {
    type_id: TypeId,
    type_name: &'static str,
    properties: Vec<PropertyDescriptor>,
    methods: Vec<MethodDescriptor>,
}

impl BeanInfo {
    /// Start describing `B`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use stillmatch::beans::BeanInfo;
    ///
    /// #[derive(Debug)]
    /// struct Person {
    ///     name: String,
    ///     active: bool,
    /// }
    ///
    /// let info = BeanInfo::builder::<Person>()
    ///     .getter("getName", |p| p.name.clone())
    ///     .getter("is_active", |p| p.active)
    ///     .build();
    ///
    /// assert!(info.property_descriptor("name").is_some());
    /// assert!(info.property_descriptor("active").is_some());
    /// assert!(info.method_descriptor("getName").is_some());
    /// ```
    pub fn builder<B: Object>() -> BeanInfoBuilder<B> {
        BeanInfoBuilder {
            info: BeanInfo {
                type_id: TypeId::of::<B>(),
                type_name: type_name::<B>(),
                properties: Vec::new(),
                methods: Vec::new(),
            },
            _bean: PhantomData,
        }
    }

    /// The described type.
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Name of the described type.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// All registered properties, in registration order.
    pub fn properties(&self) -> &[PropertyDescriptor] {
        &self.properties
    }

    /// All registered methods, in registration order.
    pub fn methods(&self) -> &[MethodDescriptor] {
        &self.methods
    }

    /// Property named exactly `name`.
    pub fn property_descriptor(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.iter().find(|p| p.name() == name)
    }

    /// Method named exactly `name`.
    pub fn method_descriptor(&self, name: &str) -> Option<&MethodDescriptor> {
        self.methods.iter().find(|m| m.name() == name)
    }

    /// Property named `name`, falling back to a method of that name.
    pub fn find(&self, name: &str) -> Option<Feature<'_>> {
        self.property_descriptor(name)
            .map(Feature::Property)
            .or_else(|| self.method_descriptor(name).map(Feature::Method))
    }
}

/// Typed builder for a [`BeanInfo`].
///
/// Registering a name twice replaces the earlier entry.
#[derive(Debug)]
pub struct BeanInfoBuilder<B> {
    info: BeanInfo,
    _bean: PhantomData<fn(&B)>,
}

impl<B: Object> BeanInfoBuilder<B> {
    /// Readable property `name`.
    pub fn property<R, F>(self, name: &str, f: F) -> Self
    where
        R: Object,
        F: Fn(&B) -> R + Send + Sync + 'static,
    {
        let read = ReadMethod::typed(name, move |bean: &B| Ok(f(bean)));
        self.raw_property(name, Some(read))
    }

    /// Readable property `name` whose accessor can fail.
    ///
    /// An `Err` is reported as a mismatch carrying its `Display` text.
    pub fn try_property<R, E, F>(self, name: &str, f: F) -> Self
    where
        R: Object,
        E: Display,
        F: Fn(&B) -> Result<R, E> + Send + Sync + 'static,
    {
        let read = ReadMethod::typed(name, move |bean: &B| {
            f(bean).map_err(|err| InvocationError::target(err.to_string()))
        });
        self.raw_property(name, Some(read))
    }

    /// Accessor named by bean convention.
    ///
    /// `getFoo`/`get_foo` register property `foo`, and so do `isFoo`/`is_foo`
    /// when the accessor returns `bool`. The accessor is also registered as
    /// a method under its own name. Names that follow no convention become
    /// methods only.
    pub fn getter<R, F>(self, accessor: &str, f: F) -> Self
    where
        R: Object,
        F: Fn(&B) -> R + Send + Sync + 'static,
    {
        let read = ReadMethod::typed(accessor, move |bean: &B| Ok(f(bean)));
        self.accessor(accessor, read, TypeId::of::<R>() == TypeId::of::<bool>())
    }

    /// Fallible accessor named by bean convention.
    pub fn try_getter<R, E, F>(self, accessor: &str, f: F) -> Self
    where
        R: Object,
        E: Display,
        F: Fn(&B) -> Result<R, E> + Send + Sync + 'static,
    {
        let read = ReadMethod::typed(accessor, move |bean: &B| {
            f(bean).map_err(|err| InvocationError::target(err.to_string()))
        });
        self.accessor(accessor, read, TypeId::of::<R>() == TypeId::of::<bool>())
    }

    /// Zero-argument method `name`.
    pub fn method<R, F>(self, name: &str, f: F) -> Self
    where
        R: Object,
        F: Fn(&B) -> R + Send + Sync + 'static,
    {
        let read = ReadMethod::typed(name, move |bean: &B| Ok(f(bean)));
        self.raw_method(name, read)
    }

    /// Zero-argument method `name` that can fail.
    pub fn try_method<R, E, F>(self, name: &str, f: F) -> Self
    where
        R: Object,
        E: Display,
        F: Fn(&B) -> Result<R, E> + Send + Sync + 'static,
    {
        let read = ReadMethod::typed(name, move |bean: &B| {
            f(bean).map_err(|err| InvocationError::target(err.to_string()))
        });
        self.raw_method(name, read)
    }

    /// Property `name` with no accessor.
    pub fn write_only(self, name: &str) -> Self {
        self.raw_property(name, None)
    }

    /// Property `name` with a host-supplied accessor.
    pub fn raw_property(mut self, name: &str, read_method: Option<ReadMethod>) -> Self {
        let descriptor = PropertyDescriptor::new(name, read_method);
        match self.info.properties.iter_mut().find(|p| p.name() == name) {
            Some(existing) => *existing = descriptor,
            None => self.info.properties.push(descriptor),
        }
        self
    }

    /// Method `name` with a host-supplied implementation.
    pub fn raw_method(mut self, name: &str, method: ReadMethod) -> Self {
        let descriptor = MethodDescriptor::new(name, method);
        match self.info.methods.iter_mut().find(|m| m.name() == name) {
            Some(existing) => *existing = descriptor,
            None => self.info.methods.push(descriptor),
        }
        self
    }

    /// Finish the description.
    pub fn build(self) -> BeanInfo {
        self.info
    }

    fn accessor(self, accessor: &str, read: ReadMethod, returns_bool: bool) -> Self {
        let builder = self.raw_method(accessor, read.clone());
        match property_name_for_accessor(accessor, returns_bool) {
            Some(property) => builder.raw_property(&property, Some(read)),
            None => builder,
        }
    }
}

/// Types that describe their own properties.
///
/// # Example
///
/// ```rust
/// use stillmatch::beans::{Bean, BeanInfo, Registry};
///
/// #[derive(Debug)]
/// struct Point {
///     x: i32,
/// }
///
/// impl Bean for Point {
///     fn bean_info() -> BeanInfo {
///         BeanInfo::builder::<Self>().property("x", |p| p.x).build()
///     }
/// }
///
/// let registry = Registry::new();
/// registry.register_bean::<Point>();
/// assert!(registry.is_registered::<Point>());
/// ```
pub trait Bean: Object + Sized {
    /// Describe this type's readable properties.
    fn bean_info() -> BeanInfo;
}

/// Property name implied by an accessor name, per bean convention.
///
/// Handles both `getFooBar` and `get_foo_bar` spellings. `is` prefixes
/// only count for boolean accessors.
///
/// # Example
///
/// ```rust
/// use stillmatch::beans::property_name_for_accessor;
///
/// assert_eq!(property_name_for_accessor("getName", false).as_deref(), Some("name"));
/// assert_eq!(property_name_for_accessor("get_first_name", false).as_deref(), Some("first_name"));
/// assert_eq!(property_name_for_accessor("getURL", false).as_deref(), Some("URL"));
/// assert_eq!(property_name_for_accessor("isActive", true).as_deref(), Some("active"));
/// assert_eq!(property_name_for_accessor("isActive", false), None);
/// assert_eq!(property_name_for_accessor("getter", false), None);
/// ```
pub fn property_name_for_accessor(accessor: &str, returns_bool: bool) -> Option<String> {
    let mut prefixes = vec!["get"];
    if returns_bool {
        prefixes.push("is");
    }

    for prefix in prefixes {
        let Some(rest) = accessor.strip_prefix(prefix) else {
            continue;
        };
        if let Some(snake) = rest.strip_prefix('_') {
            if !snake.is_empty() {
                return Some(snake.to_string());
            }
        } else if rest.starts_with(|c: char| c.is_uppercase()) {
            return Some(decapitalize(rest));
        }
    }
    None
}

// "FooBah" -> "fooBah", but "URL" stays "URL".
fn decapitalize(name: &str) -> String {
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(first), Some(second)) if first.is_uppercase() && second.is_uppercase() => {
            name.to_string()
        }
        (Some(first), _) => first
            .to_lowercase()
            .chain(name[first.len_utf8()..].chars())
            .collect(),
        (None, _) => String::new(),
    }
}
