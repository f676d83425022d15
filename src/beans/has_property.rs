//! Matchers over named bean properties

use std::fmt;

use super::introspect::{Feature, ReadMethod};
use super::registry::Registry;
use crate::condition::{Condition, ConditionResultExt, StepResult};
use crate::description::{Description, SelfDescribing};
use crate::error::{InvocationError, MatchError};
use crate::matcher::Matcher;
use crate::object::Object;

/// Label used in front of the value mismatch; `{}` is the property name.
pub const PROPERTY_FORMAT: &str = " property '{}' ";

/// Label used by each segment of a dotted path.
pub const PATH_FORMAT: &str = "{}.";

/// Matcher for a property whose value satisfies an inner matcher.
///
/// Built by [`has_property_with_value`], [`has_property_with_value_formatted`]
/// or [`has_property_at_path`].
pub struct HasPropertyWithValue<M> {
    property_name: String,
    value_matcher: M,
    message_format: String,
    registry: Registry,
}

impl<M: Matcher> HasPropertyWithValue<M> {
    /// Match property `name` against `value_matcher` with the default label.
    pub fn new(name: &str, value_matcher: M) -> Self {
        Self::with_format(name, value_matcher, PROPERTY_FORMAT)
    }

    /// Match property `name` against `value_matcher` with a custom label.
    pub fn with_format(name: &str, value_matcher: M, message_format: &str) -> Self {
        HasPropertyWithValue {
            property_name: name.to_string(),
            value_matcher,
            message_format: message_format.to_string(),
            registry: Registry::global(),
        }
    }

    /// Resolve properties through `registry` instead of the global one.
    pub fn using(mut self, registry: Registry) -> Self {
        self.registry = registry;
        self
    }

    /// The property being read.
    pub fn property_name(&self) -> &str {
        &self.property_name
    }

    fn label(&self) -> String {
        self.message_format.replace("{}", &self.property_name)
    }
}

impl<M: SelfDescribing> SelfDescribing for HasPropertyWithValue<M> {
    fn describe_to(&self, description: &mut Description) {
        description
            .append_text("hasProperty(")
            .append_value(&self.property_name)
            .append_text(", ")
            .append_description_of(&self.value_matcher)
            .append_text(")");
    }
}

impl<M: Matcher> Matcher for HasPropertyWithValue<M> {
    fn try_matches(
        &self,
        bean: &dyn Object,
        mismatch: &mut Description,
    ) -> Result<bool, MatchError> {
        let info = self.registry.bean_info_of(bean);
        let feature = info
            .as_deref()
            .and_then(|info| info.find(&self.property_name));

        property_on(feature, &self.property_name, bean, mismatch)
            .step(with_read_method, mismatch)
            .step(
                |read_method, mismatch| with_property_value(bean, read_method, mismatch),
                mismatch,
            )
            .matching(&self.value_matcher, &self.label(), mismatch)
    }
}

impl<M: SelfDescribing> fmt::Debug for HasPropertyWithValue<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HasPropertyWithValue")
            .field("property_name", &self.property_name)
            .field("value_matcher", &Description::of(&self.value_matcher))
            .field("message_format", &self.message_format)
            .finish_non_exhaustive()
    }
}

fn property_on<'a>(
    feature: Option<Feature<'a>>,
    name: &str,
    bean: &dyn Object,
    mismatch: &mut Description,
) -> StepResult<Feature<'a>> {
    match feature {
        Some(feature) => Ok(Condition::matched(feature)),
        None => {
            #[cfg(feature = "tracing")]
            tracing::debug!("No property {:?} on {}", name, bean.type_name());
            #[cfg(not(feature = "tracing"))]
            let _ = bean;
            mismatch
                .append_text("No property \"")
                .append_text(name)
                .append_text("\"");
            Ok(Condition::not_matched())
        }
    }
}

fn with_read_method<'a>(
    feature: Feature<'a>,
    mismatch: &mut Description,
) -> StepResult<&'a ReadMethod> {
    match feature.read_method() {
        Some(read_method) if !read_method.is_void() => Ok(Condition::matched(read_method)),
        _ => {
            mismatch
                .append_text("property \"")
                .append_text(feature.name())
                .append_text("\" is not readable");
            Ok(Condition::not_matched())
        }
    }
}

fn with_property_value(
    bean: &dyn Object,
    read_method: &ReadMethod,
    mismatch: &mut Description,
) -> StepResult<Box<dyn Object>> {
    #[cfg(feature = "tracing")]
    tracing::trace!(accessor = read_method.signature(), "reading property");

    match read_method.invoke(bean) {
        Ok(value) => Ok(Condition::matched(value)),
        Err(InvocationError::Target { message }) => {
            mismatch
                .append_text("Calling '")
                .append_text(read_method.signature())
                .append_text("': ");
            match message {
                Some(message) => mismatch.append_value(&message),
                None => mismatch.append_text("null"),
            };
            Ok(Condition::not_matched())
        }
        Err(cause) => {
            #[cfg(feature = "tracing")]
            tracing::error!("Accessor {} could not be invoked: {}", read_method.signature(), cause);
            Err(MatchError::invariant_violation(read_method.signature(), cause))
        }
    }
}

/// Matcher for the presence of a property or zero-argument method.
#[derive(Clone, Debug)]
pub struct HasProperty {
    property_name: String,
    registry: Registry,
}

impl HasProperty {
    /// Match beans exposing `name`.
    pub fn new(name: &str) -> Self {
        HasProperty {
            property_name: name.to_string(),
            registry: Registry::global(),
        }
    }

    /// Resolve properties through `registry` instead of the global one.
    pub fn using(mut self, registry: Registry) -> Self {
        self.registry = registry;
        self
    }
}

impl SelfDescribing for HasProperty {
    fn describe_to(&self, description: &mut Description) {
        description
            .append_text("hasProperty(")
            .append_value(&self.property_name)
            .append_text(")");
    }
}

impl Matcher for HasProperty {
    fn try_matches(
        &self,
        bean: &dyn Object,
        mismatch: &mut Description,
    ) -> Result<bool, MatchError> {
        let info = self.registry.bean_info_of(bean);
        let feature = info
            .as_deref()
            .and_then(|info| info.find(&self.property_name));
        Ok(property_on(feature, &self.property_name, bean, mismatch)?.is_matched())
    }
}

/// Create a matcher for beans that expose property `name`.
///
/// # Example
///
/// ```rust
/// use stillmatch::beans::{has_property, BeanInfo, Registry};
/// use stillmatch::Matcher;
///
/// #[derive(Debug)]
/// struct Account {
///     id: u64,
/// }
///
/// Registry::global().register(BeanInfo::builder::<Account>().property("id", |a| a.id).build());
///
/// assert!(has_property("id").matches(&Account { id: 7 }));
/// assert!(!has_property("owner").matches(&Account { id: 7 }));
/// ```
pub fn has_property(name: &str) -> HasProperty {
    HasProperty::new(name)
}

/// Create a matcher for beans whose property `name` satisfies `value_matcher`.
///
/// Properties are resolved through [`Registry::global`].
///
/// # Example
///
/// ```rust
/// use stillmatch::beans::{has_property_with_value, BeanInfo, Registry};
/// use stillmatch::prelude::*;
///
/// #[derive(Debug)]
/// struct Person {
///     name: String,
/// }
///
/// Registry::global().register(
///     BeanInfo::builder::<Person>().getter("getName", |p| p.name.clone()).build(),
/// );
///
/// let iain = Person { name: "Iain".to_string() };
/// assert!(has_property_with_value("name", equal_to("Iain")).matches(&iain));
///
/// let m = has_property_with_value("name", equal_to("Bob"));
/// let mut mismatch = Description::new();
/// m.describe_mismatch(&iain, &mut mismatch);
/// assert_eq!(mismatch.as_str(), " property 'name' was \"Iain\"");
/// assert_eq!(Description::of(&m), "hasProperty(\"name\", \"Bob\")");
/// ```
pub fn has_property_with_value<M: Matcher>(
    name: &str,
    value_matcher: M,
) -> HasPropertyWithValue<M> {
    HasPropertyWithValue::new(name, value_matcher)
}

/// Like [`has_property_with_value`], labelling mismatches with `message_format`.
///
/// Every `{}` in `message_format` is replaced by the property name.
pub fn has_property_with_value_formatted<M: Matcher>(
    name: &str,
    value_matcher: M,
    message_format: &str,
) -> HasPropertyWithValue<M> {
    HasPropertyWithValue::with_format(name, value_matcher, message_format)
}

/// Create a matcher that follows a dot-separated property path.
///
/// `"a.b.c"` nests one property matcher per segment, outermost first, and
/// applies `value_matcher` to the value at the end of the path. The first
/// segment that cannot be resolved stops evaluation and reports there.
/// Trailing dots are ignored, and a path made only of dots yields
/// `value_matcher` itself.
///
/// # Example
///
/// ```rust
/// use stillmatch::beans::{has_property_at_path, BeanInfo, Registry};
/// use stillmatch::prelude::*;
///
/// #[derive(Debug, Clone)]
/// struct Address {
///     city: String,
/// }
///
/// #[derive(Debug)]
/// struct Customer {
///     address: Address,
/// }
///
/// let registry = Registry::new();
/// registry.register(
///     BeanInfo::builder::<Customer>()
///         .property("address", |c| c.address.clone())
///         .build(),
/// );
/// registry.register(
///     BeanInfo::builder::<Address>()
///         .property("city", |a| a.city.clone())
///         .build(),
/// );
///
/// let customer = Customer { address: Address { city: "Leeds".to_string() } };
/// assert!(registry.has_property_at_path("address.city", equal_to("Leeds")).matches(&customer));
///
/// let m = registry.has_property_at_path("address.city", equal_to("York"));
/// let mut mismatch = Description::new();
/// m.describe_mismatch(&customer, &mut mismatch);
/// assert_eq!(mismatch.as_str(), "address.city.was \"Leeds\"");
/// ```
pub fn has_property_at_path<M: Matcher + 'static>(
    path: &str,
    value_matcher: M,
) -> Box<dyn Matcher> {
    path_in(&Registry::global(), path, value_matcher)
}

pub(super) fn path_in<M: Matcher + 'static>(
    registry: &Registry,
    path: &str,
    value_matcher: M,
) -> Box<dyn Matcher> {
    let innermost: Box<dyn Matcher> = Box::new(value_matcher);
    // Trailing separators add no segments; a path of only dots has none.
    let path = match path.trim_end_matches('.') {
        "" if !path.is_empty() => return innermost,
        trimmed => trimmed,
    };
    path.rsplit('.').fold(innermost, |inner, segment| {
        let layer = HasPropertyWithValue::with_format(segment, inner, PATH_FORMAT)
            .using(registry.clone());
        Box::new(layer) as Box<dyn Matcher>
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::beans::BeanInfo;
    use crate::matcher::{anything, equal_to, instance_of};

    #[derive(Debug, Clone)]
    struct Address {
        city: String,
    }

    #[derive(Debug)]
    struct Person {
        name: String,
        address: Address,
    }

    fn iain() -> Person {
        Person {
            name: "Iain".to_string(),
            address: Address {
                city: "Leeds".to_string(),
            },
        }
    }

    fn registry() -> Registry {
        let registry = Registry::new();
        registry.register(
            BeanInfo::builder::<Person>()
                .getter("getName", |p| p.name.clone())
                .property("address", |p| p.address.clone())
                .try_property("age", |_| Err::<u32, _>("age is not recorded"))
                .write_only("password")
                .method("touch", |_| ())
                .build(),
        );
        registry.register(
            BeanInfo::builder::<Address>()
                .property("city", |a| a.city.clone())
                .build(),
        );
        registry
    }

    fn leeds() -> Address {
        Address {
            city: "Leeds".to_string(),
        }
    }

    // Registry whose `Address::city` accessor always fails with `cause`.
    fn failing_city(cause: InvocationError) -> Registry {
        let registry = Registry::new();
        registry.register(
            BeanInfo::builder::<Address>()
                .raw_property(
                    "city",
                    Some(ReadMethod::from_fn("Address::city() -> String", "String", move |_| {
                        Err(cause.clone())
                    })),
                )
                .build(),
        );
        registry
    }

    fn mismatch_of(m: &dyn Matcher, item: &dyn Object) -> String {
        let mut mismatch = Description::new();
        m.describe_mismatch(item, &mut mismatch);
        mismatch.into_string()
    }

    #[test]
    fn test_matches_property_value() {
        let registry = registry();

        assert!(registry

            .has_property_with_value("name", equal_to("Iain"))

            .matches(&iain()));
        assert!(!registry
            .has_property_with_value("name", equal_to("Bob"))
            .matches(&iain()));
    }

    #[test]
    fn test_getter_is_reachable_by_method_name() {
        let registry = registry();
        assert!(registry
            .has_property_with_value("getName", equal_to("Iain"))
            .matches(&iain()));
    }

    #[test]
    fn test_value_mismatch_is_labelled() {
        let m = registry().has_property_with_value("name", equal_to("Bob"));
        assert_eq!(mismatch_of(&m, &iain()), " property 'name' was \"Iain\"");
    }

    #[test]
    fn test_custom_format() {
        let m = registry().has_property_with_value_formatted("name", equal_to("Bob"), "<{}> ");
        assert_eq!(mismatch_of(&m, &iain()), "<name> was \"Iain\"");
    }

    #[test]
    fn test_missing_property() {
        let m = registry().has_property_with_value("nickname", anything());

        assert!(!m.matches(&iain()));
        assert_eq!(mismatch_of(&m, &iain()), "No property \"nickname\"");
    }

    #[test]
    fn test_unregistered_type_has_no_properties() {
        let m = registry().has_property_with_value("name", anything());
        assert_eq!(mismatch_of(&m, &42), "No property \"name\"");
    }

    #[test]
    fn test_write_only_and_void_are_not_readable() {
        let registry = registry();

        let m = registry.has_property_with_value("password", anything());
        assert_eq!(mismatch_of(&m, &iain()), "property \"password\" is not readable");

        let m = registry.has_property_with_value("touch", anything());
        assert_eq!(mismatch_of(&m, &iain()), "property \"touch\" is not readable");
    }

    #[test]
    fn test_failing_accessor_is_a_mismatch() {
        let m = registry().has_property_with_value("age", anything());
        let mut mismatch = Description::new();

        assert_eq!(m.try_matches(&iain(), &mut mismatch), Ok(false));
        assert!(mismatch.as_str().starts_with("Calling '"));
        assert!(mismatch
            .as_str()
            .ends_with("::Person::age() -> u32': \"age is not recorded\""));
    }

    #[test]
    fn test_panicking_accessor_is_a_mismatch() {
        let registry = registry();
        registry.register(
            BeanInfo::builder::<Address>()
                .property("postcode", |_| -> String { panic!("postcode not loaded") })
                .build(),
        );
        let address = leeds();

        let m = registry.has_property_with_value("postcode", anything());
        let mut mismatch = Description::new();

        assert_eq!(m.try_matches(&address, &mut mismatch), Ok(false));
        assert!(mismatch.as_str().starts_with("Calling '"));
        assert!(mismatch
            .as_str()
            .ends_with("::Address::postcode() -> alloc::string::String': \"postcode not loaded\""));
    }

    #[test]
    fn test_accessor_failure_without_message_renders_null() {
        let registry = failing_city(InvocationError::target_without_message());

        let m = registry.has_property_with_value("city", anything());
        let address = leeds();
        assert_eq!(mismatch_of(&m, &address), "Calling 'Address::city() -> String': null");
    }

    #[test]
    fn test_illegal_access_is_fatal() {
        let registry = failing_city(InvocationError::illegal_access("city is private"));
        let m = registry.has_property_with_value("city", anything());
        let address = leeds();

        let mut mismatch = Description::new();
        let err = m.try_matches(&address, &mut mismatch);
        assert_eq!(
            err,
            Err(MatchError::invariant_violation(
                "Address::city() -> String",
                InvocationError::illegal_access("city is private")
            ))
        );
        assert!(mismatch.is_empty());
    }

    #[test]
    #[should_panic(expected = "should not have thrown IllegalAccess: city is private")]
    fn test_illegal_access_panics_from_matches() {
        let registry = failing_city(InvocationError::illegal_access("city is private"));

        registry
            .has_property_with_value("city", anything())
            .matches(&leeds());
    }

    #[test]
    fn test_path_walks_nested_beans() {
        let registry = registry();

        assert!(registry

            .has_property_at_path("address.city", equal_to("Leeds"))

            .matches(&iain()));
        assert!(!registry
            .has_property_at_path("address.city", equal_to("York"))
            .matches(&iain()));
        assert!(registry
            .has_property_at_path("address", instance_of::<Address>())
            .matches(&iain()));
    }

    #[test]
    fn test_path_reports_failing_segment() {
        let registry = registry();

        let m = registry.has_property_at_path("address.postcode", anything());
        assert_eq!(mismatch_of(&*m, &iain()), "address.No property \"postcode\"");

        let m = registry.has_property_at_path("home.city", anything());
        assert_eq!(mismatch_of(&*m, &iain()), "No property \"home\"");

        let m = registry.has_property_at_path("address.city", equal_to("York"));
        assert_eq!(mismatch_of(&*m, &iain()), "address.city.was \"Leeds\"");
    }

    #[test]
    fn test_path_ignores_trailing_dots() {
        let registry = registry();

        let m = registry.has_property_at_path("address.city.", equal_to("Leeds"));
        assert!(m.matches(&iain()));
        assert_eq!(
            Description::of(&m),
            "hasProperty(\"address\", hasProperty(\"city\", \"Leeds\"))"
        );

        let m = registry.has_property_at_path("address.city..", equal_to("York"));
        assert_eq!(mismatch_of(&*m, &iain()), "address.city.was \"Leeds\"");
    }

    #[test]
    fn test_path_of_only_dots_is_the_value_matcher() {
        let m = registry().has_property_at_path("..", equal_to(42));

        assert!(m.matches(&42));
        assert_eq!(Description::of(&m), "42");
    }

    #[test]
    fn test_path_describes_nesting() {
        let m = registry().has_property_at_path("address.city", equal_to("Leeds"));
        assert_eq!(
            Description::of(&m),
            "hasProperty(\"address\", hasProperty(\"city\", \"Leeds\"))"
        );
    }

    #[test]
    fn test_path_agrees_with_manual_nesting() {
        let registry = registry();
        let manual = registry.has_property_with_value(
            "address",
            registry.has_property_with_value("city", equal_to("Leeds")),
        );
        let path = registry.has_property_at_path("address.city", equal_to("Leeds"));

        assert_eq!(manual.matches(&iain()), path.matches(&iain()));
    }

    #[test]
    fn test_boxed_bean_resolves_its_properties() {
        let registry = registry();
        let boxed: Box<dyn Object> = Box::new(iain());

        assert!(registry

            .has_property_with_value("name", equal_to("Iain"))

            .matches(&boxed));
        assert!(registry
            .has_property_at_path("address.city", equal_to("Leeds"))
            .matches(&boxed));
        assert!(registry.has_property("address").matches(&boxed));
    }

    #[test]
    fn test_has_property() {
        let registry = registry();

        assert!(registry.has_property("name").matches(&iain()));
        assert!(registry.has_property("touch").matches(&iain()));
        assert!(!registry.has_property("nickname").matches(&iain()));
        assert_eq!(
            mismatch_of(&registry.has_property("nickname"), &iain()),
            "No property \"nickname\""
        );
        assert_eq!(Description::of(&registry.has_property("name")), "hasProperty(\"name\")");
    }

    #[test]
    fn test_evaluation_is_repeatable() {
        let m = registry().has_property_with_value("age", anything());
        assert_eq!(mismatch_of(&m, &iain()), mismatch_of(&m, &iain()));
        assert_eq!(m.matches(&iain()), m.matches(&iain()));
    }

    #[cfg(feature = "tracing")]
    mod tracing_tests {
        use super::*;
        use tracing_test::traced_test;

        #[test]
        #[traced_test]
        fn test_missing_property_is_logged() {
            registry()
                .has_property_with_value("nickname", anything())
                .matches(&iain());
            assert!(logs_contain("No property \"nickname\""));
        }

        #[test]
        #[traced_test]
        fn test_property_read_is_logged() {
            registry()
                .has_property_with_value("name", anything())
                .matches(&iain());
            assert!(logs_contain("reading property"));
        }

        #[test]
        #[traced_test]
        fn test_invariant_violation_is_logged() {
            let registry = failing_city(InvocationError::illegal_access("city is private"));
            let address = leeds();

            let m = registry.has_property_with_value("city", anything());
            assert!(m.try_matches(&address, &mut Description::new()).is_err());
            assert!(logs_contain("Address::city() -> String could not be invoked"));
        }
    }
}
