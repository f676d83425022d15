//! End-to-end tests for property matchers
//!
//! Exercises the public API the way a test suite would: beans registered
//! on the global registry, matchers built with the free functions, and
//! failures rendered through the assertion helpers.

use std::fmt;

use stillmatch::beans::ReadMethod;
use stillmatch::prelude::*;
use stillmatch::testing::verify_that;
use stillmatch::{assert_mismatch, assert_that};

// Example domain types for testing
#[derive(Debug, Clone, PartialEq)]
struct Address {
    street: String,
    city: String,
}

#[derive(Debug, Clone)]
struct Person {
    name: String,
    age: Option<u32>,
    address: Address,
    active: bool,
}

#[derive(Debug)]
struct LookupError(&'static str);

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "lookup failed: {}", self.0)
    }
}

impl Bean for Person {
    fn bean_info() -> BeanInfo {
        BeanInfo::builder::<Self>()
            .getter("getName", |p| p.name.clone())
            .try_getter("getAge", |p| p.age.ok_or(LookupError("age")))
            .getter("getAddress", |p| p.address.clone())
            .getter("isActive", |p| p.active)
            .write_only("password")
            .method("greet", |p| format!("Hello, {}", p.name))
            .method("forget", |_| ())
            .build()
    }
}

impl Bean for Address {
    fn bean_info() -> BeanInfo {
        BeanInfo::builder::<Self>()
            .property("street", |a| a.street.clone())
            .property("city", |a| a.city.clone())
            .build()
    }
}

fn setup() {
    let registry = Registry::global();
    registry.register_bean::<Person>();
    registry.register_bean::<Address>();
}

fn iain() -> Person {
    Person {
        name: "Iain".to_string(),
        age: None,
        address: Address {
            street: "1 High Street".to_string(),
            city: "Leeds".to_string(),
        },
        active: true,
    }
}

fn mismatch_of(matcher: &dyn Matcher, item: &dyn Object) -> String {
    let mut mismatch = Description::new();
    matcher.describe_mismatch(item, &mut mismatch);
    mismatch.into_string()
}

#[test]
fn test_named_property_matches_its_value() {
    setup();

    assert_that!(iain(), has_property_with_value("name", equal_to("Iain")));
    assert_that!(iain(), has_property_with_value("active", equal_to(true)));
    assert_that!(iain(), has_property_with_value("greet", equal_to("Hello, Iain")));
}

#[test]
fn test_wrong_value_names_property_and_found_value() {
    setup();

    let report = verify_that("", &iain(), &has_property_with_value("name", equal_to("Bob")));
    let report = report.expect_err("Bob should not match Iain");

    assert_eq!(report.expected, "hasProperty(\"name\", \"Bob\")");
    assert_eq!(report.actual, " property 'name' was \"Iain\"");
}

#[test]
fn test_missing_property_is_named() {
    setup();

    assert_mismatch!(
        iain(),
        has_property_with_value("nickname", anything()),
        "No property \"nickname\""
    );
}

#[test]
fn test_unreadable_properties() {
    setup();

    assert_mismatch!(
        iain(),
        has_property_with_value("password", anything()),
        "property \"password\" is not readable"
    );
    assert_mismatch!(
        iain(),
        has_property_with_value("forget", anything()),
        "property \"forget\" is not readable"
    );
}

#[test]
fn test_failing_accessor_reports_its_message() {
    setup();

    let m = has_property_with_value("age", anything());
    let mut mismatch = Description::new();

    assert_eq!(m.try_matches(&iain(), &mut mismatch), Ok(false));
    assert!(mismatch.as_str().contains("getAge() -> u32"));
    assert!(mismatch.as_str().ends_with("': \"lookup failed: age\""));
}

#[test]
fn test_present_optional_value() {
    setup();

    let mut older = iain();
    older.age = Some(42);
    assert_that!(older, has_property_with_value("age", equal_to(42u32)));
}

#[test]
fn test_path_navigation() {
    setup();

    assert_that!(iain(), has_property_at_path("address.city", equal_to("Leeds")));
    assert_that!(iain(), has_property_at_path("address", instance_of::<Address>()));
    assert_mismatch!(
        iain(),
        has_property_at_path("address.city", equal_to("York")),
        "address.city.was \"Leeds\""
    );
    assert_mismatch!(
        iain(),
        has_property_at_path("address.country", anything()),
        "address.No property \"country\""
    );
}

#[test]
fn test_path_equals_manual_nesting() {
    setup();

    for expected in ["Leeds", "York"] {
        let path = has_property_at_path("address.city", equal_to(expected));
        let manual =
            has_property_with_value("address", has_property_with_value("city", equal_to(expected)));

        assert_eq!(path.matches(&iain()), manual.matches(&iain()));
    }
}

#[test]
fn test_composes_with_other_matchers() {
    setup();

    let m = instance_of::<Person>()
        .and(has_property("name"))
        .and(has_property_with_value("name", equal_to("Bob")).not());

    assert_that!(iain(), m);
    assert_mismatch!(42, instance_of::<Person>().and(has_property("name")));
}

#[test]
fn test_reflective_failure_is_not_a_mismatch() {
    #[derive(Debug)]
    struct Vault;

    let registry = Registry::new();
    registry.register(
        BeanInfo::builder::<Vault>()
            .raw_property(
                "secret",
                Some(ReadMethod::from_fn("Vault::secret() -> String", "String", |_| {
                    Err(InvocationError::illegal_access("secret is sealed"))
                })),
            )
            .build(),
    );

    let m = registry.has_property_with_value("secret", anything());
    let result = m.try_matches(&Vault, &mut Description::new());

    match result {
        Err(MatchError::InvariantViolation { accessor, cause }) => {
            assert_eq!(accessor, "Vault::secret() -> String");
            assert_eq!(cause, InvocationError::illegal_access("secret is sealed"));
        }
        other => panic!("expected an invariant violation, got {:?}", other),
    }
}

#[test]
#[should_panic(expected = "Calling: 'Vault::secret() -> String' should not have thrown")]
fn test_reflective_failure_panics_in_assertions() {
    #[derive(Debug)]
    struct Vault;

    let registry = Registry::new();
    registry.register(
        BeanInfo::builder::<Vault>()
            .raw_property(
                "secret",
                Some(ReadMethod::from_fn("Vault::secret() -> String", "String", |_| {
                    Err(InvocationError::illegal_argument("wrong receiver"))
                })),
            )
            .build(),
    );

    assert_that!(Vault, registry.has_property_with_value("secret", anything()));
}

#[test]
fn test_repeat_evaluation_is_stable() {
    setup();

    let m = has_property_at_path("address.street", equal_to("2 Low Road"));
    let first = mismatch_of(&*m, &iain());
    let second = mismatch_of(&*m, &iain());

    assert_eq!(first, second);
    assert_eq!(m.matches(&iain()), m.matches(&iain()));
}
