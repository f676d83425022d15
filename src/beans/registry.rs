//! Property registry keyed by runtime type

use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use super::has_property::{self, HasProperty, HasPropertyWithValue};
use super::introspect::{Bean, BeanInfo};
use crate::matcher::Matcher;
use crate::object::Object;

/// Shared map from runtime type to its [`BeanInfo`].
///
/// Cloning a `Registry` yields another handle to the same map. Matchers
/// built from a registry resolve properties through it at evaluation time,
/// so types may be registered after the matcher is built.
///
/// # Example
///
/// ```rust
/// use stillmatch::beans::{BeanInfo, Registry};
/// use stillmatch::prelude::*;
///
/// #[derive(Debug)]
/// struct Person {
///     name: String,
/// }
///
/// let registry = Registry::new();
/// registry.register(BeanInfo::builder::<Person>().getter("getName", |p| p.name.clone()).build());
///
/// let m = registry.has_property_with_value("name", equal_to("Iain"));
/// assert!(m.matches(&Person { name: "Iain".to_string() }));
/// ```
#[derive(Clone, Default)]
pub struct Registry {
    beans: Arc<RwLock<HashMap<TypeId, Arc<BeanInfo>>>>,
}

static GLOBAL: OnceLock<Registry> = OnceLock::new();

impl Registry {
    /// Create an empty, independent registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry used by the free factory functions.
    pub fn global() -> Registry {
        GLOBAL.get_or_init(Registry::new).clone()
    }

    /// Register `info`, returning the entry it replaced.
    pub fn register(&self, info: BeanInfo) -> Option<Arc<BeanInfo>> {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            bean = info.type_name(),
            properties = info.properties().len(),
            methods = info.methods().len(),
            "registering bean info"
        );
        // A panic while holding the lock cannot leave the map half-written.
        let mut beans = self.beans.write().unwrap_or_else(PoisonError::into_inner);
        beans.insert(info.type_id(), Arc::new(info))
    }

    /// Register a type that describes itself.
    pub fn register_bean<B: Bean>(&self) -> Option<Arc<BeanInfo>> {
        self.register(B::bean_info())
    }

    /// Remove the entry for `type_id`.
    pub fn unregister(&self, type_id: TypeId) -> Option<Arc<BeanInfo>> {
        let mut beans = self.beans.write().unwrap_or_else(PoisonError::into_inner);
        beans.remove(&type_id)
    }

    /// Returns `true` if `B` has been registered.
    pub fn is_registered<B: Object>(&self) -> bool {
        self.bean_info(TypeId::of::<B>()).is_some()
    }

    /// Look up the entry for `type_id`.
    pub fn bean_info(&self, type_id: TypeId) -> Option<Arc<BeanInfo>> {
        let beans = self.beans.read().unwrap_or_else(PoisonError::into_inner);
        beans.get(&type_id).cloned()
    }

    /// Look up the entry for the runtime type of `bean`.
    pub fn bean_info_of(&self, bean: &dyn Object) -> Option<Arc<BeanInfo>> {
        self.bean_info(bean.as_any().type_id())
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.beans
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// See [`has_property`](crate::beans::has_property()).
    pub fn has_property(&self, name: &str) -> HasProperty {
        HasProperty::new(name).using(self.clone())
    }

    /// See [`has_property_with_value`](crate::beans::has_property_with_value).
    pub fn has_property_with_value<M: Matcher>(
        &self,
        name: &str,
        value_matcher: M,
    ) -> HasPropertyWithValue<M> {
        HasPropertyWithValue::new(name, value_matcher).using(self.clone())
    }

    /// See [`has_property_with_value_formatted`](crate::beans::has_property_with_value_formatted).
    pub fn has_property_with_value_formatted<M: Matcher>(
        &self,
        name: &str,
        value_matcher: M,
        message_format: &str,
    ) -> HasPropertyWithValue<M> {
        HasPropertyWithValue::with_format(name, value_matcher, message_format).using(self.clone())
    }

    /// See [`has_property_at_path`](crate::beans::has_property_at_path).
    pub fn has_property_at_path<M: Matcher + 'static>(
        &self,
        path: &str,
        value_matcher: M,
    ) -> Box<dyn Matcher> {
        has_property::path_in(self, path, value_matcher)
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let beans = self.beans.read().unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<&str> = beans.values().map(|info| info.type_name()).collect();
        names.sort_unstable();
        f.debug_struct("Registry").field("beans", &names).finish()
    }
}
