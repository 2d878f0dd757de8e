//! Mock platform collaborators with recorded call logs.
//!
//! Builders (`with_*`) stage the platform shape a test wants; setters
//! (`set_*`, `replace_*`, `remove_*`) perturb an already-built fixture.
//! Every registry call is recorded so tests can assert not just on the
//! resolved outcome but on which descriptors were consulted and how often.

use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use btaudio_hal::{
    InstanceBroker, PropertyStore, ProviderFactoryBinding, RemoteFault, ServiceManager,
};

/// Scripted provider-factory binding.
pub struct MockBinding {
    response: Result<i32, String>,
    remote: bool,
    version_queries: Mutex<usize>,
}

impl MockBinding {
    /// A binding reporting `version` from its version query.
    #[must_use]
    pub fn with_version(version: i32) -> Self {
        Self {
            response: Ok(version),
            remote: false,
            version_queries: Mutex::new(0),
        }
    }

    /// A binding whose version query fails remotely.
    #[must_use]
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            response: Err(reason.into()),
            remote: false,
            version_queries: Mutex::new(0),
        }
    }

    /// Mark the binding as hosted in another process.
    #[must_use]
    pub fn remote(mut self) -> Self {
        self.remote = true;
        self
    }

    /// How many times the version query ran.
    #[must_use]
    pub fn version_queries(&self) -> usize {
        *self.version_queries.lock()
    }
}

impl ProviderFactoryBinding for MockBinding {
    fn interface_version(&self) -> Result<i32, RemoteFault> {
        *self.version_queries.lock() += 1;
        self.response.clone().map_err(RemoteFault::new)
    }

    fn is_remote(&self) -> bool {
        self.remote
    }
}

/// Scripted modern service registry.
#[derive(Default)]
pub struct MockServiceManager {
    services: Mutex<HashMap<String, Arc<dyn ProviderFactoryBinding>>>,
    declared_only: Mutex<HashSet<String>>,
    declared_queries: Mutex<Vec<String>>,
    waits: Mutex<Vec<String>>,
}

impl MockServiceManager {
    /// A registry with nothing declared.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Declare `instance` and serve `binding` from its blocking bind.
    #[must_use]
    pub fn with_service(self, instance: &str, binding: Arc<dyn ProviderFactoryBinding>) -> Self {
        self.services.lock().insert(instance.to_owned(), binding);
        self
    }

    /// Declare `instance` but hand back nothing from its blocking bind.
    #[must_use]
    pub fn declared_without_binding(self, instance: &str) -> Self {
        self.declared_only.lock().insert(instance.to_owned());
        self
    }

    /// Swap the binding served for an already-staged `instance`.
    pub fn replace_service(&self, instance: &str, binding: Arc<dyn ProviderFactoryBinding>) {
        self.services.lock().insert(instance.to_owned(), binding);
    }

    /// Instances the declaration check was asked about, in order.
    #[must_use]
    pub fn declared_queries(&self) -> Vec<String> {
        self.declared_queries.lock().clone()
    }

    /// Instances the blocking bind was asked for, in order.
    #[must_use]
    pub fn waited_instances(&self) -> Vec<String> {
        self.waits.lock().clone()
    }
}

impl ServiceManager for MockServiceManager {
    fn is_declared(&self, instance: &str) -> bool {
        self.declared_queries.lock().push(instance.to_owned());
        self.services.lock().contains_key(instance) || self.declared_only.lock().contains(instance)
    }

    fn wait_for_service(&self, instance: &str) -> Option<Arc<dyn ProviderFactoryBinding>> {
        self.waits.lock().push(instance.to_owned());
        self.services.lock().get(instance).cloned()
    }
}

/// Scripted legacy instance broker.
pub struct MockBroker {
    reachable: Mutex<bool>,
    listings: Mutex<HashMap<String, Result<Vec<String>, String>>>,
    factories: Mutex<HashMap<String, Arc<dyn ProviderFactoryBinding>>>,
    listing_queries: Mutex<Vec<String>>,
    factory_waits: Mutex<Vec<String>>,
}

impl MockBroker {
    /// A reachable broker with no registered instances.
    ///
    /// Descriptors that were never staged list as empty, which is the
    /// normal negative answer, not a fault.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            reachable: Mutex::new(true),
            listings: Mutex::new(HashMap::new()),
            factories: Mutex::new(HashMap::new()),
            listing_queries: Mutex::new(Vec::new()),
            factory_waits: Mutex::new(Vec::new()),
        }
    }

    /// Register instance names under `descriptor`.
    #[must_use]
    pub fn with_instances(self, descriptor: &str, names: &[&str]) -> Self {
        let names = names.iter().map(|name| (*name).to_owned()).collect();
        self.listings.lock().insert(descriptor.to_owned(), Ok(names));
        self
    }

    /// Serve `binding` from the blocking factory bind under `descriptor`.
    #[must_use]
    pub fn with_factory(self, descriptor: &str, binding: Arc<dyn ProviderFactoryBinding>) -> Self {
        self.factories.lock().insert(descriptor.to_owned(), binding);
        self
    }

    /// Make the broker itself unreachable.
    pub fn set_unreachable(&self) {
        *self.reachable.lock() = false;
    }

    /// Fail the listing query for `descriptor` at the transport level.
    pub fn set_listing_fault(&self, descriptor: &str, reason: impl Into<String>) {
        self.listings
            .lock()
            .insert(descriptor.to_owned(), Err(reason.into()));
    }

    /// Drop the staged factory under `descriptor`; binds hand back nothing.
    pub fn remove_factory(&self, descriptor: &str) {
        self.factories.lock().remove(descriptor);
    }

    /// Descriptors the listing query was asked about, in order.
    #[must_use]
    pub fn listing_queries(&self) -> Vec<String> {
        self.listing_queries.lock().clone()
    }

    /// Descriptors the blocking factory bind was asked for, in order.
    #[must_use]
    pub fn factory_waits(&self) -> Vec<String> {
        self.factory_waits.lock().clone()
    }
}

impl InstanceBroker for MockBroker {
    fn is_reachable(&self) -> bool {
        *self.reachable.lock()
    }

    fn list_instances(&self, descriptor: &str) -> Result<Vec<String>, RemoteFault> {
        self.listing_queries.lock().push(descriptor.to_owned());
        match self.listings.lock().get(descriptor) {
            Some(Ok(names)) => Ok(names.clone()),
            Some(Err(reason)) => Err(RemoteFault::new(reason.clone())),
            None => Ok(Vec::new()),
        }
    }

    fn wait_for_factory(&self, descriptor: &str) -> Option<Arc<dyn ProviderFactoryBinding>> {
        self.factory_waits.lock().push(descriptor.to_owned());
        self.factories.lock().get(descriptor).cloned()
    }
}

/// Scripted property store.
#[derive(Default)]
pub struct MockProperties {
    values: Mutex<HashMap<String, bool>>,
    queries: Mutex<Vec<String>>,
}

impl MockProperties {
    /// A store with every key unset.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Set a boolean property.
    #[must_use]
    pub fn with_bool(self, key: &str, value: bool) -> Self {
        self.values.lock().insert(key.to_owned(), value);
        self
    }

    /// Keys that were looked up, in order.
    #[must_use]
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().clone()
    }
}

impl PropertyStore for MockProperties {
    fn get_bool(&self, key: &str, default: bool) -> bool {
        self.queries.lock().push(key.to_owned());
        self.values.lock().get(key).copied().unwrap_or(default)
    }
}
