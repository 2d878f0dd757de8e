//! Pre-wired platform shapes for negotiation tests.
//!
//! A fixture owns typed handles to its mocks so tests can perturb them and
//! read call logs after the fact, and hands the negotiator the same mocks
//! through [`PlatformFixture::services`].

use std::sync::Arc;

use btaudio_hal::descriptors::{DEFAULT_FACTORY_INSTANCE, HIDL_2_0_FACTORY, HIDL_2_1_FACTORY};
use btaudio_hal::{InstanceBroker, PlatformServices, PropertyStore, ServiceManager};

use crate::mocks::{MockBinding, MockBroker, MockProperties, MockServiceManager};

/// A staged platform: three mocks plus the bundle the negotiator consumes.
pub struct PlatformFixture {
    /// Modern service registry mock.
    pub manager: Arc<MockServiceManager>,
    /// Legacy instance broker mock.
    pub broker: Arc<MockBroker>,
    /// Property store mock.
    pub properties: Arc<MockProperties>,
}

impl PlatformFixture {
    fn new(manager: MockServiceManager, broker: MockBroker, properties: MockProperties) -> Self {
        Self {
            manager: Arc::new(manager),
            broker: Arc::new(broker),
            properties: Arc::new(properties),
        }
    }

    /// The collaborator bundle backed by this fixture's mocks.
    #[must_use]
    pub fn services(&self) -> PlatformServices {
        PlatformServices::new(
            Arc::clone(&self.manager) as Arc<dyn ServiceManager>,
            Arc::clone(&self.broker) as Arc<dyn InstanceBroker>,
            Arc::clone(&self.properties) as Arc<dyn PropertyStore>,
        )
    }

    /// Replace the service-manager mock.
    #[must_use]
    pub fn with_manager(mut self, manager: MockServiceManager) -> Self {
        self.manager = Arc::new(manager);
        self
    }

    /// Replace the broker mock.
    #[must_use]
    pub fn with_broker(mut self, broker: MockBroker) -> Self {
        self.broker = Arc::new(broker);
        self
    }

    /// Replace the property-store mock.
    #[must_use]
    pub fn with_properties(mut self, properties: MockProperties) -> Self {
        self.properties = Arc::new(properties);
        self
    }
}

/// A device whose default modern factory reports `version`.
#[must_use]
pub fn modern_platform(version: i32) -> PlatformFixture {
    let manager = MockServiceManager::empty().with_service(
        DEFAULT_FACTORY_INSTANCE,
        Arc::new(MockBinding::with_version(version)),
    );
    PlatformFixture::new(manager, MockBroker::empty(), MockProperties::empty())
}

/// A device with only the 2.1 legacy factory registered.
#[must_use]
pub fn legacy_platform_21() -> PlatformFixture {
    let broker = MockBroker::empty()
        .with_instances(HIDL_2_1_FACTORY, &["default"])
        .with_factory(HIDL_2_1_FACTORY, Arc::new(MockBinding::with_version(0)));
    PlatformFixture::new(MockServiceManager::empty(), broker, MockProperties::empty())
}

/// A device with only the 2.0 legacy factory registered.
#[must_use]
pub fn legacy_platform_20() -> PlatformFixture {
    let broker = MockBroker::empty()
        .with_instances(HIDL_2_0_FACTORY, &["default"])
        .with_factory(HIDL_2_0_FACTORY, Arc::new(MockBinding::with_version(0)));
    PlatformFixture::new(MockServiceManager::empty(), broker, MockProperties::empty())
}

/// A device with no audio provider anywhere and a reachable broker.
#[must_use]
pub fn bare_platform() -> PlatformFixture {
    PlatformFixture::new(
        MockServiceManager::empty(),
        MockBroker::empty(),
        MockProperties::empty(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixtures_stage_the_shape_they_claim() {
        let fixture = modern_platform(4);
        assert!(fixture.manager.is_declared(DEFAULT_FACTORY_INSTANCE));

        let fixture = legacy_platform_21();
        assert!(!fixture.manager.is_declared(DEFAULT_FACTORY_INSTANCE));
        let instances = fixture.broker.list_instances(HIDL_2_1_FACTORY).unwrap();
        assert_eq!(instances, vec!["default".to_owned()]);
        assert!(fixture
            .broker
            .list_instances(HIDL_2_0_FACTORY)
            .unwrap()
            .is_empty());
    }
}
