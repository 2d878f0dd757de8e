//! Platform registry abstractions consumed by the negotiator.
//!
//! The negotiation core never talks to real IPC. It sees the platform
//! through three injected traits: the modern service manager (lookup by
//! instance name), the legacy instance broker (enumeration by interface
//! descriptor), and the property store (feature flags). Production wires
//! real registry clients behind these traits; tests wire the mocks from
//! `btaudio-testkit`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::version::{HalTransport, HalVersion};

/// A failed call into a remote registry or service.
///
/// Carries only the reason string; the transport-level detail stays with
/// the binding layer that produced it.
#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
#[error("{reason}")]
pub struct RemoteFault {
    reason: String,
}

impl RemoteFault {
    /// Create a fault from a reason string.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// The reason reported by the failing call.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// An obtained reference to a remote provider factory.
///
/// Opaque to the negotiator except for the two queries it needs: the
/// self-reported interface version (modern probe) and whether the service
/// lives in another process (logged on every successful bind).
pub trait ProviderFactoryBinding: Send + Sync {
    /// The interface version the remote service reports for itself.
    fn interface_version(&self) -> Result<i32, RemoteFault>;

    /// Whether the service is hosted outside the calling process.
    fn is_remote(&self) -> bool;
}

/// Modern service registry: versioned services looked up by instance name.
pub trait ServiceManager: Send + Sync {
    /// Whether `instance` is declared on this device. Non-blocking.
    fn is_declared(&self, instance: &str) -> bool;

    /// Wait for `instance` and bind it. Blocks until the service is up;
    /// `None` means the registry handed back nothing.
    fn wait_for_service(&self, instance: &str) -> Option<Arc<dyn ProviderFactoryBinding>>;
}

/// Legacy service registry: interface instances enumerated by descriptor.
pub trait InstanceBroker: Send + Sync {
    /// Whether the broker itself can be reached. On any sane device this
    /// is true; false means the platform image is broken.
    fn is_reachable(&self) -> bool;

    /// Enumerate registered instance names under `descriptor`.
    ///
    /// An empty listing is a normal answer (nothing registered); `Err` is
    /// a transport-level failure of the query itself.
    fn list_instances(&self, descriptor: &str) -> Result<Vec<String>, RemoteFault>;

    /// Wait for the default factory under `descriptor` and bind it.
    /// Blocks until the service is up; `None` means no handle came back.
    fn wait_for_factory(&self, descriptor: &str) -> Option<Arc<dyn ProviderFactoryBinding>>;
}

/// Read access to system properties.
pub trait PropertyStore: Send + Sync {
    /// Boolean property lookup with a default for unset keys.
    fn get_bool(&self, key: &str, default: bool) -> bool;
}

/// The injected platform surface handed to the negotiator.
#[derive(Clone)]
pub struct PlatformServices {
    /// Modern service registry.
    pub service_manager: Arc<dyn ServiceManager>,
    /// Legacy instance broker.
    pub broker: Arc<dyn InstanceBroker>,
    /// System property store.
    pub properties: Arc<dyn PropertyStore>,
}

impl PlatformServices {
    /// Bundle the three platform collaborators.
    pub fn new(
        service_manager: Arc<dyn ServiceManager>,
        broker: Arc<dyn InstanceBroker>,
        properties: Arc<dyn PropertyStore>,
    ) -> Self {
        Self {
            service_manager,
            broker,
            properties,
        }
    }
}

/// A provider-factory handle tagged with the transport it was bound over.
///
/// Callers pattern-match on the variant instead of downcasting; the
/// variant fixes which protocol family the binding speaks.
#[derive(Clone)]
pub enum FactoryHandle {
    /// Factory bound over the modern transport.
    Aidl {
        /// Negotiated version the handle was bound at.
        version: HalVersion,
        /// The live service reference.
        binding: Arc<dyn ProviderFactoryBinding>,
    },
    /// Factory bound over the legacy transport.
    Hidl {
        /// Negotiated version the handle was bound at.
        version: HalVersion,
        /// The live service reference.
        binding: Arc<dyn ProviderFactoryBinding>,
    },
}

impl FactoryHandle {
    /// The version this handle was bound at.
    #[must_use]
    pub fn version(&self) -> HalVersion {
        match self {
            Self::Aidl { version, .. } | Self::Hidl { version, .. } => *version,
        }
    }

    /// The transport this handle speaks.
    #[must_use]
    pub fn transport(&self) -> HalTransport {
        match self {
            Self::Aidl { .. } => HalTransport::Aidl,
            Self::Hidl { .. } => HalTransport::Hidl,
        }
    }

    /// The underlying service reference.
    #[must_use]
    pub fn binding(&self) -> Arc<dyn ProviderFactoryBinding> {
        match self {
            Self::Aidl { binding, .. } | Self::Hidl { binding, .. } => Arc::clone(binding),
        }
    }
}

impl fmt::Debug for FactoryHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FactoryHandle")
            .field("transport", &self.transport())
            .field("version", &self.version())
            .field("remote", &self.binding().is_remote())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    // Shadow the crate-local names with the dependency build's, which is
    // the build `MockBinding` implements `ProviderFactoryBinding` for.
    use btaudio_hal::{FactoryHandle, HalTransport, HalVersion, ProviderFactoryBinding};
    use btaudio_testkit::MockBinding;

    #[test]
    fn handles_report_their_tag() {
        let binding: Arc<dyn ProviderFactoryBinding> = Arc::new(MockBinding::with_version(3));
        let handle = FactoryHandle::Aidl {
            version: HalVersion::AidlV3,
            binding: Arc::clone(&binding),
        };
        assert_eq!(handle.version(), HalVersion::AidlV3);
        assert_eq!(handle.transport(), HalTransport::Aidl);

        let handle = FactoryHandle::Hidl {
            version: HalVersion::Hidl21,
            binding,
        };
        assert_eq!(handle.transport(), HalTransport::Hidl);
        assert!(handle.version().is_hidl());
    }

    #[test]
    fn remote_fault_preserves_its_reason() {
        let fault = RemoteFault::new("binder transaction failed");
        assert_eq!(fault.reason(), "binder transaction failed");
        assert_eq!(fault.to_string(), "binder transaction failed");
    }
}
