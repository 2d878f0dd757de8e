//! One-time version and transport negotiation for the audio-provider HAL.
//!
//! The probe runs exactly once per process, at construction. The modern
//! factory instance is consulted first; only when it is not declared does
//! the probe fall through to the legacy descriptors, newest first. The
//! resolved pair is final: accessors serve the cached answer for the rest
//! of the process lifetime, and factory fetches bind at the resolved
//! version only.

use parking_lot::Mutex;
use std::fmt;
use tracing::{debug, error, info, warn};

use crate::descriptors::{provider_factory_instance, HIDL_2_0_FACTORY, HIDL_2_1_FACTORY};
use crate::error::{EnvironmentFault, Result};
use crate::registry::{FactoryHandle, PlatformServices};
use crate::version::{HalTransport, HalVersion};

/// Resolved negotiation state plus the platform surface for later binds.
///
/// `transport` is written once, before the instance is shared, so reading
/// it without a lock is sound. `version` sits behind a short-held mutex
/// that also serialises the read/compare step of factory fetches.
pub struct HalNegotiator {
    services: PlatformServices,
    transport: HalTransport,
    version: Mutex<HalVersion>,
}

impl HalNegotiator {
    /// Run the one-time probe against `services` and cache the outcome.
    ///
    /// Broken platform preconditions (unreachable broker, a listing query
    /// that dies at the transport level) surface as `Err`; a device with
    /// no provider at all is the non-fatal `(Unknown, Unavailable)`
    /// resolution.
    pub fn negotiate(services: PlatformServices) -> Result<Self> {
        let (transport, version) = probe(&services)?;
        info!(%transport, %version, "audio provider HAL negotiated");
        Ok(Self {
            services,
            transport,
            version: Mutex::new(version),
        })
    }

    /// The negotiated version. Short lock, no I/O.
    #[must_use]
    pub fn version(&self) -> HalVersion {
        *self.version.lock()
    }

    /// The negotiated transport. Write-once, read without a lock.
    #[must_use]
    pub fn transport(&self) -> HalTransport {
        self.transport
    }

    /// Bind a fresh handle to the legacy provider factory.
    ///
    /// The bind always happens at the resolved legacy version: a caller
    /// asking for the older factory on a 2.1 device is upgraded
    /// transparently. With `prefer_newer` set, only a 2.1 resolution
    /// answers. Returns `Ok(None)` when the resolved transport is not
    /// legacy. Handles are never cached; every call binds anew.
    pub fn legacy_factory(&self, prefer_newer: bool) -> Result<Option<FactoryHandle>> {
        let (descriptor, version) = {
            let resolved = self.version.lock();
            match (*resolved, prefer_newer) {
                (HalVersion::Hidl21, _) => (HIDL_2_1_FACTORY, HalVersion::Hidl21),
                (HalVersion::Hidl20, false) => (HIDL_2_0_FACTORY, HalVersion::Hidl20),
                _ => return Ok(None),
            }
        };

        // Guard dropped above: the bind may block indefinitely.
        let binding = match self.services.broker.wait_for_factory(descriptor) {
            Some(binding) => binding,
            None => return Err(EnvironmentFault::factory_bind_failed(descriptor)),
        };
        info!(
            descriptor,
            %version,
            remote = binding.is_remote(),
            "legacy provider factory bound"
        );
        Ok(Some(FactoryHandle::Hidl { version, binding }))
    }
}

impl fmt::Debug for HalNegotiator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HalNegotiator")
            .field("transport", &self.transport)
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}

/// Resolve the `(transport, version)` pair for this device.
fn probe(services: &PlatformServices) -> Result<(HalTransport, HalVersion)> {
    let candidate = provider_factory_instance(services.properties.as_ref());
    debug!(instance = candidate, "checking modern provider factory");
    if services.service_manager.is_declared(candidate) {
        let version = modern_interface_version(services, candidate);
        if version == HalVersion::Unavailable {
            // No legacy fallback once the modern service is detected.
            warn!(
                instance = candidate,
                "modern provider factory present but unusable"
            );
        }
        return Ok((HalTransport::Aidl, version));
    }

    if !services.broker.is_reachable() {
        return Err(EnvironmentFault::BrokerUnreachable);
    }
    for (descriptor, version) in [
        (HIDL_2_1_FACTORY, HalVersion::Hidl21),
        (HIDL_2_0_FACTORY, HalVersion::Hidl20),
    ] {
        let instances = services
            .broker
            .list_instances(descriptor)
            .map_err(|fault| EnvironmentFault::listing_failed(descriptor, fault))?;
        debug!(descriptor, instances = instances.len(), "legacy listing");
        if !instances.is_empty() {
            return Ok((HalTransport::Hidl, version));
        }
    }

    error!("no supported audio provider HAL");
    Ok((HalTransport::Unknown, HalVersion::Unavailable))
}

/// Query the detected modern factory for its interface version.
///
/// Every failure folds into `Unavailable`, whether the registry handed
/// back no binding at all or the version query failed or reported an
/// integer outside the known range.
fn modern_interface_version(services: &PlatformServices, instance: &str) -> HalVersion {
    let binding = match services.service_manager.wait_for_service(instance) {
        Some(binding) => binding,
        None => {
            error!(instance, "cannot query interface version of unknown factory");
            return HalVersion::Unavailable;
        }
    };
    match binding.interface_version() {
        Ok(raw) => {
            let version = HalVersion::from_aidl_interface_version(raw);
            if version == HalVersion::Unavailable {
                error!(instance, raw, "unknown interface version");
            }
            version
        }
        Err(fault) => {
            error!(instance, %fault, "interface version query failed");
            HalVersion::Unavailable
        }
    }
}
