//! Version and transport negotiation for the Bluetooth audio-provider HAL.
//!
//! A process negotiates exactly once which revision of the remote
//! audio-provider factory it will talk to, and over which transport. The
//! probe prefers the modern service-manager instance and falls back to the
//! broker-enumerated legacy descriptors, newest first; whatever it
//! resolves is cached for the process lifetime and served to concurrent
//! callers without re-probing.
//!
//! # Architecture
//!
//! - **Negotiation**: [`HalNegotiator`] runs the one-time probe and owns
//!   the resolved `(transport, version)` pair
//! - **Registry seams**: the injected [`ServiceManager`],
//!   [`InstanceBroker`] and [`PropertyStore`] traits keep real IPC out of
//!   the core
//! - **Handles**: [`FactoryHandle`] tags each bound factory with the
//!   transport it speaks
//! - **Entry point**: [`global::init_with`] resolves the process-wide
//!   instance exactly once, even under concurrent first access

pub mod descriptors;
pub mod error;
pub mod global;
pub mod negotiator;
pub mod registry;
pub mod version;

// Re-exports
pub use error::{EnvironmentFault, Result};
pub use negotiator::HalNegotiator;
pub use registry::{
    FactoryHandle, InstanceBroker, PlatformServices, PropertyStore, ProviderFactoryBinding,
    RemoteFault, ServiceManager,
};
pub use version::{HalTransport, HalVersion};
