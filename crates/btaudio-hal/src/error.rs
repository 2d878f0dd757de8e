//! Fatal fault taxonomy for HAL negotiation.
//!
//! Only environment faults live here: conditions where the platform
//! contract itself is broken, such as a missing registry or a listing
//! query dying at the transport layer. The negotiation core surfaces
//! them as `Err` and leaves process termination to the hosting stack.
//! Ordinary "no provider" outcomes are not errors; they resolve to
//! `HalVersion::Unavailable` or `Ok(None)`.

use serde::{Deserialize, Serialize};

use crate::registry::RemoteFault;

/// A broken platform precondition discovered during negotiation or bind.
#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
pub enum EnvironmentFault {
    /// The legacy instance broker could not be reached at all.
    #[error("instance broker unreachable")]
    BrokerUnreachable,

    /// An instance listing query failed at the transport level.
    ///
    /// Distinct from an empty listing, which is a normal negotiation
    /// outcome.
    #[error("instance listing failed for {descriptor}: {fault}")]
    ListingFailed {
        /// Interface descriptor whose listing was queried.
        descriptor: String,
        /// The underlying remote-call failure.
        #[source]
        fault: RemoteFault,
    },

    /// A factory bind returned no handle where the resolved version
    /// guarantees one.
    #[error("provider factory bind returned no handle for {descriptor}")]
    FactoryBindFailed {
        /// Interface descriptor the bind was issued against.
        descriptor: String,
    },
}

impl EnvironmentFault {
    /// Create a listing-failed fault.
    pub fn listing_failed(descriptor: impl Into<String>, fault: RemoteFault) -> Self {
        Self::ListingFailed {
            descriptor: descriptor.into(),
            fault,
        }
    }

    /// Create a factory-bind-failed fault.
    pub fn factory_bind_failed(descriptor: impl Into<String>) -> Self {
        Self::FactoryBindFailed {
            descriptor: descriptor.into(),
        }
    }
}

/// Standard Result type for negotiation operations.
pub type Result<T> = std::result::Result<T, EnvironmentFault>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptors::{HIDL_2_0_FACTORY, HIDL_2_1_FACTORY};

    #[test]
    fn faults_render_their_descriptor() {
        let fault = EnvironmentFault::listing_failed(HIDL_2_1_FACTORY, RemoteFault::new("dead"));
        assert!(matches!(fault, EnvironmentFault::ListingFailed { .. }));
        assert_eq!(
            fault.to_string(),
            format!("instance listing failed for {HIDL_2_1_FACTORY}: dead")
        );

        let fault = EnvironmentFault::factory_bind_failed(HIDL_2_1_FACTORY);
        assert_eq!(
            fault.to_string(),
            format!("provider factory bind returned no handle for {HIDL_2_1_FACTORY}")
        );
    }

    #[test]
    fn listing_fault_exposes_its_source() {
        use std::error::Error as _;

        let fault = EnvironmentFault::listing_failed(HIDL_2_0_FACTORY, RemoteFault::new("timeout"));
        let source = fault.source().map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("timeout"));
    }
}
