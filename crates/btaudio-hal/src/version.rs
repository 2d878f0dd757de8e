//! HAL version and transport state enums.
//!
//! `HalVersion` variants are declared in recency order so the derived `Ord`
//! matches the negotiation preference order: any AIDL revision outranks any
//! HIDL revision, and within a transport newer outranks older. Call sites in
//! the audio subsystem lean on this ordering for "at least version X" checks.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Transport mechanism used to reach the remote audio-provider service.
///
/// Write-once: resolved during the one-time probe and never changed for the
/// life of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HalTransport {
    /// No transport resolved; no provider service is reachable.
    Unknown,
    /// Modern transport: versioned service-manager instances.
    Aidl,
    /// Legacy transport: broker-enumerated interface instances.
    Hidl,
}

impl fmt::Display for HalTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unknown => "unknown",
            Self::Aidl => "AIDL",
            Self::Hidl => "HIDL",
        };
        f.write_str(name)
    }
}

/// Negotiated protocol revision of the audio-provider service.
///
/// Declaration order is preference order; do not reorder variants.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum HalVersion {
    /// No compatible provider found (or the modern service reported an
    /// unusable version).
    Unavailable,
    /// Legacy provider factory, 2.0 interface.
    Hidl20,
    /// Legacy provider factory, 2.1 interface.
    Hidl21,
    /// Modern provider factory, interface version 1.
    AidlV1,
    /// Modern provider factory, interface version 2.
    AidlV2,
    /// Modern provider factory, interface version 3.
    AidlV3,
    /// Modern provider factory, interface version 4.
    AidlV4,
}

impl HalVersion {
    /// Map a self-reported modern interface version to a `HalVersion`.
    ///
    /// The mapping is total: integers outside the known `1..=4` range fold
    /// to [`HalVersion::Unavailable`], which the probe treats as a detected
    /// but unusable modern service.
    #[must_use]
    pub fn from_aidl_interface_version(version: i32) -> Self {
        match version {
            1 => Self::AidlV1,
            2 => Self::AidlV2,
            3 => Self::AidlV3,
            4 => Self::AidlV4,
            _ => Self::Unavailable,
        }
    }

    /// The transport this version belongs to.
    #[must_use]
    pub fn transport(self) -> HalTransport {
        match self {
            Self::Unavailable => HalTransport::Unknown,
            Self::Hidl20 | Self::Hidl21 => HalTransport::Hidl,
            Self::AidlV1 | Self::AidlV2 | Self::AidlV3 | Self::AidlV4 => HalTransport::Aidl,
        }
    }

    /// Whether this is a modern-transport version.
    #[must_use]
    pub fn is_aidl(self) -> bool {
        self.transport() == HalTransport::Aidl
    }

    /// Whether this is a legacy-transport version.
    #[must_use]
    pub fn is_hidl(self) -> bool {
        self.transport() == HalTransport::Hidl
    }

    /// Whether any provider was negotiated at all.
    #[must_use]
    pub fn is_available(self) -> bool {
        self != Self::Unavailable
    }
}

impl fmt::Display for HalVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unavailable => "unavailable",
            Self::Hidl20 => "HIDL 2.0",
            Self::Hidl21 => "HIDL 2.1",
            Self::AidlV1 => "AIDL v1",
            Self::AidlV2 => "AIDL v2",
            Self::AidlV3 => "AIDL v3",
            Self::AidlV4 => "AIDL v4",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_matches_preference_order() {
        assert!(HalVersion::Unavailable < HalVersion::Hidl20);
        assert!(HalVersion::Hidl20 < HalVersion::Hidl21);
        assert!(HalVersion::Hidl21 < HalVersion::AidlV1);
        assert!(HalVersion::AidlV1 < HalVersion::AidlV2);
        assert!(HalVersion::AidlV2 < HalVersion::AidlV3);
        assert!(HalVersion::AidlV3 < HalVersion::AidlV4);
    }

    #[test]
    fn known_interface_versions_map_to_aidl_variants() {
        assert_eq!(
            HalVersion::from_aidl_interface_version(1),
            HalVersion::AidlV1
        );
        assert_eq!(
            HalVersion::from_aidl_interface_version(2),
            HalVersion::AidlV2
        );
        assert_eq!(
            HalVersion::from_aidl_interface_version(3),
            HalVersion::AidlV3
        );
        assert_eq!(
            HalVersion::from_aidl_interface_version(4),
            HalVersion::AidlV4
        );
    }

    #[test]
    fn unknown_interface_versions_fold_to_unavailable() {
        for raw in [0, 5, -1, i32::MAX, i32::MIN] {
            assert_eq!(
                HalVersion::from_aidl_interface_version(raw),
                HalVersion::Unavailable,
                "raw version {raw} must not map to a known revision"
            );
        }
    }

    #[test]
    fn versions_classify_under_their_transport() {
        assert_eq!(HalVersion::Unavailable.transport(), HalTransport::Unknown);
        assert_eq!(HalVersion::Hidl20.transport(), HalTransport::Hidl);
        assert_eq!(HalVersion::Hidl21.transport(), HalTransport::Hidl);
        assert_eq!(HalVersion::AidlV1.transport(), HalTransport::Aidl);
        assert_eq!(HalVersion::AidlV4.transport(), HalTransport::Aidl);
        assert!(HalVersion::AidlV3.is_aidl());
        assert!(HalVersion::Hidl21.is_hidl());
        assert!(!HalVersion::Unavailable.is_available());
        assert!(HalVersion::Hidl20.is_available());
    }

    #[test]
    fn display_uses_conventional_spelling() {
        assert_eq!(HalVersion::Hidl20.to_string(), "HIDL 2.0");
        assert_eq!(HalVersion::Hidl21.to_string(), "HIDL 2.1");
        assert_eq!(HalVersion::AidlV3.to_string(), "AIDL v3");
        assert_eq!(HalVersion::Unavailable.to_string(), "unavailable");
        assert_eq!(HalTransport::Aidl.to_string(), "AIDL");
        assert_eq!(HalTransport::Unknown.to_string(), "unknown");
    }
}
