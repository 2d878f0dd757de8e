//! Service descriptors and instance names for the audio-provider factory.
//!
//! The modern factory registers with the service manager under an instance
//! name (`interface/instance`); the legacy factories register with the
//! instance broker under fully-qualified interface descriptors. Which modern
//! instance to probe depends on a system property that routes audio through
//! the system Bluetooth stack instead of the default one.

use crate::registry::PropertyStore;

/// Interface descriptor of the modern audio-provider factory.
pub const PROVIDER_FACTORY_INTERFACE: &str =
    "android.hardware.bluetooth.audio.IBluetoothAudioProviderFactory";

/// Modern factory instance registered by the default Bluetooth stack.
pub const DEFAULT_FACTORY_INSTANCE: &str =
    "android.hardware.bluetooth.audio.IBluetoothAudioProviderFactory/default";

/// Modern factory instance registered by the system Bluetooth stack.
pub const SYSTEM_FACTORY_INSTANCE: &str =
    "android.hardware.bluetooth.audio.IBluetoothAudioProviderFactory/sysbta";

/// Legacy provider-factory descriptor, 2.1 interface.
pub const HIDL_2_1_FACTORY: &str =
    "android.hardware.bluetooth.audio@2.1::IBluetoothAudioProvidersFactory";

/// Legacy provider-factory descriptor, 2.0 interface.
pub const HIDL_2_0_FACTORY: &str =
    "android.hardware.bluetooth.audio@2.0::IBluetoothAudioProvidersFactory";

/// Property selecting the system Bluetooth stack's audio HAL.
pub const SYSTEM_AUDIO_HAL_PROP: &str = "persist.bluetooth.system_audio_hal.enabled";

/// The modern factory instance to probe for this process.
///
/// Reads the routing property at call time; the probe consults it exactly
/// once, so a property flip after negotiation has no effect.
#[must_use]
pub fn provider_factory_instance(props: &dyn PropertyStore) -> &'static str {
    if props.get_bool(SYSTEM_AUDIO_HAL_PROP, false) {
        SYSTEM_FACTORY_INSTANCE
    } else {
        DEFAULT_FACTORY_INSTANCE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    // Shadow the crate-local function with the dependency build's, which
    // is the build `MockProperties` implements `PropertyStore` for.
    use btaudio_hal::descriptors::provider_factory_instance;
    use btaudio_testkit::MockProperties;

    #[test]
    fn default_stack_instance_when_property_unset() {
        let props = MockProperties::empty();
        assert_eq!(provider_factory_instance(&props), DEFAULT_FACTORY_INSTANCE);
        assert_eq!(props.queries(), vec![SYSTEM_AUDIO_HAL_PROP.to_owned()]);
    }

    #[test]
    fn system_stack_instance_when_property_set() {
        let props = MockProperties::empty().with_bool(SYSTEM_AUDIO_HAL_PROP, true);
        assert_eq!(provider_factory_instance(&props), SYSTEM_FACTORY_INSTANCE);
    }

    #[test]
    fn instance_names_derive_from_the_factory_interface() {
        assert_eq!(
            DEFAULT_FACTORY_INSTANCE,
            format!("{PROVIDER_FACTORY_INTERFACE}/default")
        );
        assert_eq!(
            SYSTEM_FACTORY_INSTANCE,
            format!("{PROVIDER_FACTORY_INTERFACE}/sysbta")
        );
    }
}
