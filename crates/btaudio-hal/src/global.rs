//! Process-wide negotiation entry point.
//!
//! The hosting stack calls [`init_with`] at startup with its real platform
//! wiring; everything downstream reaches the resolved state through
//! [`get`] or the reference returned from `init_with`. The cell guarantees
//! the probe runs exactly once even under concurrent first access: one
//! caller executes it, the rest block until it completes and observe the
//! same instance.

use once_cell::sync::OnceCell;

use crate::error::Result;
use crate::negotiator::HalNegotiator;
use crate::registry::PlatformServices;

static NEGOTIATOR: OnceCell<HalNegotiator> = OnceCell::new();

/// Resolve the process-wide negotiator, probing on first call.
///
/// The first successful call runs the probe against `services`; every
/// later call returns the already-resolved instance and ignores its
/// argument. A failed negotiation leaves the cell unset, so the host can
/// abort (the expected response to an environment fault) without wedging
/// a half-initialised state in place.
pub fn init_with(services: PlatformServices) -> Result<&'static HalNegotiator> {
    NEGOTIATOR.get_or_try_init(|| HalNegotiator::negotiate(services))
}

/// The resolved negotiator, or `None` before the first successful
/// [`init_with`].
#[must_use]
pub fn get() -> Option<&'static HalNegotiator> {
    NEGOTIATOR.get()
}
