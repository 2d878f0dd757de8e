//! Test infrastructure for the audio HAL negotiation stack.
//!
//! Provides mock platform collaborators (service manager, instance broker,
//! property store, factory bindings) with recorded call logs and fault
//! injection, plus pre-wired fixtures for the common device shapes.
//!
//! # Usage
//!
//! Add this to your crate's `Cargo.toml` dev-dependencies:
//! ```toml
//! [dev-dependencies]
//! btaudio-testkit = { path = "../btaudio-testkit" }
//! ```
//!
//! Then in your tests:
//! ```rust,no_run
//! use btaudio_hal::HalNegotiator;
//! use btaudio_testkit::fixtures;
//!
//! let fixture = fixtures::modern_platform(3);
//! let negotiator = HalNegotiator::negotiate(fixture.services()).unwrap();
//! assert!(negotiator.version().is_aidl());
//! ```

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

pub mod fixtures;
pub mod mocks;

pub use fixtures::PlatformFixture;
pub use mocks::*;
