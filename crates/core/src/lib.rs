//! geofix-core: Core library for the geofix location-acquisition facade
//!
//! This crate provides:
//! - The location sample data model and provider identifiers
//! - A closed error taxonomy the chain logic branches on
//! - Adapter traits for the platform collaborators (source, permission
//!   host, resolution host) plus fake implementations for tests
//! - Clock abstraction for testable sample-age handling

pub mod clock;
pub mod sample;

pub mod adapters;
pub mod config;
pub mod error;
pub mod events;

// Re-exports
pub use clock::{Clock, FakeClock, SystemClock};
pub use config::ChainDefaults;
pub use error::{ErrorClass, LocationError};
pub use events::{PermissionGrant, PermissionUpdate, ResolutionOutcome};
pub use sample::{LocationSample, Position, ProviderId};

// Re-export adapters
pub use adapters::{
    FakePermissionHost, FakeResolutionHost, FakeSource, PermissionHost, RegistrationGuard,
    RegistrationToken, ResolutionHost, ResolutionRequest, SettingsCheck, SourceAdapter,
    SourceEvent, UpdateRegistration,
};

/// Outcome of one asynchronous acquisition: a sample, a valid absence,
/// or a typed error.
pub type Acquired = Result<Option<sample::LocationSample>, error::LocationError>;
