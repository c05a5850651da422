//! geofix-engine: request/fallback orchestration over a location source
//!
//! This crate provides:
//! - Unit requests (cached lookup, live single update) over a source adapter
//! - A composable behavior pipeline around each unit request
//! - Event relays bridging host callbacks into suspended behavior waits
//! - The manager facade and the fallback chain builder/executor

pub mod behavior;
pub mod chain;
pub mod manager;
pub mod relay;

mod request;

// Re-exports
pub use behavior::{
    AcquireFuture, Behavior, BehaviorParams, EnableSourceBehavior, IgnoreErrorBehavior,
    PermissionBehavior, ThrowIfDisabledBehavior,
};
pub use chain::{Chain, ChainBuilder, ChainEntry};
pub use manager::LocationManager;
pub use relay::{Listener, Relay};
