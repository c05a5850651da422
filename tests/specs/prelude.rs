//! Shared fixtures for the behavioral specs

use geofix_core::{FakeClock, FakeSource, LocationSample, Position};
use geofix_engine::LocationManager;
use std::sync::Arc;

/// Manager over a fake source with a controllable clock
pub fn manager(fake: &FakeSource, clock: &FakeClock) -> LocationManager<FakeClock> {
    LocationManager::with_clock(Arc::new(fake.clone()), clock.clone())
}

/// A sample taken now, attributed to `provider`
pub fn sample(provider: &str, clock: &FakeClock) -> LocationSample {
    LocationSample::new(provider, Position::new(59.93, 30.33), clock)
}

/// Spin until a condition observed from the outside becomes true
pub async fn until(condition: impl Fn() -> bool) {
    while !condition() {
        tokio::task::yield_now().await;
    }
}
