// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Location sample data model
//!
//! The chain logic never inspects coordinates; it reasons only about
//! presence, the owning provider, and the sample's monotonic age.

use crate::clock::Clock;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Identifier of the platform subsystem that produced a sample
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProviderId(pub String);

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ProviderId {
    fn from(s: String) -> Self {
        ProviderId(s)
    }
}

impl From<&str> for ProviderId {
    fn from(s: &str) -> Self {
        ProviderId(s.to_string())
    }
}

/// Geographic coordinates carried by a sample. Opaque payload as far as
/// the chain logic is concerned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
    /// Horizontal accuracy in meters, if the source reports one
    pub accuracy_m: Option<f64>,
}

impl Position {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            accuracy_m: None,
        }
    }

    pub fn with_accuracy(mut self, meters: f64) -> Self {
        self.accuracy_m = Some(meters);
        self
    }
}

/// One location fix from a provider
#[derive(Debug, Clone, PartialEq)]
pub struct LocationSample {
    pub provider: ProviderId,
    pub position: Position,
    /// Monotonic timestamp used for age checks
    pub taken_at: Instant,
    /// Wall-clock timestamp, informational only
    pub recorded_at: DateTime<Utc>,
}

impl LocationSample {
    pub fn new(provider: impl Into<ProviderId>, position: Position, clock: &impl Clock) -> Self {
        Self {
            provider: provider.into(),
            position,
            taken_at: clock.now(),
            recorded_at: Utc::now(),
        }
    }

    /// How old this sample is according to `clock`
    pub fn age(&self, clock: &impl Clock) -> Duration {
        clock.elapsed_since(self.taken_at)
    }

    /// A sample is fresh while its age is strictly below `max_age`;
    /// age exactly equal to `max_age` counts as stale.
    pub fn is_fresh(&self, max_age: Duration, clock: &impl Clock) -> bool {
        self.age(clock) < max_age
    }
}

#[cfg(test)]
#[path = "sample_tests.rs"]
mod tests;
