// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Unit requests: one asynchronous operation per chain entry
//!
//! A unit request produces at most once: a sample, a valid absence, or a
//! typed error. Registration with the source is the only side effect, and
//! every exit path releases it exactly once.

use geofix_core::adapters::{RegistrationGuard, SourceAdapter, SourceEvent};
use geofix_core::{Acquired, Clock, LocationError, ProviderId};
use std::sync::Arc;
use std::time::Duration;

/// Fetch the provider's cached sample, rejecting absent or stale values.
pub(crate) async fn cached(
    source: &Arc<dyn SourceAdapter>,
    clock: &impl Clock,
    provider: &ProviderId,
    max_age: Option<Duration>,
) -> Acquired {
    let Some(sample) = source.cached_sample(provider).await? else {
        return Err(LocationError::NoCachedSample(provider.clone()));
    };

    if let Some(max_age) = max_age {
        if !sample.is_fresh(max_age, clock) {
            return Err(LocationError::StaleSample { sample });
        }
    }

    Ok(Some(sample))
}

/// Wait for exactly one live update from the provider.
///
/// Fails up-front when the provider is disabled; races the first update
/// against `timeout` when one is given. Cancellation (dropping this future)
/// releases the registration through the guard.
pub(crate) async fn live(
    source: &Arc<dyn SourceAdapter>,
    provider: &ProviderId,
    timeout: Option<Duration>,
) -> Acquired {
    if !source.is_enabled(provider).await? {
        return Err(LocationError::ProviderDisabled(provider.clone()));
    }

    let registration = source.register_single_update(provider)?;
    let guard = RegistrationGuard::new(Arc::clone(source), registration.token);
    let mut events = registration.events;

    let first_update = async {
        match events.recv().await {
            Some(SourceEvent::Sample(sample)) => Ok(Some(sample)),
            Some(SourceEvent::Disabled) => Err(LocationError::ProviderDisabled(provider.clone())),
            None => Err(LocationError::ListenerDropped),
        }
    };

    let outcome = match timeout {
        Some(limit) => match tokio::time::timeout(limit, first_update).await {
            Ok(result) => result,
            Err(_) => Err(LocationError::Timeout(limit)),
        },
        None => first_update.await,
    };

    guard.release();
    outcome
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;
