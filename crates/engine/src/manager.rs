// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Manager facade over one location source
//!
//! The manager owns the source handle, the clock, and the two event relays.
//! It is cheap to clone; clones share everything, so a pending behavior wait
//! started through one clone resolves on an ingress call through another.

use crate::behavior::{apply_all, AcquireFuture, Behavior, BehaviorParams};
use crate::chain::ChainBuilder;
use crate::relay::Relay;
use crate::request;
use geofix_core::adapters::SourceAdapter;
use geofix_core::{
    Acquired, Clock, LocationError, PermissionGrant, PermissionUpdate, ProviderId,
    ResolutionOutcome, SystemClock,
};
use std::sync::Arc;
use std::time::Duration;

struct ManagerInner<C> {
    source: Arc<dyn SourceAdapter>,
    clock: C,
    permissions: Relay<PermissionUpdate>,
    resolutions: Relay<ResolutionOutcome>,
}

/// Facade for single-result location acquisition over one source
pub struct LocationManager<C: Clock = SystemClock> {
    inner: Arc<ManagerInner<C>>,
}

impl<C: Clock> Clone for LocationManager<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl LocationManager<SystemClock> {
    pub fn new(source: Arc<dyn SourceAdapter>) -> Self {
        Self::with_clock(source, SystemClock)
    }
}

impl<C: Clock> LocationManager<C> {
    pub fn with_clock(source: Arc<dyn SourceAdapter>, clock: C) -> Self {
        Self {
            inner: Arc::new(ManagerInner {
                source,
                clock,
                permissions: Relay::new(),
                resolutions: Relay::new(),
            }),
        }
    }

    /// Fetch the provider's cached sample, wrapped in the given behaviors.
    ///
    /// With `max_age` set, a sample at or past that age fails as stale.
    pub async fn last_known(
        &self,
        provider: impl Into<ProviderId>,
        max_age: Option<Duration>,
        behaviors: &[Arc<dyn Behavior>],
    ) -> Acquired {
        let params = BehaviorParams {
            provider: provider.into(),
        };
        tracing::debug!(provider = %params.provider, ?max_age, "cached lookup");
        let base: AcquireFuture = Box::pin(request::cached(
            &self.inner.source,
            &self.inner.clock,
            &params.provider,
            max_age,
        ));
        apply_all(behaviors, base, &params).await
    }

    /// Wait for one live update from the provider, wrapped in the given
    /// behaviors. With `timeout` set, the first update races the timer.
    pub async fn request_location(
        &self,
        provider: impl Into<ProviderId>,
        timeout: Option<Duration>,
        behaviors: &[Arc<dyn Behavior>],
    ) -> Acquired {
        let params = BehaviorParams {
            provider: provider.into(),
        };
        tracing::debug!(provider = %params.provider, ?timeout, "live request");
        let base: AcquireFuture = Box::pin(request::live(
            &self.inner.source,
            &params.provider,
            timeout,
        ));
        apply_all(behaviors, base, &params).await
    }

    pub async fn is_provider_enabled(
        &self,
        provider: &ProviderId,
    ) -> Result<bool, LocationError> {
        self.inner.source.is_enabled(provider).await
    }

    pub fn providers(&self) -> Vec<ProviderId> {
        self.inner.source.providers()
    }

    /// Start describing a fallback chain against this manager
    pub fn chain(&self) -> ChainBuilder<C> {
        ChainBuilder::new(self.clone())
    }

    /// Ingress for the host's permission-prompt callback. Every pending
    /// permission gate sees the update; gates waiting on a different
    /// permission set ignore it.
    pub fn on_permission_result(&self, permissions: Vec<String>, results: Vec<PermissionGrant>) {
        tracing::debug!(?permissions, "permission result ingress");
        self.inner
            .permissions
            .publish(PermissionUpdate::new(permissions, results));
    }

    /// Ingress for the host's settings / resolution activity callback
    pub fn on_resolution_result(&self, outcome: ResolutionOutcome) {
        tracing::debug!(code = outcome.code, "resolution result ingress");
        self.inner.resolutions.publish(outcome);
    }

    pub fn permission_relay(&self) -> Relay<PermissionUpdate> {
        self.inner.permissions.clone()
    }

    pub fn resolution_relay(&self) -> Relay<ResolutionOutcome> {
        self.inner.resolutions.clone()
    }

    pub fn source(&self) -> Arc<dyn SourceAdapter> {
        Arc::clone(&self.inner.source)
    }

    pub(crate) fn clock(&self) -> &C {
        &self.inner.clock
    }
}

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
