// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Composable behaviors around a unit request
//!
//! A behavior wraps the upstream operation and returns a new one of the
//! same shape. Behaviors are applied by folding over the declared list,
//! first declared innermost, matching decorator nesting. Each attaches to
//! one chain entry only.

use crate::relay::Relay;
use geofix_core::adapters::{PermissionHost, ResolutionHost, SettingsCheck, SourceAdapter};
use geofix_core::{
    Acquired, ErrorClass, LocationError, PermissionUpdate, ProviderId, ResolutionOutcome,
};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Boxed asynchronous acquisition, the unit every behavior wraps
pub type AcquireFuture<'a> = Pin<Box<dyn Future<Output = Acquired> + Send + 'a>>;

/// Per-execution context handed to each behavior
#[derive(Debug, Clone)]
pub struct BehaviorParams {
    pub provider: ProviderId,
}

/// A cross-cutting wrapper applied around one entry's operation
pub trait Behavior: Send + Sync {
    fn apply<'a>(
        &'a self,
        upstream: AcquireFuture<'a>,
        params: &'a BehaviorParams,
    ) -> AcquireFuture<'a>;
}

/// Fold the declared behaviors over the base operation, in declaration order
pub(crate) fn apply_all<'a>(
    behaviors: &'a [Arc<dyn Behavior>],
    base: AcquireFuture<'a>,
    params: &'a BehaviorParams,
) -> AcquireFuture<'a> {
    behaviors
        .iter()
        .fold(base, |acc, behavior| behavior.apply(acc, params))
}

// =============================================================================
// Permission gate
// =============================================================================

/// Requests denied runtime permissions before letting the upstream run.
///
/// Wire the host UI's permission callback to
/// `LocationManager::on_permission_result` so pending gates can resolve.
/// A gate only resolves on an update for exactly the set it requested;
/// other updates are ignored and the wait continues.
pub struct PermissionBehavior {
    host: Arc<dyn PermissionHost>,
    relay: Relay<PermissionUpdate>,
}

impl PermissionBehavior {
    pub fn new(host: Arc<dyn PermissionHost>, relay: Relay<PermissionUpdate>) -> Self {
        Self { host, relay }
    }
}

impl Behavior for PermissionBehavior {
    fn apply<'a>(
        &'a self,
        upstream: AcquireFuture<'a>,
        _params: &'a BehaviorParams,
    ) -> AcquireFuture<'a> {
        Box::pin(async move {
            if !self.host.runtime_permissions() {
                return upstream.await;
            }
            let denied = self.host.denied_permissions();
            if denied.is_empty() {
                return upstream.await;
            }

            // Listen before triggering the prompt so the result cannot race past us.
            let mut listener = self.relay.listen();
            self.host.request_permissions(&denied);
            tracing::debug!(?denied, "waiting for permission results");

            loop {
                match listener.recv().await {
                    Some(update) if update.answers(&denied) => {
                        if update.all_granted() {
                            break;
                        }
                        return Err(LocationError::PermissionDenied(denied));
                    }
                    Some(_) => continue,
                    None => return Err(LocationError::ListenerDropped),
                }
            }

            drop(listener);
            upstream.await
        })
    }
}

// =============================================================================
// Source enable gate
// =============================================================================

enum Resolver {
    /// Open the system settings screen and re-check after dismissal
    Settings {
        source: Arc<dyn SourceAdapter>,
        host: Arc<dyn ResolutionHost>,
        relay: Relay<ResolutionOutcome>,
    },
    /// Drive the device-settings resolution service
    Service {
        host: Arc<dyn ResolutionHost>,
        relay: Relay<ResolutionOutcome>,
    },
}

/// Tries to get the provider enabled before letting the upstream run.
///
/// Wire the host UI's activity-result callback to
/// `LocationManager::on_resolution_result`.
pub struct EnableSourceBehavior {
    resolver: Resolver,
}

impl EnableSourceBehavior {
    /// Resolver that opens the system location-settings screen
    pub fn with_settings(
        source: Arc<dyn SourceAdapter>,
        host: Arc<dyn ResolutionHost>,
        relay: Relay<ResolutionOutcome>,
    ) -> Self {
        Self {
            resolver: Resolver::Settings {
                source,
                host,
                relay,
            },
        }
    }

    /// Resolver that drives the settings-resolution service
    pub fn with_service(host: Arc<dyn ResolutionHost>, relay: Relay<ResolutionOutcome>) -> Self {
        Self {
            resolver: Resolver::Service { host, relay },
        }
    }

    async fn provider_enabled(
        source: &Arc<dyn SourceAdapter>,
        provider: &ProviderId,
    ) -> Result<bool, LocationError> {
        if !source.providers().contains(provider) {
            return Err(LocationError::ProviderNotAvailable(provider.clone()));
        }
        source.is_enabled(provider).await
    }

    async fn resolve(&self, provider: &ProviderId) -> Result<(), LocationError> {
        match &self.resolver {
            Resolver::Settings {
                source,
                host,
                relay,
            } => {
                if Self::provider_enabled(source, provider).await? {
                    return Ok(());
                }

                let mut listener = relay.listen();
                host.launch_settings();
                tracing::debug!(provider = %provider, "opened location settings");
                if listener.recv().await.is_none() {
                    return Err(LocationError::ListenerDropped);
                }

                if Self::provider_enabled(source, provider).await? {
                    Ok(())
                } else {
                    Err(LocationError::ServiceDisabled)
                }
            }
            Resolver::Service { host, relay } => match host.check_settings().await? {
                SettingsCheck::Satisfied => Ok(()),
                SettingsCheck::ResolutionRequired(request) => {
                    let mut listener = relay.listen();
                    host.launch_resolution(request);
                    tracing::debug!(provider = %provider, "launched settings resolution");
                    match listener.recv().await {
                        Some(outcome) if outcome.location_usable == Some(true) => Ok(()),
                        Some(_) => Err(LocationError::ServiceDisabled),
                        None => Err(LocationError::ListenerDropped),
                    }
                }
            },
        }
    }
}

impl Behavior for EnableSourceBehavior {
    fn apply<'a>(
        &'a self,
        upstream: AcquireFuture<'a>,
        params: &'a BehaviorParams,
    ) -> AcquireFuture<'a> {
        Box::pin(async move {
            self.resolve(&params.provider).await?;
            upstream.await
        })
    }
}

// =============================================================================
// Error suppression
// =============================================================================

/// Rewrites matching upstream failures into the ignorable marker so the
/// chain skips the entry instead of aborting.
pub struct IgnoreErrorBehavior {
    classes: Vec<ErrorClass>,
}

impl IgnoreErrorBehavior {
    /// Suppress every error class
    pub fn all() -> Self {
        Self {
            classes: Vec::new(),
        }
    }

    /// Suppress only the listed classes; everything else propagates
    pub fn only(classes: impl IntoIterator<Item = ErrorClass>) -> Self {
        Self {
            classes: classes.into_iter().collect(),
        }
    }

    fn suppresses(&self, class: ErrorClass) -> bool {
        self.classes.is_empty() || self.classes.contains(&class)
    }
}

impl Behavior for IgnoreErrorBehavior {
    fn apply<'a>(
        &'a self,
        upstream: AcquireFuture<'a>,
        _params: &'a BehaviorParams,
    ) -> AcquireFuture<'a> {
        Box::pin(async move {
            match upstream.await {
                Err(error) if self.suppresses(error.class()) => {
                    tracing::debug!(error = %error, "suppressed error");
                    Err(LocationError::Suppressed {
                        class: error.class(),
                    })
                }
                other => other,
            }
        })
    }
}

// =============================================================================
// Disabled-source escalation
// =============================================================================

/// Turns a disabled-source failure into a fatal one, opting the entry out
/// of the chain's default skip-on-disabled handling.
#[derive(Default)]
pub struct ThrowIfDisabledBehavior;

impl ThrowIfDisabledBehavior {
    pub fn new() -> Self {
        Self
    }
}

impl Behavior for ThrowIfDisabledBehavior {
    fn apply<'a>(
        &'a self,
        upstream: AcquireFuture<'a>,
        _params: &'a BehaviorParams,
    ) -> AcquireFuture<'a> {
        Box::pin(async move {
            match upstream.await {
                Err(error) if error.class() == ErrorClass::DisabledSource => {
                    Err(LocationError::Escalated(Box::new(error)))
                }
                other => other,
            }
        })
    }
}

#[cfg(test)]
#[path = "behavior_tests.rs"]
mod tests;
