// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Adapter trait definitions for the platform collaborators
//!
//! The engine only needs a source that produces samples or errors, a way
//! to ask about permissions, and a way to launch resolution UI. Real
//! platform bindings implement these; tests use the fakes.

use crate::error::LocationError;
use crate::sample::{LocationSample, ProviderId};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;

// =============================================================================
// Source Adapter (platform location subsystem)
// =============================================================================

/// Identifies one live update registration with a source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegistrationToken(pub u64);

impl std::fmt::Display for RegistrationToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Events a source delivers to a live registration
#[derive(Debug, Clone)]
pub enum SourceEvent {
    /// A location fix arrived
    Sample(LocationSample),
    /// The provider was disabled while the registration was live
    Disabled,
}

/// A live registration handed out by [`SourceAdapter::register_single_update`]
#[derive(Debug)]
pub struct UpdateRegistration {
    pub token: RegistrationToken,
    pub events: mpsc::UnboundedReceiver<SourceEvent>,
}

/// Adapter for the platform subsystem that produces location samples
#[async_trait]
pub trait SourceAdapter: Send + Sync + 'static {
    /// Whether the given provider is currently enabled
    async fn is_enabled(&self, provider: &ProviderId) -> Result<bool, LocationError>;

    /// The sample the provider currently caches, if any
    async fn cached_sample(
        &self,
        provider: &ProviderId,
    ) -> Result<Option<LocationSample>, LocationError>;

    /// Register for exactly one update from the provider. The caller must
    /// release the registration with [`SourceAdapter::remove_updates`];
    /// [`RegistrationGuard`] does this on drop.
    fn register_single_update(
        &self,
        provider: &ProviderId,
    ) -> Result<UpdateRegistration, LocationError>;

    /// Release a registration. Must be cheap, synchronous, and a no-op
    /// for tokens that were already released.
    fn remove_updates(&self, token: RegistrationToken);

    /// Names of all providers the source knows about
    fn providers(&self) -> Vec<ProviderId>;
}

/// Releases an update registration exactly once, on explicit
/// [`RegistrationGuard::release`] or on drop, whichever comes first.
/// Spurious later calls are no-ops.
pub struct RegistrationGuard {
    source: Arc<dyn SourceAdapter>,
    token: RegistrationToken,
    released: AtomicBool,
}

impl RegistrationGuard {
    pub fn new(source: Arc<dyn SourceAdapter>, token: RegistrationToken) -> Self {
        Self {
            source,
            token,
            released: AtomicBool::new(false),
        }
    }

    pub fn release(&self) {
        if !self.released.swap(true, Ordering::SeqCst) {
            self.source.remove_updates(self.token);
        }
    }
}

impl Drop for RegistrationGuard {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for RegistrationGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationGuard")
            .field("token", &self.token)
            .field("released", &self.released.load(Ordering::SeqCst))
            .finish()
    }
}

// =============================================================================
// Permission Host (runtime permission checks and prompts)
// =============================================================================

/// Adapter for the host process's runtime permission state
pub trait PermissionHost: Send + Sync + 'static {
    /// Whether runtime permission grants are a concept on this platform.
    /// When false, permission gating passes through untouched.
    fn runtime_permissions(&self) -> bool;

    /// Location permissions that are declared but currently denied
    fn denied_permissions(&self) -> Vec<String>;

    /// Trigger the platform permission prompt. Fire-and-forget; the result
    /// arrives later through the manager's permission ingress.
    fn request_permissions(&self, permissions: &[String]);
}

// =============================================================================
// Resolution Host (settings UI / settings-resolution service)
// =============================================================================

/// Opaque payload describing a pending settings resolution, carried from
/// [`SettingsCheck::ResolutionRequired`] into
/// [`ResolutionHost::launch_resolution`] without inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionRequest(pub String);

/// Result of asking the device-settings service about location settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsCheck {
    /// Settings already satisfy location requests
    Satisfied,
    /// The service can fix settings if the host launches this resolution
    ResolutionRequired(ResolutionRequest),
}

/// Adapter for driving settings UI on the host
#[async_trait]
pub trait ResolutionHost: Send + Sync + 'static {
    /// Ask the device-settings service whether location settings are usable
    async fn check_settings(&self) -> Result<SettingsCheck, LocationError>;

    /// Open the system location-settings screen. Fire-and-forget; dismissal
    /// arrives later through the manager's resolution ingress.
    fn launch_settings(&self);

    /// Launch a resolution flow produced by [`ResolutionHost::check_settings`].
    /// Fire-and-forget; the outcome arrives through the resolution ingress.
    fn launch_resolution(&self, request: ResolutionRequest);
}
