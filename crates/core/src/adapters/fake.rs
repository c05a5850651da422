//! Fake adapter implementations for testing

use super::traits::*;
use crate::error::LocationError;
use crate::sample::{LocationSample, ProviderId};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// Recorded call to the fake source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceCall {
    IsEnabled { provider: String },
    CachedSample { provider: String },
    RegisterSingleUpdate { provider: String },
    RemoveUpdates { token: u64 },
    Providers,
}

struct FakeProvider {
    enabled: bool,
    cached: Option<LocationSample>,
}

#[derive(Default)]
struct FakeSourceState {
    calls: Vec<SourceCall>,
    providers: HashMap<String, FakeProvider>,
    next_token: u64,
    registrations: HashMap<u64, (String, mpsc::UnboundedSender<SourceEvent>)>,
    removals: HashMap<u64, u32>,
}

/// Fake location source with call recording for testing
#[derive(Clone)]
pub struct FakeSource {
    state: Arc<Mutex<FakeSourceState>>,
}

impl Default for FakeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeSource {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeSourceState::default())),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeSourceState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<SourceCall> {
        self.lock().calls.clone()
    }

    /// Count of registrations opened so far
    pub fn registration_count(&self) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|c| matches!(c, SourceCall::RegisterSingleUpdate { .. }))
            .count()
    }

    /// How many times `remove_updates` ran for the given token
    pub fn removal_count(&self, token: RegistrationToken) -> u32 {
        self.lock().removals.get(&token.0).copied().unwrap_or(0)
    }

    /// Total `remove_updates` calls across all tokens
    pub fn total_removals(&self) -> u32 {
        self.lock().removals.values().sum()
    }

    /// Add a provider the source knows about
    pub fn add_provider(&self, provider: impl Into<ProviderId>, enabled: bool) {
        self.lock().providers.insert(
            provider.into().0,
            FakeProvider {
                enabled,
                cached: None,
            },
        );
    }

    /// Set the cached sample for a known provider
    pub fn set_cached(&self, provider: impl Into<ProviderId>, sample: Option<LocationSample>) {
        let provider = provider.into().0;
        if let Some(p) = self.lock().providers.get_mut(&provider) {
            p.cached = sample;
        }
    }

    /// Flip a provider's enabled state. Disabling notifies every live
    /// registration for that provider, like the platform callback does.
    pub fn set_enabled(&self, provider: impl Into<ProviderId>, enabled: bool) {
        let provider = provider.into().0;
        let mut state = self.lock();
        if let Some(p) = state.providers.get_mut(&provider) {
            p.enabled = enabled;
        }
        if !enabled {
            for (registered, sender) in state.registrations.values() {
                if *registered == provider {
                    let _ = sender.send(SourceEvent::Disabled);
                }
            }
        }
    }

    /// Deliver a location update to every live registration for `provider`
    pub fn deliver_sample(&self, provider: impl Into<ProviderId>, sample: LocationSample) {
        let provider = provider.into().0;
        let state = self.lock();
        for (registered, sender) in state.registrations.values() {
            if *registered == provider {
                let _ = sender.send(SourceEvent::Sample(sample.clone()));
            }
        }
    }

    /// Tokens of registrations that are still live
    pub fn live_registrations(&self) -> Vec<RegistrationToken> {
        self.lock()
            .registrations
            .keys()
            .map(|t| RegistrationToken(*t))
            .collect()
    }
}

#[async_trait]
impl SourceAdapter for FakeSource {
    async fn is_enabled(&self, provider: &ProviderId) -> Result<bool, LocationError> {
        let mut state = self.lock();
        state.calls.push(SourceCall::IsEnabled {
            provider: provider.0.clone(),
        });
        match state.providers.get(&provider.0) {
            Some(p) => Ok(p.enabled),
            None => Ok(false),
        }
    }

    async fn cached_sample(
        &self,
        provider: &ProviderId,
    ) -> Result<Option<LocationSample>, LocationError> {
        let mut state = self.lock();
        state.calls.push(SourceCall::CachedSample {
            provider: provider.0.clone(),
        });
        Ok(state
            .providers
            .get(&provider.0)
            .and_then(|p| p.cached.clone()))
    }

    fn register_single_update(
        &self,
        provider: &ProviderId,
    ) -> Result<UpdateRegistration, LocationError> {
        let mut state = self.lock();
        state.calls.push(SourceCall::RegisterSingleUpdate {
            provider: provider.0.clone(),
        });
        let token = state.next_token;
        state.next_token += 1;
        let (tx, rx) = mpsc::unbounded_channel();
        state.registrations.insert(token, (provider.0.clone(), tx));
        Ok(UpdateRegistration {
            token: RegistrationToken(token),
            events: rx,
        })
    }

    fn remove_updates(&self, token: RegistrationToken) {
        let mut state = self.lock();
        state.calls.push(SourceCall::RemoveUpdates { token: token.0 });
        *state.removals.entry(token.0).or_insert(0) += 1;
        state.registrations.remove(&token.0);
    }

    fn providers(&self) -> Vec<ProviderId> {
        let mut state = self.lock();
        state.calls.push(SourceCall::Providers);
        let mut names: Vec<_> = state.providers.keys().cloned().collect();
        names.sort();
        names.into_iter().map(ProviderId).collect()
    }
}

#[derive(Default)]
struct FakePermissionState {
    runtime: bool,
    denied: Vec<String>,
    requests: Vec<Vec<String>>,
}

/// Fake permission host
#[derive(Clone)]
pub struct FakePermissionHost {
    state: Arc<Mutex<FakePermissionState>>,
}

impl Default for FakePermissionHost {
    fn default() -> Self {
        Self::new()
    }
}

impl FakePermissionHost {
    /// A host where runtime permissions exist and nothing is denied
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(FakePermissionState {
                runtime: true,
                ..Default::default()
            })),
        }
    }

    /// A host on a platform without runtime permission grants
    pub fn legacy() -> Self {
        Self {
            state: Arc::new(Mutex::new(FakePermissionState::default())),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakePermissionState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn set_denied(&self, permissions: &[&str]) {
        self.lock().denied = permissions.iter().map(|s| s.to_string()).collect();
    }

    /// Permission sets passed to `request_permissions`, oldest first
    pub fn requests(&self) -> Vec<Vec<String>> {
        self.lock().requests.clone()
    }
}

impl PermissionHost for FakePermissionHost {
    fn runtime_permissions(&self) -> bool {
        self.lock().runtime
    }

    fn denied_permissions(&self) -> Vec<String> {
        self.lock().denied.clone()
    }

    fn request_permissions(&self, permissions: &[String]) {
        self.lock().requests.push(permissions.to_vec());
    }
}

#[derive(Default)]
struct FakeResolutionState {
    check: Option<SettingsCheck>,
    settings_launches: u32,
    resolution_launches: Vec<ResolutionRequest>,
}

/// Fake resolution host
#[derive(Clone)]
pub struct FakeResolutionHost {
    state: Arc<Mutex<FakeResolutionState>>,
}

impl Default for FakeResolutionHost {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeResolutionHost {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeResolutionState::default())),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeResolutionState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Script the next `check_settings` answer
    pub fn set_check(&self, check: SettingsCheck) {
        self.lock().check = Some(check);
    }

    pub fn settings_launches(&self) -> u32 {
        self.lock().settings_launches
    }

    pub fn resolution_launches(&self) -> Vec<ResolutionRequest> {
        self.lock().resolution_launches.clone()
    }
}

#[async_trait]
impl ResolutionHost for FakeResolutionHost {
    async fn check_settings(&self) -> Result<SettingsCheck, LocationError> {
        Ok(self
            .lock()
            .check
            .clone()
            .unwrap_or(SettingsCheck::Satisfied))
    }

    fn launch_settings(&self) {
        self.lock().settings_launches += 1;
    }

    fn launch_resolution(&self, request: ResolutionRequest) {
        self.lock().resolution_launches.push(request);
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
