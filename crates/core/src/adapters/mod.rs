// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Adapter modules for the platform collaborators

pub mod fake;
pub mod traits;

// Re-export traits
pub use traits::{
    PermissionHost, RegistrationGuard, RegistrationToken, ResolutionHost, ResolutionRequest,
    SettingsCheck, SourceAdapter, SourceEvent, UpdateRegistration,
};

// Re-export fake adapters
pub use fake::{FakePermissionHost, FakeResolutionHost, FakeSource, SourceCall};
