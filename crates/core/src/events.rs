// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Out-of-band events delivered by the host UI layer
//!
//! The host calls the manager's ingress methods with these payloads at an
//! arbitrary later time; pending behavior waits resolve against them.

/// Result of one runtime permission request, per permission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionGrant {
    Granted,
    Denied,
}

/// One permission-result callback from the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionUpdate {
    /// The permission set the platform prompt covered, in request order
    pub permissions: Vec<String>,
    /// Grant results, positionally aligned with `permissions`
    pub results: Vec<PermissionGrant>,
}

impl PermissionUpdate {
    pub fn new(permissions: Vec<String>, results: Vec<PermissionGrant>) -> Self {
        Self {
            permissions,
            results,
        }
    }

    /// Whether this update answers exactly the given requested set
    pub fn answers(&self, requested: &[String]) -> bool {
        self.permissions == requested
    }

    pub fn all_granted(&self) -> bool {
        !self.results.contains(&PermissionGrant::Denied)
    }
}

/// Outcome of a resolution UI flow (settings screen or resolution intent)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolutionOutcome {
    /// Host-defined result code, carried through verbatim
    pub code: i32,
    /// Whether location became usable, when the host can tell
    pub location_usable: Option<bool>,
}

impl ResolutionOutcome {
    pub fn new(code: i32) -> Self {
        Self {
            code,
            location_usable: None,
        }
    }

    pub fn with_usable(mut self, usable: bool) -> Self {
        self.location_usable = Some(usable);
        self
    }
}

#[cfg(test)]
#[path = "events_tests.rs"]
mod tests;
