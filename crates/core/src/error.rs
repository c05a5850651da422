// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error taxonomy for location acquisition
//!
//! Every error maps to exactly one [`ErrorClass`] tag. Chain policy and
//! user-declared suppression branch on classes, never on variant identity,
//! so skip-versus-abort is a data-level decision.

use crate::sample::{LocationSample, ProviderId};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Closed set of tags the chain logic branches on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorClass {
    /// The requested provider is currently disabled
    DisabledSource,
    /// A cached sample exists but is older than the caller allows
    StaleSample,
    /// The provider holds no cached sample at all
    NoCachedSample,
    /// A live request did not produce an update in time
    Timeout,
    /// The user denied one or more runtime permissions
    PermissionDenied,
    /// The provider does not exist, or location stayed off after an
    /// enable flow ran to completion
    SourceUnavailable,
    /// Marker class produced by user-declared suppression; always
    /// recoverable regardless of entry kind
    Ignorable,
    /// Anything the chain must abort on
    Fatal,
}

/// Errors raised while acquiring a location
#[derive(Debug, Error)]
pub enum LocationError {
    #[error("the {0} provider is disabled")]
    ProviderDisabled(ProviderId),

    #[error("cached sample from {} is too old", sample.provider)]
    StaleSample {
        /// The rejected sample, so callers can still use it if they choose
        sample: LocationSample,
    },

    #[error("the {0} provider has no cached sample")]
    NoCachedSample(ProviderId),

    #[error("no location update arrived within {0:?}")]
    Timeout(Duration),

    #[error("user denied permissions: {0:?}")]
    PermissionDenied(Vec<String>),

    #[error("there is no such provider: {0}")]
    ProviderNotAvailable(ProviderId),

    #[error("location is disabled on the device")]
    ServiceDisabled,

    #[error("suppressed {class:?} error")]
    Suppressed { class: ErrorClass },

    #[error("escalated to fatal: {0}")]
    Escalated(#[source] Box<LocationError>),

    #[error("the source dropped an active update registration")]
    ListenerDropped,
}

impl LocationError {
    /// The classification tag for this error
    pub fn class(&self) -> ErrorClass {
        match self {
            LocationError::ProviderDisabled(_) => ErrorClass::DisabledSource,
            LocationError::StaleSample { .. } => ErrorClass::StaleSample,
            LocationError::NoCachedSample(_) => ErrorClass::NoCachedSample,
            LocationError::Timeout(_) => ErrorClass::Timeout,
            LocationError::PermissionDenied(_) => ErrorClass::PermissionDenied,
            LocationError::ProviderNotAvailable(_) | LocationError::ServiceDisabled => {
                ErrorClass::SourceUnavailable
            }
            LocationError::Suppressed { .. } => ErrorClass::Ignorable,
            LocationError::Escalated(_) | LocationError::ListenerDropped => ErrorClass::Fatal,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
