// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fallback chains: ordered attempts reconciled into one result
//!
//! A chain runs its entries strictly in order. The first sample wins and
//! later entries never start. Recoverable failures skip to the next entry;
//! anything else aborts the whole chain, without substituting the default.
//! The default only stands in when the chain ends with nothing.

use crate::behavior::{apply_all, AcquireFuture, Behavior, BehaviorParams};
use crate::manager::LocationManager;
use crate::request;
use geofix_core::{Acquired, ChainDefaults, Clock, ErrorClass, LocationSample, ProviderId};
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone, Copy)]
enum EntryKind {
    Cached { max_age: Option<Duration> },
    Live { timeout: Option<Duration> },
}

/// One attempt in a fallback chain
pub struct ChainEntry {
    kind: EntryKind,
    provider: ProviderId,
    behaviors: Vec<Arc<dyn Behavior>>,
    accept_empty: bool,
}

impl ChainEntry {
    /// An attempt that reads the provider's cached sample
    pub fn cached(provider: impl Into<ProviderId>) -> Self {
        Self {
            kind: EntryKind::Cached { max_age: None },
            provider: provider.into(),
            behaviors: Vec::new(),
            accept_empty: false,
        }
    }

    /// An attempt that waits for one live update from the provider
    pub fn live(provider: impl Into<ProviderId>) -> Self {
        Self {
            kind: EntryKind::Live { timeout: None },
            provider: provider.into(),
            behaviors: Vec::new(),
            accept_empty: false,
        }
    }

    /// Reject cached samples at or past this age. Ignored for live attempts.
    pub fn max_age(mut self, max_age: Duration) -> Self {
        if let EntryKind::Cached { max_age: slot } = &mut self.kind {
            *slot = Some(max_age);
        }
        self
    }

    /// Race the live update against this timer. Ignored for cached attempts.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        if let EntryKind::Live { timeout: slot } = &mut self.kind {
            *slot = Some(timeout);
        }
        self
    }

    /// Wrap this attempt in a behavior. Declaration order is wrap order,
    /// first declared innermost.
    pub fn behavior(mut self, behavior: impl Behavior + 'static) -> Self {
        self.behaviors.push(Arc::new(behavior));
        self
    }

    /// Let this attempt end the chain with "no value" instead of skipping
    /// when it produces nothing. The chain default still substitutes.
    pub fn accept_empty(mut self) -> Self {
        self.accept_empty = true;
        self
    }

    fn fill_from(&mut self, defaults: &ChainDefaults) {
        match &mut self.kind {
            EntryKind::Cached { max_age } => {
                if max_age.is_none() {
                    *max_age = defaults.max_age;
                }
            }
            EntryKind::Live { timeout } => {
                if timeout.is_none() {
                    *timeout = defaults.timeout;
                }
            }
        }
    }

    /// Failure classes this attempt recovers from by skipping to the next
    /// entry. Suppressed errors always skip.
    fn skips(&self, class: ErrorClass) -> bool {
        if class == ErrorClass::Ignorable {
            return true;
        }
        match self.kind {
            EntryKind::Cached { .. } => {
                matches!(class, ErrorClass::NoCachedSample | ErrorClass::StaleSample)
            }
            EntryKind::Live { .. } => {
                matches!(class, ErrorClass::Timeout | ErrorClass::DisabledSource)
            }
        }
    }
}

/// Accumulates chain entries; [`ChainBuilder::build`] consumes the builder,
/// so a described chain can no longer be appended to.
pub struct ChainBuilder<C: Clock> {
    manager: LocationManager<C>,
    entries: Vec<ChainEntry>,
    defaults: ChainDefaults,
    default: Option<LocationSample>,
}

impl<C: Clock> ChainBuilder<C> {
    pub(crate) fn new(manager: LocationManager<C>) -> Self {
        Self {
            manager,
            entries: Vec::new(),
            defaults: ChainDefaults::default(),
            default: None,
        }
    }

    /// Append a cached attempt
    pub fn add_cached(self, provider: impl Into<ProviderId>, max_age: Option<Duration>) -> Self {
        let mut entry = ChainEntry::cached(provider);
        if let Some(max_age) = max_age {
            entry = entry.max_age(max_age);
        }
        self.push(entry)
    }

    /// Append a live attempt
    pub fn add_live(self, provider: impl Into<ProviderId>, timeout: Option<Duration>) -> Self {
        let mut entry = ChainEntry::live(provider);
        if let Some(timeout) = timeout {
            entry = entry.timeout(timeout);
        }
        self.push(entry)
    }

    /// Append a fully described attempt
    pub fn push(mut self, entry: ChainEntry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Timeout and max-age applied to entries that did not set their own
    pub fn defaults(mut self, defaults: ChainDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// The sample returned when the chain ends with nothing. Last write wins.
    pub fn set_default(mut self, default: Option<LocationSample>) -> Self {
        self.default = default;
        self
    }

    /// Finalize the description. The chain can then only be executed.
    pub fn build(self) -> Chain<C> {
        let mut entries = self.entries;
        for entry in &mut entries {
            entry.fill_from(&self.defaults);
        }
        Chain {
            manager: self.manager,
            entries,
            default: self.default,
        }
    }
}

/// A finalized fallback chain; executing it consumes it
pub struct Chain<C: Clock> {
    manager: LocationManager<C>,
    entries: Vec<ChainEntry>,
    default: Option<LocationSample>,
}

impl<C: Clock> Chain<C> {
    /// Run the entries in order and reconcile into one outcome.
    ///
    /// An empty chain reconciles immediately without touching the source.
    pub async fn execute(self) -> Acquired {
        let source = self.manager.source();

        for (index, entry) in self.entries.iter().enumerate() {
            let params = BehaviorParams {
                provider: entry.provider.clone(),
            };
            let base: AcquireFuture = match entry.kind {
                EntryKind::Cached { max_age } => Box::pin(request::cached(
                    &source,
                    self.manager.clock(),
                    &params.provider,
                    max_age,
                )),
                EntryKind::Live { timeout } => {
                    Box::pin(request::live(&source, &params.provider, timeout))
                }
            };

            match apply_all(&entry.behaviors, base, &params).await {
                Ok(Some(sample)) => {
                    tracing::debug!(index, provider = %entry.provider, "chain satisfied");
                    return Ok(Some(sample));
                }
                Ok(None) if entry.accept_empty => {
                    tracing::debug!(index, provider = %entry.provider, "chain ended empty");
                    break;
                }
                Ok(None) => continue,
                Err(error) if entry.skips(error.class()) => {
                    tracing::debug!(index, provider = %entry.provider, error = %error, "entry skipped");
                    continue;
                }
                Err(error) => {
                    tracing::warn!(index, provider = %entry.provider, error = %error, "chain aborted");
                    return Err(error);
                }
            }
        }

        Ok(self.default)
    }
}

#[cfg(test)]
#[path = "chain_tests.rs"]
mod tests;
