// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Builder defaults configuration
//!
//! Applications embed this in their own config files; duration fields
//! accept humantime strings ("5s", "2m", "1h").

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Defaults applied by the chain builder to entries that omit their own
/// timeout or max-age.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainDefaults {
    /// Default timeout for live-request entries
    #[serde(with = "humantime_serde", default)]
    pub timeout: Option<Duration>,

    /// Default max-age for cached-lookup entries
    #[serde(with = "humantime_serde", default)]
    pub max_age: Option<Duration>,
}

impl ChainDefaults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = Some(max_age);
        self
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
