// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Router configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for config operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Serialization/deserialization failure.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Behavior switches for a router and its element.
///
/// Missing fields take their defaults; unknown fields are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RouterConfig {
    /// Call `start()` from the element's `attached` hook.
    pub start_on_attach: bool,
    /// Emit a debug event for every path that matches no pattern.
    pub log_unmatched: bool,
    /// Warn when a registration renames the parameters of an existing
    /// terminal (two patterns sharing one wildcard slot).
    pub warn_on_param_collision: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            start_on_attach: false,
            log_unmatched: true,
            warn_on_param_collision: true,
        }
    }
}

impl RouterConfig {
    /// Parse from JSON. Blank input yields the defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
