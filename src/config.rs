// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Panel configuration.
//!
//! A [`PanelConfig`] holds the connection parameters and the list of named
//! states. It can be built in code or deserialized from JSON:
//!
//! ```
//! use elkron_lib::config::PanelConfig;
//! use elkron_lib::types::AlarmState;
//!
//! let config = PanelConfig::from_json_str(r#"{
//!     "host": "192.168.1.20",
//!     "username": "installer",
//!     "password": "secret",
//!     "states": [
//!         {"name": "armed_away", "zones": "1, 2, 3"},
//!         {"name": "armed_home", "zones": [1]}
//!     ]
//! }"#).unwrap();
//!
//! let states = config.configured_states().unwrap();
//! assert_eq!(config.name, "Elkron");
//! assert_eq!(states.get(&AlarmState::ArmedAway).unwrap().zones().len(), 3);
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::state::{ConfiguredStates, NamedState};
use crate::types::{AlarmState, ZoneId, ZoneSet};

/// Default display name of a panel.
pub const DEFAULT_NAME: &str = "Elkron";

fn default_name() -> String {
    DEFAULT_NAME.to_string()
}

/// Configuration of one alarm panel.
///
/// The `Debug` output never includes the password.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelConfig {
    /// Display name of the panel.
    #[serde(default = "default_name")]
    pub name: String,
    /// Hostname or IP address of the panel.
    pub host: String,
    /// Login username.
    pub username: String,
    /// Login password.
    pub password: String,
    /// Port, when the panel does not listen on the scheme default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// Whether to use HTTPS.
    #[serde(default)]
    pub use_https: bool,
    /// Request timeout in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
    /// Named states, in priority order.
    #[serde(default)]
    pub states: Vec<StateEntry>,
}

impl std::fmt::Debug for PanelConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PanelConfig")
            .field("name", &self.name)
            .field("host", &self.host)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("port", &self.port)
            .field("use_https", &self.use_https)
            .field("timeout_ms", &self.timeout_ms)
            .field("states", &self.states)
            .finish()
    }
}

/// One named-state definition as written in the configuration.
///
/// Both fields are optional at the document level so that a broken entry
/// is skipped with a warning instead of rejecting the whole configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateEntry {
    /// State label, e.g. `armed_home`.
    pub name: Option<String>,
    /// Zones armed in that state.
    pub zones: Option<ZoneList>,
}

/// Zone list, either as a comma-separated string or as integers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ZoneList {
    /// Integer list, e.g. `[1, 2, 3]`.
    List(Vec<ZoneId>),
    /// Comma-separated list, e.g. `"1, 2, 3"`.
    Csv(String),
}

impl ZoneList {
    /// Parses the zone list.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidZone` if a token is not a valid zone id.
    pub fn to_zone_set(&self, state: &str) -> Result<ZoneSet, ConfigError> {
        match self {
            Self::List(zones) => Ok(ZoneSet::new(zones.iter().copied())),
            Self::Csv(text) => parse_zone_csv(text, state),
        }
    }
}

/// Parses a comma-separated zone list. Blank tokens are ignored.
///
/// # Errors
///
/// Returns `ConfigError::InvalidZone` if a token is not a valid zone id.
pub fn parse_zone_csv(text: &str, state: &str) -> Result<ZoneSet, ConfigError> {
    text.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            token.parse::<ZoneId>().map_err(|_| ConfigError::InvalidZone {
                state: state.to_string(),
                value: token.to_string(),
            })
        })
        .collect()
}

impl PanelConfig {
    /// Creates a configuration with no named states.
    #[must_use]
    pub fn new(
        host: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: default_name(),
            host: host.into(),
            username: username.into(),
            password: password.into(),
            port: None,
            use_https: false,
            timeout_ms: None,
            states: Vec::new(),
        }
    }

    /// Parses a configuration from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns error if the document is not valid JSON, lacks a required
    /// field, or has an empty host.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&contents)?;
        tracing::info!(path = %path.display(), name = %config.name, "Loaded panel configuration");
        Ok(config)
    }

    /// Checks the connection fields.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingField` if host or username is empty, and
    /// `ConfigError::InvalidTimeout` if the timeout is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::MissingField("host"));
        }
        if self.username.trim().is_empty() {
            return Err(ConfigError::MissingField("username"));
        }
        if self.timeout_ms == Some(0) {
            return Err(ConfigError::InvalidTimeout);
        }
        Ok(())
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets a custom port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Enables HTTPS.
    #[must_use]
    pub fn with_https(mut self) -> Self {
        self.use_https = true;
        self
    }

    /// Sets the request timeout, kept with millisecond precision.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }

    /// Appends a named state.
    #[must_use]
    pub fn with_state(mut self, state: AlarmState, zones: impl IntoIterator<Item = ZoneId>) -> Self {
        self.states.push(StateEntry {
            name: Some(state.to_string()),
            zones: Some(ZoneList::List(zones.into_iter().collect())),
        });
        self
    }

    /// Returns the request timeout, if configured.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Builds the named states in configuration order.
    ///
    /// Entries without a name or without zones are skipped with a warning.
    /// An entry with an empty zone list is skipped too, since it would
    /// shadow the disarmed state. A missing `armed_away` or `armed_home`
    /// entry is logged; arming to it then fails at command time.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidZone` if a zone list cannot be parsed.
    pub fn configured_states(&self) -> Result<ConfiguredStates, ConfigError> {
        let mut states = Vec::with_capacity(self.states.len());

        for entry in &self.states {
            let (Some(name), Some(zones)) = (&entry.name, &entry.zones) else {
                tracing::warn!(entry = ?entry, "Invalid state configuration, missing name or zones");
                continue;
            };
            if name.trim().is_empty() {
                tracing::warn!(entry = ?entry, "Invalid state configuration, empty name");
                continue;
            }

            let zones = zones.to_zone_set(name)?;
            if zones.is_empty() {
                tracing::warn!(state = %name, "Ignoring state with no zones");
                continue;
            }

            states.push(NamedState::new(AlarmState::from(name.as_str()), zones));
        }

        let states = ConfiguredStates::new(states);
        for required in [AlarmState::ArmedAway, AlarmState::ArmedHome] {
            if !states.contains(&required) {
                tracing::warn!(state = %required, panel = %self.name, "State not configured");
            }
        }

        Ok(states)
    }

    /// Builds the HTTP connection parameters.
    #[cfg(feature = "http")]
    #[must_use]
    pub fn http_config(&self) -> crate::protocol::HttpConfig {
        let mut config = crate::protocol::HttpConfig::new(self.host.clone())
            .with_credentials(self.username.clone(), self.password.clone());
        if let Some(port) = self.port {
            config = config.with_port(port);
        }
        if self.use_https {
            config = config.with_https();
        }
        if let Some(timeout) = self.timeout() {
            config = config.with_timeout(timeout);
        }
        config
    }
}
