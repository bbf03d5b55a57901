// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Alarm state labels.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A named alarm state.
///
/// The built-in variants use the usual home-automation labels. Any other
/// label becomes [`AlarmState::Custom`].
///
/// # Examples
///
/// ```
/// use elkron_lib::types::AlarmState;
///
/// assert_eq!(AlarmState::ArmedHome.as_str(), "armed_home");
/// assert_eq!(AlarmState::from("armed_away"), AlarmState::ArmedAway);
/// assert_eq!(
///     AlarmState::from("night"),
///     AlarmState::Custom("night".to_string())
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AlarmState {
    /// No zone is armed.
    Disarmed,
    /// Every perimeter and interior zone is armed.
    ArmedAway,
    /// Only the zones suitable for an occupied home are armed.
    ArmedHome,
    /// Zones are armed but do not match any named configuration.
    ArmedCustomBypass,
    /// A user-supplied label.
    Custom(String),
}

impl AlarmState {
    /// Returns the state label.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Disarmed => "disarmed",
            Self::ArmedAway => "armed_away",
            Self::ArmedHome => "armed_home",
            Self::ArmedCustomBypass => "armed_custom_bypass",
            Self::Custom(label) => label,
        }
    }

    /// Returns `true` for any state other than [`AlarmState::Disarmed`].
    #[must_use]
    pub fn is_armed(&self) -> bool {
        !matches!(self, Self::Disarmed)
    }
}

impl fmt::Display for AlarmState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for AlarmState {
    fn from(label: &str) -> Self {
        match label.trim() {
            "disarmed" => Self::Disarmed,
            "armed_away" => Self::ArmedAway,
            "armed_home" => Self::ArmedHome,
            "armed_custom_bypass" => Self::ArmedCustomBypass,
            other => Self::Custom(other.to_string()),
        }
    }
}

impl From<String> for AlarmState {
    fn from(label: String) -> Self {
        Self::from(label.as_str())
    }
}

impl From<AlarmState> for String {
    fn from(state: AlarmState) -> Self {
        match state {
            AlarmState::Custom(label) => label,
            other => other.as_str().to_string(),
        }
    }
}

impl FromStr for AlarmState {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}
