// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Panel capabilities.
//!
//! Describes which commands a panel exposes to its host, derived from the
//! named states the user configured.

use crate::state::ConfiguredStates;
use crate::types::AlarmState;

/// Format of the code a user must enter to arm or disarm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodeFormat {
    /// Digits only.
    Number,
    /// Any characters.
    Text,
}

impl CodeFormat {
    /// Returns the format label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Text => "text",
        }
    }
}

/// Commands supported by a panel.
///
/// # Examples
///
/// ```
/// use elkron_lib::Capabilities;
/// use elkron_lib::state::{ConfiguredStates, NamedState};
/// use elkron_lib::types::{AlarmState, ZoneSet};
///
/// let states = ConfiguredStates::new(vec![
///     NamedState::new(AlarmState::ArmedHome, ZoneSet::new([1])),
/// ]);
/// let caps = Capabilities::from_states(&states);
///
/// assert!(caps.supports_arm_home());
/// assert!(!caps.supports_arm_away());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capabilities {
    /// An `armed_home` state is configured.
    pub arm_home: bool,

    /// An `armed_away` state is configured.
    pub arm_away: bool,

    /// Custom states that can be armed by label.
    pub custom_states: Vec<AlarmState>,

    /// Format of the user code.
    pub code_format: CodeFormat,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            arm_home: true,
            arm_away: true,
            custom_states: Vec::new(),
            code_format: CodeFormat::Number,
        }
    }
}

impl Capabilities {
    /// Derives capabilities from the configured states.
    #[must_use]
    pub fn from_states(states: &ConfiguredStates) -> Self {
        let mut custom_states: Vec<AlarmState> = Vec::new();
        for named in states.iter() {
            if let AlarmState::Custom(_) = named.state()
                && !custom_states.contains(named.state())
            {
                custom_states.push(named.state().clone());
            }
        }

        Self {
            arm_home: states.contains(&AlarmState::ArmedHome),
            arm_away: states.contains(&AlarmState::ArmedAway),
            custom_states,
            code_format: CodeFormat::Number,
        }
    }

    /// Returns `true` if the panel can be armed in home mode.
    #[must_use]
    pub fn supports_arm_home(&self) -> bool {
        self.arm_home
    }

    /// Returns `true` if the panel can be armed in away mode.
    #[must_use]
    pub fn supports_arm_away(&self) -> bool {
        self.arm_away
    }

    /// Returns `true` if the panel can be armed to the given state.
    #[must_use]
    pub fn supports(&self, state: &AlarmState) -> bool {
        match state {
            AlarmState::ArmedHome => self.arm_home,
            AlarmState::ArmedAway => self.arm_away,
            AlarmState::Custom(_) => self.custom_states.contains(state),
            AlarmState::Disarmed => true,
            AlarmState::ArmedCustomBypass => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::NamedState;
    use crate::types::ZoneSet;

    #[test]
    fn default_supports_home_and_away() {
        let caps = Capabilities::default();
        assert!(caps.supports_arm_home());
        assert!(caps.supports_arm_away());
        assert_eq!(caps.code_format, CodeFormat::Number);
    }

    #[test]
    fn from_empty_states() {
        let caps = Capabilities::from_states(&ConfiguredStates::default());
        assert!(!caps.supports_arm_home());
        assert!(!caps.supports_arm_away());
        assert!(caps.supports(&AlarmState::Disarmed));
        assert!(!caps.supports(&AlarmState::ArmedCustomBypass));
    }

    #[test]
    fn custom_states_are_deduplicated() {
        let night = AlarmState::Custom("night".to_string());
        let states = ConfiguredStates::new(vec![
            NamedState::new(night.clone(), ZoneSet::new([1])),
            NamedState::new(AlarmState::ArmedAway, ZoneSet::new([1, 2])),
            NamedState::new(night.clone(), ZoneSet::new([3])),
        ]);
        let caps = Capabilities::from_states(&states);
        assert_eq!(caps.custom_states, vec![night.clone()]);
        assert!(caps.supports(&night));
        assert!(caps.supports_arm_away());
    }

    #[test]
    fn code_format_label() {
        assert_eq!(CodeFormat::Number.as_str(), "number");
        assert_eq!(CodeFormat::Text.as_str(), "text");
    }
}
