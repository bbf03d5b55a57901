// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Named states and their configured zone sets.

use crate::types::{AlarmState, ZoneSet};

/// An alarm state bound to an exact set of zones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedState {
    state: AlarmState,
    zones: ZoneSet,
}

impl NamedState {
    /// Creates a named state.
    #[must_use]
    pub fn new(state: AlarmState, zones: ZoneSet) -> Self {
        Self { state, zones }
    }

    /// Returns the state label.
    #[must_use]
    pub fn state(&self) -> &AlarmState {
        &self.state
    }

    /// Returns the zones armed in this state.
    #[must_use]
    pub fn zones(&self) -> &ZoneSet {
        &self.zones
    }
}

/// Ordered list of the named states configured for a panel.
///
/// Order matters: when two entries share the same zones, the first one
/// wins both when resolving and when looking up an arm target.
///
/// # Examples
///
/// ```
/// use elkron_lib::state::{ConfiguredStates, NamedState};
/// use elkron_lib::types::{AlarmState, ZoneSet};
///
/// let states = ConfiguredStates::new(vec![
///     NamedState::new(AlarmState::ArmedHome, ZoneSet::new([1])),
/// ]);
///
/// assert!(states.get(&AlarmState::ArmedHome).is_some());
/// assert!(states.get(&AlarmState::ArmedAway).is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfiguredStates(Vec<NamedState>);

impl ConfiguredStates {
    /// Creates the configured states from an ordered list.
    #[must_use]
    pub fn new(states: Vec<NamedState>) -> Self {
        Self(states)
    }

    /// Returns the first entry for the given state label.
    #[must_use]
    pub fn get(&self, state: &AlarmState) -> Option<&NamedState> {
        self.0.iter().find(|named| named.state() == state)
    }

    /// Returns the first entry whose zones match exactly.
    #[must_use]
    pub fn find_by_zones(&self, zones: &ZoneSet) -> Option<&NamedState> {
        self.0.iter().find(|named| named.zones() == zones)
    }

    /// Returns `true` if the given state label is configured.
    #[must_use]
    pub fn contains(&self, state: &AlarmState) -> bool {
        self.get(state).is_some()
    }

    /// Iterates over the entries in configuration order.
    pub fn iter(&self) -> impl Iterator<Item = &NamedState> {
        self.0.iter()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no state is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<NamedState> for ConfiguredStates {
    fn from_iter<I: IntoIterator<Item = NamedState>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn custom(label: &str) -> AlarmState {
        AlarmState::Custom(label.to_string())
    }

    #[test]
    fn get_returns_first_declared() {
        let states = ConfiguredStates::new(vec![
            NamedState::new(AlarmState::ArmedHome, ZoneSet::new([1])),
            NamedState::new(AlarmState::ArmedHome, ZoneSet::new([2])),
        ]);
        let home = states.get(&AlarmState::ArmedHome).unwrap();
        assert_eq!(home.zones(), &ZoneSet::new([1]));
    }

    #[test]
    fn find_by_zones_returns_first_declared() {
        let states = ConfiguredStates::new(vec![
            NamedState::new(custom("night"), ZoneSet::new([4, 5])),
            NamedState::new(custom("garage"), ZoneSet::new([5, 4])),
        ]);
        let found = states.find_by_zones(&ZoneSet::new([4, 5])).unwrap();
        assert_eq!(found.state(), &custom("night"));
    }

    #[test]
    fn iteration_keeps_configuration_order() {
        let states: ConfiguredStates = [
            NamedState::new(AlarmState::ArmedAway, ZoneSet::new([1, 2])),
            NamedState::new(AlarmState::ArmedHome, ZoneSet::new([1])),
        ]
        .into_iter()
        .collect();
        let labels: Vec<&str> = states.iter().map(|s| s.state().as_str()).collect();
        assert_eq!(labels, ["armed_away", "armed_home"]);
        assert_eq!(states.len(), 2);
    }

    #[test]
    fn empty_configuration() {
        let states = ConfiguredStates::default();
        assert!(states.is_empty());
        assert!(!states.contains(&AlarmState::ArmedAway));
    }
}
