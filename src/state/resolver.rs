// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Zone-to-state resolution.

use std::fmt;

use crate::types::{AlarmState, ZoneSet};

use super::{ConfiguredStates, RemoteSnapshot};

/// Outcome of resolving the panel state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResolvedState {
    /// The panel is in the given state.
    State(AlarmState),
    /// No usable snapshot is available.
    #[default]
    Unknown,
}

impl ResolvedState {
    /// Returns the state label, `"unknown"` when indeterminate.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::State(state) => state.as_str(),
            Self::Unknown => "unknown",
        }
    }

    /// Returns the resolved state, if known.
    #[must_use]
    pub fn state(&self) -> Option<&AlarmState> {
        match self {
            Self::State(state) => Some(state),
            Self::Unknown => None,
        }
    }

    /// Returns `true` if the state is indeterminate.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }
}

impl fmt::Display for ResolvedState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<AlarmState> for ResolvedState {
    fn from(state: AlarmState) -> Self {
        Self::State(state)
    }
}

/// Resolves the current state from the latest snapshot.
///
/// Returns [`ResolvedState::Unknown`] when no snapshot is available or when
/// it does not carry a readable list of active zones.
#[must_use]
pub fn resolve(snapshot: Option<&RemoteSnapshot>, configured: &ConfiguredStates) -> ResolvedState {
    snapshot
        .and_then(RemoteSnapshot::active_zones)
        .map_or(ResolvedState::Unknown, |active| {
            ResolvedState::State(resolve_zones(&active, configured))
        })
}

/// Resolves a set of active zones against the configured states.
///
/// The first configured state whose zones match exactly wins. Without an
/// exact match, no active zone means [`AlarmState::Disarmed`] and any other
/// combination means [`AlarmState::ArmedCustomBypass`].
#[must_use]
pub fn resolve_zones(active: &ZoneSet, configured: &ConfiguredStates) -> AlarmState {
    if let Some(named) = configured.find_by_zones(active) {
        return named.state().clone();
    }

    if active.is_empty() {
        AlarmState::Disarmed
    } else {
        AlarmState::ArmedCustomBypass
    }
}
