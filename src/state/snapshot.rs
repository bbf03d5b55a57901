// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Snapshot of the payloads fetched from the panel.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::response::{DetailedState, ZoneEntry};
use crate::types::{ZoneId, ZoneSet};

/// Everything fetched from the panel during one poll.
///
/// A snapshot is built in full before it replaces the previous one, so it
/// is never observed partially updated.
///
/// Serializes to `{"state", "info", "structure"}`, the shape exposed as
/// diagnostic attributes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RemoteSnapshot {
    state: DetailedState,
    info: Value,
    structure: Vec<ZoneEntry>,
    #[serde(skip)]
    fetched_at: DateTime<Utc>,
}

impl RemoteSnapshot {
    /// Creates a snapshot stamped with the current time.
    #[must_use]
    pub fn new(state: DetailedState, info: Value, structure: Vec<ZoneEntry>) -> Self {
        Self {
            state,
            info,
            structure,
            fetched_at: Utc::now(),
        }
    }

    /// Returns the detailed state payload.
    #[must_use]
    pub fn state(&self) -> &DetailedState {
        &self.state
    }

    /// Returns the system information payload.
    #[must_use]
    pub fn info(&self) -> &Value {
        &self.info
    }

    /// Returns the configured zones of the installation.
    #[must_use]
    pub fn structure(&self) -> &[ZoneEntry] {
        &self.structure
    }

    /// Returns when the snapshot was fetched.
    #[must_use]
    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    /// Returns the active zones, or `None` if the payload lacks them.
    #[must_use]
    pub fn active_zones(&self) -> Option<ZoneSet> {
        self.state.active_zones()
    }

    /// Returns the display name of a zone, if the structure lists it.
    #[must_use]
    pub fn zone_name(&self, zone_id: ZoneId) -> Option<&str> {
        self.structure
            .iter()
            .find(|zone| zone.zone_id == zone_id)
            .map(|zone| zone.name.as_str())
    }

    /// Returns the snapshot as a JSON value.
    #[must_use]
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}
