// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Published panel attributes.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::state::{RemoteSnapshot, ResolvedState};
use crate::types::ZoneSet;

/// What a panel publishes after each poll.
///
/// Attributes are recomputed in one step after every poll and never
/// mutated afterwards; readers get a shared, immutable copy.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PanelAttributes {
    state: ResolvedState,
    available: bool,
    snapshot: Option<Arc<RemoteSnapshot>>,
    updated_at: Option<DateTime<Utc>>,
}

impl PanelAttributes {
    /// Attributes of a panel that was never polled.
    #[must_use]
    pub fn initial() -> Self {
        Self::default()
    }

    /// Attributes after a successful poll.
    #[must_use]
    pub fn polled(state: ResolvedState, snapshot: RemoteSnapshot) -> Self {
        Self {
            state,
            available: true,
            updated_at: Some(snapshot.fetched_at()),
            snapshot: Some(Arc::new(snapshot)),
        }
    }

    /// Same attributes, flagged unavailable. The snapshot is kept as-is.
    #[must_use]
    pub fn unavailable(&self) -> Self {
        Self {
            available: false,
            ..self.clone()
        }
    }

    /// Returns the resolved state.
    #[must_use]
    pub fn state(&self) -> &ResolvedState {
        &self.state
    }

    /// Returns `true` if the last poll succeeded.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Returns the last fetched snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Option<&RemoteSnapshot> {
        self.snapshot.as_deref()
    }

    /// Returns the active zones of the last snapshot.
    #[must_use]
    pub fn active_zones(&self) -> Option<ZoneSet> {
        self.snapshot.as_deref().and_then(RemoteSnapshot::active_zones)
    }

    /// Returns when the last successful poll happened.
    #[must_use]
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Returns the raw snapshot (`state`, `info`, `structure`) for diagnostics.
    #[must_use]
    pub fn extra_state_attributes(&self) -> Option<Value> {
        self.snapshot.as_deref().map(RemoteSnapshot::to_value)
    }
}
