// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Detailed state payload.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{ZoneId, ZoneSet};

/// Raw detailed state reported by the panel.
///
/// The payload is kept as-is. The only field the library interprets is
/// `activezone`, the list of currently armed zones.
///
/// # Examples
///
/// ```
/// use elkron_lib::response::DetailedState;
/// use elkron_lib::types::ZoneSet;
///
/// let state: DetailedState =
///     serde_json::from_str(r#"{"activezone": [3, 1], "alarm": false}"#).unwrap();
/// assert_eq!(state.active_zones(), Some(ZoneSet::new([1, 3])));
///
/// let broken: DetailedState = serde_json::from_str(r#"{"alarm": false}"#).unwrap();
/// assert_eq!(broken.active_zones(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DetailedState(Value);

impl DetailedState {
    /// Name of the field holding the active zones.
    pub const ACTIVE_ZONE_FIELD: &'static str = "activezone";

    /// Wraps a raw payload.
    #[must_use]
    pub fn new(raw: Value) -> Self {
        Self(raw)
    }

    /// Returns the raw payload.
    #[must_use]
    pub fn raw(&self) -> &Value {
        &self.0
    }

    /// Returns the active zones.
    ///
    /// Returns `None` when the field is missing, null, not an array, or
    /// holds anything other than non-negative integers that fit a [`ZoneId`].
    #[must_use]
    pub fn active_zones(&self) -> Option<ZoneSet> {
        let zones = self.0.get(Self::ACTIVE_ZONE_FIELD)?.as_array()?;
        zones
            .iter()
            .map(|zone| zone.as_u64().and_then(|id| ZoneId::try_from(id).ok()))
            .collect()
    }
}

impl From<Value> for DetailedState {
    fn from(raw: Value) -> Self {
        Self::new(raw)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn active_zones_sorted() {
        let state = DetailedState::new(json!({"activezone": [4, 2, 9]}));
        assert_eq!(state.active_zones().unwrap().as_slice(), &[2, 4, 9]);
    }

    #[test]
    fn empty_active_zones() {
        let state = DetailedState::new(json!({"activezone": []}));
        assert_eq!(state.active_zones(), Some(ZoneSet::empty()));
    }

    #[test]
    fn null_active_zones() {
        let state = DetailedState::new(json!({"activezone": null}));
        assert_eq!(state.active_zones(), None);
    }

    #[test]
    fn non_numeric_zone_is_malformed() {
        let state = DetailedState::new(json!({"activezone": [1, "two"]}));
        assert_eq!(state.active_zones(), None);
    }

    #[test]
    fn negative_zone_is_malformed() {
        let state = DetailedState::new(json!({"activezone": [-1]}));
        assert_eq!(state.active_zones(), None);
    }

    #[test]
    fn null_payload() {
        let state = DetailedState::new(Value::Null);
        assert_eq!(state.active_zones(), None);
    }
}
