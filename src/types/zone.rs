// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Zone identifiers and zone sets.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a physical sensor or area on the panel.
pub type ZoneId = u32;

/// A sorted, de-duplicated set of zones.
///
/// Zone sets are normalized at construction time, so two sets built from
/// the same zones in a different order compare equal.
///
/// # Examples
///
/// ```
/// use elkron_lib::types::ZoneSet;
///
/// let a = ZoneSet::new([3, 1, 2]);
/// let b = ZoneSet::new([1, 2, 3, 3]);
/// assert_eq!(a, b);
/// assert_eq!(a.as_slice(), &[1, 2, 3]);
///
/// assert!(ZoneSet::empty().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<ZoneId>", into = "Vec<ZoneId>")]
pub struct ZoneSet(Vec<ZoneId>);

impl ZoneSet {
    /// Creates a zone set from any collection of zone identifiers.
    #[must_use]
    pub fn new(zones: impl IntoIterator<Item = ZoneId>) -> Self {
        let mut zones: Vec<ZoneId> = zones.into_iter().collect();
        zones.sort_unstable();
        zones.dedup();
        Self(zones)
    }

    /// Creates an empty zone set.
    #[must_use]
    pub const fn empty() -> Self {
        Self(Vec::new())
    }

    /// Returns the zones in ascending order.
    #[must_use]
    pub fn as_slice(&self) -> &[ZoneId] {
        &self.0
    }

    /// Returns the number of zones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the set holds no zones.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` if the zone belongs to the set.
    #[must_use]
    pub fn contains(&self, zone: ZoneId) -> bool {
        self.0.binary_search(&zone).is_ok()
    }

    /// Iterates over the zones in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = ZoneId> + '_ {
        self.0.iter().copied()
    }
}

impl From<Vec<ZoneId>> for ZoneSet {
    fn from(zones: Vec<ZoneId>) -> Self {
        Self::new(zones)
    }
}

impl From<ZoneSet> for Vec<ZoneId> {
    fn from(set: ZoneSet) -> Self {
        set.0
    }
}

impl FromIterator<ZoneId> for ZoneSet {
    fn from_iter<I: IntoIterator<Item = ZoneId>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl fmt::Display for ZoneSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for zone in &self.0 {
            if !first {
                f.write_str(",")?;
            }
            write!(f, "{zone}")?;
            first = false;
        }
        Ok(())
    }
}
