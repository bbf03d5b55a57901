// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Alarm state reconciliation.
//!
//! The panel only reports which zones are currently active. This module
//! maps that list onto the named states configured by the user:
//! [`ConfiguredStates`] holds the ordered `(state, zones)` pairs,
//! [`RemoteSnapshot`] holds the latest payloads fetched from the panel, and
//! [`resolve`] computes the current [`ResolvedState`].
//!
//! # Examples
//!
//! ```
//! use elkron_lib::state::{resolve_zones, ConfiguredStates, NamedState};
//! use elkron_lib::types::{AlarmState, ZoneSet};
//!
//! let states = ConfiguredStates::new(vec![
//!     NamedState::new(AlarmState::ArmedAway, ZoneSet::new([1, 2, 3])),
//!     NamedState::new(AlarmState::ArmedHome, ZoneSet::new([1])),
//! ]);
//!
//! assert_eq!(resolve_zones(&ZoneSet::new([3, 2, 1]), &states), AlarmState::ArmedAway);
//! assert_eq!(resolve_zones(&ZoneSet::new([1]), &states), AlarmState::ArmedHome);
//! assert_eq!(resolve_zones(&ZoneSet::empty(), &states), AlarmState::Disarmed);
//! assert_eq!(resolve_zones(&ZoneSet::new([2]), &states), AlarmState::ArmedCustomBypass);
//! ```

mod named_state;
mod resolver;
mod snapshot;

pub use named_state::{ConfiguredStates, NamedState};
pub use resolver::{ResolvedState, resolve, resolve_zones};
pub use snapshot::RemoteSnapshot;
