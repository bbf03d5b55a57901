// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for Elkron alarm panels.
//!
//! # Types
//!
//! - [`ZoneId`] - Identifier of a physical zone
//! - [`ZoneSet`] - Sorted, de-duplicated set of zones
//! - [`AlarmState`] - Named alarm state (disarmed, armed away, ...)

mod alarm_state;
mod zone;

pub use alarm_state::AlarmState;
pub use zone::{ZoneId, ZoneSet};
