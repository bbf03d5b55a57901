// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event system for panel state changes.
//!
//! The [`EventBus`] uses tokio's broadcast channel so that any number of
//! subscribers can observe state transitions, availability changes and
//! command results of an [`AlarmPanel`](crate::panel::AlarmPanel).
//!
//! # Examples
//!
//! ```
//! use elkron_lib::event::{EventBus, PanelEvent};
//!
//! let bus = EventBus::new();
//! let mut rx = bus.subscribe();
//!
//! bus.publish(PanelEvent::availability("Home", false, Some("timeout".to_string())));
//! assert!(rx.try_recv().is_ok());
//! ```

mod event_bus;
mod panel_event;

pub use event_bus::{EventBus, StateChanges};
pub use panel_event::PanelEvent;
