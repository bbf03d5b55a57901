// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Elkron Lib - A Rust library to monitor and control Elkron alarm panels.
//!
//! The panel only reports which zones are currently armed. This library
//! polls that list and maps it onto named states configured by the user
//! (`armed_away`, `armed_home`, custom labels), falling back to
//! `disarmed` when no zone is active and `armed_custom_bypass` when the
//! active zones match no configured state.
//!
//! # Quick Start
//!
//! ```no_run
//! use elkron_lib::config::PanelConfig;
//! use elkron_lib::panel::{AlarmControl, AlarmPanel};
//! use elkron_lib::types::AlarmState;
//!
//! #[tokio::main]
//! async fn main() -> elkron_lib::Result<()> {
//!     let config = PanelConfig::new("192.168.1.20", "installer", "secret")
//!         .with_state(AlarmState::ArmedAway, [1, 2, 3])
//!         .with_state(AlarmState::ArmedHome, [1]);
//!
//!     let panel = AlarmPanel::from_config(&config)?;
//!     println!("state: {}", panel.update().await?);
//!
//!     if !panel.arm_away(Some("1234")).await.is_sent() {
//!         eprintln!("arming failed");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Resolving without a panel
//!
//! The resolution rules are available as a pure function:
//!
//! ```
//! use elkron_lib::state::{resolve_zones, ConfiguredStates, NamedState};
//! use elkron_lib::types::{AlarmState, ZoneSet};
//!
//! let states = ConfiguredStates::new(vec![
//!     NamedState::new(AlarmState::ArmedHome, ZoneSet::new([1])),
//! ]);
//! assert_eq!(resolve_zones(&ZoneSet::new([1]), &states), AlarmState::ArmedHome);
//! assert_eq!(resolve_zones(&ZoneSet::new([7]), &states), AlarmState::ArmedCustomBypass);
//! ```

mod capabilities;
pub mod config;
pub mod error;
pub mod event;
pub mod panel;
pub mod protocol;
pub mod response;
pub mod state;
pub mod types;

pub use capabilities::{Capabilities, CodeFormat};
pub use config::PanelConfig;
pub use error::{ConfigError, Error, ParseError, ProtocolError, Result};
pub use event::{EventBus, PanelEvent, StateChanges};
pub use panel::{AlarmControl, AlarmPanel, CommandOutcome, PanelAttributes, PanelCommand};
#[cfg(feature = "http")]
pub use protocol::{HttpConfig, HttpGateway};
pub use protocol::Gateway;
pub use state::{ConfiguredStates, NamedState, RemoteSnapshot, ResolvedState};
pub use types::{AlarmState, ZoneId, ZoneSet};
