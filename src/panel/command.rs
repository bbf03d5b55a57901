// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Arm and disarm commands.

use std::fmt;

use crate::types::AlarmState;

/// A command sent to the panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelCommand {
    /// Disarm the currently active zones.
    Disarm,
    /// Arm the zones configured for the given state.
    Arm(AlarmState),
}

impl fmt::Display for PanelCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disarm => f.write_str("disarm"),
            Self::Arm(state) => write!(f, "arm {state}"),
        }
    }
}

/// What happened to a command.
///
/// Commands never fail with an error: every failure mode is reported here
/// and logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The panel accepted the command.
    Sent,
    /// No usable snapshot yet; nothing was sent.
    NotConnected,
    /// The target state is not configured; nothing was sent.
    StateNotConfigured(AlarmState),
    /// The gateway call failed.
    Failed(String),
}

impl CommandOutcome {
    /// Returns `true` if the command reached the panel.
    #[must_use]
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent)
    }
}
