// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Panel event types.

use chrono::{DateTime, Utc};

use crate::panel::{CommandOutcome, PanelCommand};
use crate::state::ResolvedState;

/// Events emitted by an alarm panel adapter.
#[derive(Debug, Clone)]
pub enum PanelEvent {
    /// The resolved state changed after a poll.
    StateChanged {
        /// Name of the panel.
        panel: String,
        /// State before the poll.
        previous: ResolvedState,
        /// State after the poll.
        current: ResolvedState,
        /// When the change was observed.
        at: DateTime<Utc>,
    },

    /// The panel became reachable or unreachable.
    AvailabilityChanged {
        /// Name of the panel.
        panel: String,
        /// Whether the last poll succeeded.
        available: bool,
        /// Error of the failed poll, if any.
        error: Option<String>,
        /// When the change was observed.
        at: DateTime<Utc>,
    },

    /// A poll failed. Emitted on every failure.
    PollFailed {
        /// Name of the panel.
        panel: String,
        /// Description of the failure.
        error: String,
        /// When the poll failed.
        at: DateTime<Utc>,
    },

    /// An arm or disarm command finished.
    CommandCompleted {
        /// Name of the panel.
        panel: String,
        /// The command that ran.
        command: PanelCommand,
        /// What happened.
        outcome: CommandOutcome,
        /// When the command finished.
        at: DateTime<Utc>,
    },
}

impl PanelEvent {
    /// Creates a state change event stamped now.
    #[must_use]
    pub fn state_changed(
        panel: impl Into<String>,
        previous: ResolvedState,
        current: ResolvedState,
    ) -> Self {
        Self::StateChanged {
            panel: panel.into(),
            previous,
            current,
            at: Utc::now(),
        }
    }

    /// Creates an availability event stamped now.
    #[must_use]
    pub fn availability(panel: impl Into<String>, available: bool, error: Option<String>) -> Self {
        Self::AvailabilityChanged {
            panel: panel.into(),
            available,
            error,
            at: Utc::now(),
        }
    }

    /// Creates a poll failure event stamped now.
    #[must_use]
    pub fn poll_failed(panel: impl Into<String>, error: impl Into<String>) -> Self {
        Self::PollFailed {
            panel: panel.into(),
            error: error.into(),
            at: Utc::now(),
        }
    }

    /// Creates a command completion event stamped now.
    #[must_use]
    pub fn command_completed(
        panel: impl Into<String>,
        command: PanelCommand,
        outcome: CommandOutcome,
    ) -> Self {
        Self::CommandCompleted {
            panel: panel.into(),
            command,
            outcome,
            at: Utc::now(),
        }
    }

    /// Returns the name of the panel that emitted the event.
    #[must_use]
    pub fn panel(&self) -> &str {
        match self {
            Self::StateChanged { panel, .. }
            | Self::AvailabilityChanged { panel, .. }
            | Self::PollFailed { panel, .. }
            | Self::CommandCompleted { panel, .. } => panel,
        }
    }

    /// Returns a short label for the event variant.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::StateChanged { .. } => "state_changed",
            Self::AvailabilityChanged { .. } => "availability_changed",
            Self::PollFailed { .. } => "poll_failed",
            Self::CommandCompleted { .. } => "command_completed",
        }
    }

    /// Returns when the event occurred.
    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::StateChanged { at, .. }
            | Self::AvailabilityChanged { at, .. }
            | Self::PollFailed { at, .. }
            | Self::CommandCompleted { at, .. } => *at,
        }
    }
}
