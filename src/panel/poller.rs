// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Periodic polling.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::protocol::Gateway;

use super::{AlarmControl, AlarmPanel};

/// Shortest accepted polling period.
const MIN_PERIOD: Duration = Duration::from_millis(100);

/// Handle to a running poller.
#[derive(Debug)]
pub struct PollerHandle {
    task: JoinHandle<()>,
}

impl PollerHandle {
    /// Stops polling. A poll in progress is cancelled.
    pub fn stop(self) {
        self.task.abort();
    }

    /// Returns `true` once the polling task has ended.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Polls the panel every `period`, starting immediately.
///
/// Polls never overlap: a tick that falls due while the previous poll is
/// still running is skipped. Failures are logged by the panel and do not
/// stop the poller. Periods shorter than 100 ms are raised to 100 ms.
pub fn spawn_poller<G>(panel: Arc<AlarmPanel<G>>, period: Duration) -> PollerHandle
where
    G: Gateway + 'static,
{
    let period = period.max(MIN_PERIOD);
    tracing::debug!(panel = %panel.name(), period = ?period, "Starting poller");

    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            // Already logged and published by the panel.
            let _ = panel.update().await;
        }
    });

    PollerHandle { task }
}
