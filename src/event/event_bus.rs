// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event bus for broadcasting panel events.

use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;

use super::PanelEvent;

/// Default channel capacity for the event bus.
const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// Broadcasts panel events to any number of subscribers.
///
/// A slow subscriber that lets the channel fill up loses the oldest events
/// and receives `RecvError::Lagged`.
///
/// # Examples
///
/// ```
/// use elkron_lib::event::{EventBus, PanelEvent};
/// use elkron_lib::state::ResolvedState;
/// use elkron_lib::types::AlarmState;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let bus = EventBus::new();
/// let mut changes = bus.state_changes();
///
/// bus.publish(PanelEvent::poll_failed("Home", "timeout"));
/// bus.publish(PanelEvent::state_changed(
///     "Home",
///     ResolvedState::Unknown,
///     ResolvedState::State(AlarmState::ArmedAway),
/// ));
///
/// let event = changes.recv().await.unwrap();
/// assert_eq!(event.kind(), "state_changed");
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<PanelEvent>,
}

impl EventBus {
    /// Creates a new event bus with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Creates a new event bus with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribes to events published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<PanelEvent> {
        self.sender.subscribe()
    }

    /// Subscribes to state transitions only.
    #[must_use]
    pub fn state_changes(&self) -> StateChanges {
        StateChanges {
            receiver: self.sender.subscribe(),
        }
    }

    /// Returns the number of active subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Publishes an event to all subscribers.
    ///
    /// Without subscribers the event is discarded.
    pub fn publish(&self, event: PanelEvent) {
        tracing::trace!(
            panel = %event.panel(),
            kind = event.kind(),
            subscribers = self.sender.receiver_count(),
            "Publishing panel event"
        );
        let _ = self.sender.send(event);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiver yielding only [`PanelEvent::StateChanged`] events.
#[derive(Debug)]
pub struct StateChanges {
    receiver: broadcast::Receiver<PanelEvent>,
}

impl StateChanges {
    /// Waits for the next state transition.
    ///
    /// Other events are skipped. Returns `None` once every bus handle is
    /// dropped. Transitions lost to lag are logged and skipped.
    pub async fn recv(&mut self) -> Option<PanelEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event @ PanelEvent::StateChanged { .. }) => return Some(event),
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "State change subscriber lagged");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ResolvedState;
    use crate::types::AlarmState;

    #[test]
    fn new_bus_has_no_subscribers() {
        let bus = EventBus::new();
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn drop_subscriber_decrements_count() {
        let bus = EventBus::new();
        let rx = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 1);
        drop(rx);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn publish_delivers_to_multiple_subscribers() {
        let bus = EventBus::new();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(PanelEvent::availability("Home", true, None));

        assert_eq!(rx1.recv().await.unwrap().panel(), "Home");
        assert_eq!(rx2.recv().await.unwrap().panel(), "Home");
    }

    #[test]
    fn publish_without_subscribers_is_ignored() {
        let bus = EventBus::new();
        bus.publish(PanelEvent::availability("Home", false, None));
    }

    #[tokio::test]
    async fn state_changes_skip_other_events() {
        let bus = EventBus::new();
        let mut changes = bus.state_changes();

        bus.publish(PanelEvent::availability("Home", true, None));
        bus.publish(PanelEvent::poll_failed("Home", "timeout"));
        bus.publish(PanelEvent::state_changed(
            "Home",
            ResolvedState::Unknown,
            ResolvedState::State(AlarmState::Disarmed),
        ));

        match changes.recv().await {
            Some(PanelEvent::StateChanged { current, .. }) => {
                assert_eq!(current, ResolvedState::State(AlarmState::Disarmed));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn state_changes_end_when_bus_dropped() {
        let bus = EventBus::new();
        let mut changes = bus.state_changes();

        bus.publish(PanelEvent::poll_failed("Home", "timeout"));
        drop(bus);

        assert!(changes.recv().await.is_none());
    }

    #[tokio::test]
    async fn state_changes_survive_lag() {
        let bus = EventBus::with_capacity(2);
        let mut changes = bus.state_changes();

        for _ in 0..4 {
            bus.publish(PanelEvent::poll_failed("Home", "timeout"));
        }
        bus.publish(PanelEvent::state_changed(
            "Home",
            ResolvedState::State(AlarmState::Disarmed),
            ResolvedState::State(AlarmState::ArmedHome),
        ));

        let event = changes.recv().await.unwrap();
        assert_eq!(event.kind(), "state_changed");
    }

    #[test]
    fn clone_shares_same_channel() {
        let bus1 = EventBus::new();
        let bus2 = bus1.clone();
        let _rx = bus1.subscribe();
        assert_eq!(bus2.subscriber_count(), 1);
    }
}
