// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Alarm panel adapter.
//!
//! [`AlarmPanel`] owns the latest snapshot fetched through a
//! [`Gateway`], resolves the named alarm state after every poll and exposes
//! arm/disarm commands. It implements [`AlarmControl`], the small interface
//! a host needs to drive a panel.
//!
//! ```no_run
//! use elkron_lib::config::PanelConfig;
//! use elkron_lib::panel::{AlarmControl, AlarmPanel};
//! use elkron_lib::types::AlarmState;
//!
//! # async fn example() -> elkron_lib::Result<()> {
//! let config = PanelConfig::new("192.168.1.20", "installer", "secret")
//!     .with_state(AlarmState::ArmedAway, [1, 2, 3])
//!     .with_state(AlarmState::ArmedHome, [1]);
//! let panel = AlarmPanel::from_config(&config)?;
//!
//! let state = panel.update().await?;
//! println!("{}: {state}", panel.name());
//!
//! panel.arm_home(Some("1234")).await;
//! # Ok(())
//! # }
//! ```

mod attributes;
mod command;
mod poller;

pub use attributes::PanelAttributes;
pub use command::{CommandOutcome, PanelCommand};
pub use poller::{PollerHandle, spawn_poller};

use std::future::Future;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::capabilities::Capabilities;
use crate::error::{Error, Result};
use crate::event::{EventBus, PanelEvent};
use crate::protocol::Gateway;
use crate::state::{ConfiguredStates, RemoteSnapshot, ResolvedState, resolve};
use crate::types::{AlarmState, ZoneSet};

/// Capabilities a host requires from an alarm panel.
pub trait AlarmControl {
    /// Polls the panel and recomputes the published attributes.
    ///
    /// # Errors
    ///
    /// Returns error if any fetch fails. The panel is then flagged
    /// unavailable and keeps its previous snapshot.
    fn update(&self) -> impl Future<Output = Result<ResolvedState>> + Send;

    /// Returns the state resolved by the last successful poll.
    fn alarm_state(&self) -> ResolvedState;

    /// Disarms the currently active zones.
    fn disarm(&self, code: Option<&str>) -> impl Future<Output = CommandOutcome> + Send;

    /// Arms the zones configured for `armed_home`.
    fn arm_home(&self, code: Option<&str>) -> impl Future<Output = CommandOutcome> + Send;

    /// Arms the zones configured for `armed_away`.
    fn arm_away(&self, code: Option<&str>) -> impl Future<Output = CommandOutcome> + Send;
}

/// An Elkron alarm panel.
#[derive(Debug)]
pub struct AlarmPanel<G: Gateway> {
    name: String,
    gateway: G,
    states: ConfiguredStates,
    capabilities: Capabilities,
    attributes: RwLock<Arc<PanelAttributes>>,
    events: EventBus,
}

#[cfg(feature = "http")]
impl AlarmPanel<crate::protocol::HttpGateway> {
    /// Creates an HTTP panel from its configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the connection fields or a zone list are invalid, or
    /// if the HTTP client cannot be created.
    pub fn from_config(config: &crate::config::PanelConfig) -> Result<Self> {
        tracing::debug!(panel = %config.name, host = %config.host, "Setting up Elkron panel");
        config.validate()?;
        let states = config.configured_states()?;
        let gateway = config.http_config().into_gateway()?;
        Ok(Self::new(config.name.clone(), gateway, states))
    }
}

impl<G: Gateway> AlarmPanel<G> {
    /// Creates a panel that has not been polled yet.
    #[must_use]
    pub fn new(name: impl Into<String>, gateway: G, states: ConfiguredStates) -> Self {
        let capabilities = Capabilities::from_states(&states);
        Self {
            name: name.into(),
            gateway,
            states,
            capabilities,
            attributes: RwLock::new(Arc::new(PanelAttributes::initial())),
            events: EventBus::new(),
        }
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the gateway.
    #[must_use]
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Returns the configured named states.
    #[must_use]
    pub fn states(&self) -> &ConfiguredStates {
        &self.states
    }

    /// Returns the panel capabilities.
    #[must_use]
    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    /// Returns the attributes published by the last poll.
    #[must_use]
    pub fn attributes(&self) -> Arc<PanelAttributes> {
        Arc::clone(&self.attributes.read())
    }

    /// Returns `true` if the last poll succeeded.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.attributes.read().is_available()
    }

    /// Returns the event bus of this panel.
    #[must_use]
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Arms the zones configured for the given state.
    ///
    /// Nothing is sent if the panel has no usable snapshot or if the state
    /// is not configured; both cases are logged.
    pub async fn arm(&self, target: AlarmState, code: Option<&str>) -> CommandOutcome {
        let command = PanelCommand::Arm(target.clone());

        let outcome = if self.connected_zones().is_none() {
            tracing::warn!(panel = %self.name, "Alarm not connected");
            CommandOutcome::NotConnected
        } else if let Some(named) = self.states.get(&target) {
            self.send(&command, code, named.zones()).await
        } else {
            tracing::error!(
                panel = %self.name,
                state = %target,
                "No {target} state declared for this alarm"
            );
            CommandOutcome::StateNotConfigured(target)
        };

        self.complete(command, outcome)
    }

    /// Arms a custom state by label.
    pub async fn arm_custom(&self, label: &str, code: Option<&str>) -> CommandOutcome {
        self.arm(AlarmState::from(label), code).await
    }

    /// Active zones of the current snapshot, `None` when not connected.
    fn connected_zones(&self) -> Option<ZoneSet> {
        self.attributes.read().active_zones()
    }

    async fn fetch_snapshot(&self) -> Result<RemoteSnapshot> {
        self.gateway.login().await?;
        tracing::debug!(panel = %self.name, "Logged in to Elkron alarm");

        let state = self.gateway.fetch_detailed_state().await?;
        tracing::debug!(state = %state.raw(), "Fetched alarm state");

        let info = self.gateway.fetch_system_info().await?;
        tracing::debug!(info = %info, "Fetched alarm info");

        let structure = self.gateway.fetch_structure().await?;
        tracing::debug!(zones = structure.zones.len(), "Fetched alarm structure");

        Ok(RemoteSnapshot::new(state, info, structure.zones))
    }

    fn apply_snapshot(&self, snapshot: RemoteSnapshot) -> ResolvedState {
        let resolved = resolve(Some(&snapshot), &self.states);
        if resolved.is_unknown() {
            tracing::warn!(panel = %self.name, "Panel state carries no active zone list");
        }

        let next = Arc::new(PanelAttributes::polled(resolved.clone(), snapshot));
        let previous = std::mem::replace(&mut *self.attributes.write(), next);

        if !previous.is_available() {
            self.events
                .publish(PanelEvent::availability(&self.name, true, None));
        }
        if previous.state() != &resolved {
            tracing::info!(
                panel = %self.name,
                from = %previous.state(),
                to = %resolved,
                "Alarm state changed"
            );
            self.events.publish(PanelEvent::state_changed(
                &self.name,
                previous.state().clone(),
                resolved.clone(),
            ));
        }

        tracing::debug!(panel = %self.name, state = %resolved, "Elkron alarm state update complete");
        resolved
    }

    fn mark_unavailable(&self, error: &Error) {
        tracing::warn!(panel = %self.name, error = %error, "Failed to update alarm state");

        let was_available = {
            let mut attributes = self.attributes.write();
            let was_available = attributes.is_available();
            *attributes = Arc::new(attributes.unavailable());
            was_available
        };

        if was_available {
            self.events.publish(PanelEvent::availability(
                &self.name,
                false,
                Some(error.to_string()),
            ));
        }
        self.events
            .publish(PanelEvent::poll_failed(&self.name, error.to_string()));
    }

    async fn send(&self, command: &PanelCommand, code: Option<&str>, zones: &ZoneSet) -> CommandOutcome {
        let result = match command {
            PanelCommand::Disarm => self.gateway.deactivate(code, zones).await,
            PanelCommand::Arm(_) => self.gateway.activate(code, zones).await,
        };

        match result {
            Ok(()) => {
                tracing::info!(panel = %self.name, command = %command, zones = %zones, "Command sent");
                CommandOutcome::Sent
            }
            Err(e) => {
                tracing::warn!(panel = %self.name, command = %command, error = %e, "Failed to {command} alarm");
                CommandOutcome::Failed(e.to_string())
            }
        }
    }

    fn complete(&self, command: PanelCommand, outcome: CommandOutcome) -> CommandOutcome {
        self.events.publish(PanelEvent::command_completed(
            &self.name,
            command,
            outcome.clone(),
        ));
        outcome
    }
}

impl<G: Gateway> AlarmControl for AlarmPanel<G> {
    async fn update(&self) -> Result<ResolvedState> {
        tracing::debug!(panel = %self.name, "Updating Elkron alarm state");

        match self.fetch_snapshot().await {
            Ok(snapshot) => Ok(self.apply_snapshot(snapshot)),
            Err(e) => {
                self.mark_unavailable(&e);
                Err(e)
            }
        }
    }

    fn alarm_state(&self) -> ResolvedState {
        self.attributes.read().state().clone()
    }

    async fn disarm(&self, code: Option<&str>) -> CommandOutcome {
        let command = PanelCommand::Disarm;

        let outcome = match self.connected_zones() {
            Some(active) => self.send(&command, code, &active).await,
            None => {
                tracing::warn!(panel = %self.name, "Alarm not connected");
                CommandOutcome::NotConnected
            }
        };

        self.complete(command, outcome)
    }

    async fn arm_home(&self, code: Option<&str>) -> CommandOutcome {
        self.arm(AlarmState::ArmedHome, code).await
    }

    async fn arm_away(&self, code: Option<&str>) -> CommandOutcome {
        self.arm(AlarmState::ArmedAway, code).await
    }
}
