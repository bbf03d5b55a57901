// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Panel adapter tests against an in-memory gateway.

use std::sync::Arc;
use std::time::Duration;

use elkron_lib::error::{Error, ProtocolError};
use elkron_lib::panel::{AlarmControl, AlarmPanel, CommandOutcome, PanelCommand, spawn_poller};
use elkron_lib::protocol::Gateway;
use elkron_lib::response::{DetailedState, PlantStructure, ZoneEntry};
use elkron_lib::state::{ConfiguredStates, NamedState, ResolvedState};
use elkron_lib::types::{AlarmState, ZoneId, ZoneSet};
use elkron_lib::PanelEvent;
use parking_lot::Mutex;
use serde_json::{Value, json};

// ============================================================================
// Fake gateway
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Login,
    Activate(Option<String>, Vec<ZoneId>),
    Deactivate(Option<String>, Vec<ZoneId>),
}

#[derive(Debug)]
struct FakeGateway {
    state: Mutex<Value>,
    reachable: Mutex<bool>,
    commands_fail: Mutex<bool>,
    calls: Mutex<Vec<Call>>,
}

impl FakeGateway {
    fn with_active(zones: &[ZoneId]) -> Self {
        Self {
            state: Mutex::new(json!({ "activezone": zones })),
            reachable: Mutex::new(true),
            commands_fail: Mutex::new(false),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn set_active(&self, zones: &[ZoneId]) {
        *self.state.lock() = json!({ "activezone": zones });
    }

    fn set_state(&self, state: Value) {
        *self.state.lock() = state;
    }

    fn set_reachable(&self, reachable: bool) {
        *self.reachable.lock() = reachable;
    }

    fn fail_commands(&self) {
        *self.commands_fail.lock() = true;
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    fn commands(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| *call != Call::Login)
            .collect()
    }

    fn logins(&self) -> usize {
        self.calls().iter().filter(|call| **call == Call::Login).count()
    }

    fn command(&self, call: Call) -> Result<(), Error> {
        self.calls.lock().push(call);
        if *self.commands_fail.lock() {
            return Err(ProtocolError::ConnectionFailed("HTTP 500 - Internal Server Error".into()).into());
        }
        Ok(())
    }
}

impl Gateway for FakeGateway {
    async fn login(&self) -> Result<(), Error> {
        self.calls.lock().push(Call::Login);
        if *self.reachable.lock() {
            Ok(())
        } else {
            Err(ProtocolError::ConnectionFailed("panel unreachable".into()).into())
        }
    }

    async fn fetch_detailed_state(&self) -> Result<DetailedState, Error> {
        Ok(DetailedState::new(self.state.lock().clone()))
    }

    async fn fetch_system_info(&self) -> Result<Value, Error> {
        Ok(json!({"model": "MP3000", "fw": "2.1"}))
    }

    async fn fetch_structure(&self) -> Result<PlantStructure, Error> {
        Ok(PlantStructure {
            zones: vec![
                ZoneEntry {
                    name: "Perimeter".to_string(),
                    zone_id: 1,
                },
                ZoneEntry {
                    name: "Garage".to_string(),
                    zone_id: 2,
                },
            ],
        })
    }

    async fn activate(&self, code: Option<&str>, zones: &ZoneSet) -> Result<(), Error> {
        self.command(Call::Activate(code.map(str::to_string), zones.as_slice().to_vec()))
    }

    async fn deactivate(&self, code: Option<&str>, zones: &ZoneSet) -> Result<(), Error> {
        self.command(Call::Deactivate(code.map(str::to_string), zones.as_slice().to_vec()))
    }
}

fn away_home() -> ConfiguredStates {
    ConfiguredStates::new(vec![
        NamedState::new(AlarmState::ArmedAway, ZoneSet::new([1, 2, 3])),
        NamedState::new(AlarmState::ArmedHome, ZoneSet::new([1])),
    ])
}

fn panel(active: &[ZoneId], states: ConfiguredStates) -> AlarmPanel<FakeGateway> {
    AlarmPanel::new("Home", FakeGateway::with_active(active), states)
}

// ============================================================================
// State resolution
// ============================================================================

mod resolution {
    use super::*;

    #[tokio::test]
    async fn never_polled_is_unknown() {
        let panel = panel(&[1], away_home());
        assert!(panel.alarm_state().is_unknown());
        assert!(!panel.is_available());
    }

    #[tokio::test]
    async fn scenario_across_polls() {
        let panel = panel(&[], away_home());
        let cases: [(&[ZoneId], AlarmState); 5] = [
            (&[1], AlarmState::ArmedHome),
            (&[1, 2, 3], AlarmState::ArmedAway),
            (&[], AlarmState::Disarmed),
            (&[2], AlarmState::ArmedCustomBypass),
            (&[3, 2, 1], AlarmState::ArmedAway),
        ];

        for (active, expected) in cases {
            panel.gateway().set_active(active);
            let resolved = panel.update().await.unwrap();
            assert_eq!(resolved, ResolvedState::State(expected.clone()), "active {active:?}");
            assert_eq!(panel.alarm_state(), ResolvedState::State(expected));
        }
    }

    #[tokio::test]
    async fn disarmed_without_any_configuration() {
        let panel = panel(&[], ConfiguredStates::default());
        assert_eq!(
            panel.update().await.unwrap(),
            ResolvedState::State(AlarmState::Disarmed)
        );
    }

    #[tokio::test]
    async fn missing_active_zones_is_unknown() {
        let panel = panel(&[], away_home());
        panel.gateway().set_state(json!({"alarm": false}));

        let resolved = panel.update().await.unwrap();

        assert!(resolved.is_unknown());
        assert!(panel.is_available());
        assert!(panel.attributes().snapshot().is_some());
    }

    #[tokio::test]
    async fn attributes_expose_raw_snapshot() {
        let panel = panel(&[1], away_home());
        panel.update().await.unwrap();

        let attributes = panel.attributes();
        let extra = attributes.extra_state_attributes().unwrap();
        assert_eq!(extra["state"], json!({"activezone": [1]}));
        assert_eq!(extra["info"]["model"], "MP3000");
        assert_eq!(extra["structure"][1], json!({"name": "Garage", "zoneId": 2}));
        assert_eq!(attributes.snapshot().unwrap().zone_name(1), Some("Perimeter"));
    }

    #[tokio::test]
    async fn update_logs_in_every_poll() {
        let panel = panel(&[1], away_home());
        panel.update().await.unwrap();
        panel.update().await.unwrap();
        assert_eq!(panel.gateway().logins(), 2);
    }
}

// ============================================================================
// Poll failures
// ============================================================================

mod poll_failure {
    use super::*;

    #[tokio::test]
    async fn failure_is_returned_and_flags_unavailable() {
        let panel = panel(&[1], away_home());
        panel.update().await.unwrap();

        panel.gateway().set_reachable(false);
        let result = panel.update().await;

        assert!(matches!(
            result,
            Err(Error::Protocol(ProtocolError::ConnectionFailed(_)))
        ));
        assert!(!panel.is_available());
        // Stale snapshot and state are kept.
        assert_eq!(panel.alarm_state(), ResolvedState::State(AlarmState::ArmedHome));
        assert!(panel.attributes().snapshot().is_some());
    }

    #[tokio::test]
    async fn failure_emits_events() {
        let panel = panel(&[1], away_home());
        panel.update().await.unwrap();
        let mut rx = panel.events().subscribe();

        panel.gateway().set_reachable(false);
        let _ = panel.update().await;

        let first = rx.try_recv().unwrap();
        assert!(matches!(
            first,
            PanelEvent::AvailabilityChanged { available: false, .. }
        ));
        let second = rx.try_recv().unwrap();
        assert!(matches!(second, PanelEvent::PollFailed { .. }));
    }

    #[tokio::test]
    async fn failure_before_first_poll_stays_unknown() {
        let panel = panel(&[1], away_home());
        let mut rx = panel.events().subscribe();
        panel.gateway().set_reachable(false);

        assert!(panel.update().await.is_err());
        assert!(panel.alarm_state().is_unknown());
        assert!(matches!(rx.try_recv().unwrap(), PanelEvent::PollFailed { .. }));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn recovery_restores_availability() {
        let panel = panel(&[1], away_home());
        panel.gateway().set_reachable(false);
        let _ = panel.update().await;

        panel.gateway().set_reachable(true);
        panel.update().await.unwrap();
        assert!(panel.is_available());
    }
}

// ============================================================================
// Commands
// ============================================================================

mod commands {
    use super::*;

    #[tokio::test]
    async fn commands_before_first_poll_are_skipped() {
        let panel = panel(&[1], away_home());

        assert_eq!(panel.disarm(Some("1234")).await, CommandOutcome::NotConnected);
        assert_eq!(panel.arm_home(Some("1234")).await, CommandOutcome::NotConnected);
        assert_eq!(panel.arm_away(Some("1234")).await, CommandOutcome::NotConnected);
        assert!(panel.gateway().calls().is_empty());
    }

    #[tokio::test]
    async fn commands_with_malformed_snapshot_are_skipped() {
        let panel = panel(&[], away_home());
        panel.gateway().set_state(json!({"activezone": null}));
        panel.update().await.unwrap();

        assert_eq!(panel.disarm(None).await, CommandOutcome::NotConnected);
        assert!(panel.gateway().commands().is_empty());
    }

    #[tokio::test]
    async fn disarm_sends_active_zones() {
        let panel = panel(&[3, 1], away_home());
        panel.update().await.unwrap();

        assert_eq!(panel.disarm(Some("1234")).await, CommandOutcome::Sent);
        assert_eq!(
            panel.gateway().commands(),
            vec![Call::Deactivate(Some("1234".to_string()), vec![1, 3])]
        );
    }

    #[tokio::test]
    async fn arm_sends_configured_zones() {
        let panel = panel(&[], away_home());
        panel.update().await.unwrap();

        assert!(panel.arm_away(Some("0000")).await.is_sent());
        assert!(panel.arm_home(None).await.is_sent());
        assert_eq!(
            panel.gateway().commands(),
            vec![
                Call::Activate(Some("0000".to_string()), vec![1, 2, 3]),
                Call::Activate(None, vec![1]),
            ]
        );
    }

    #[tokio::test]
    async fn arm_unconfigured_state_issues_no_call() {
        let states = ConfiguredStates::new(vec![NamedState::new(
            AlarmState::ArmedAway,
            ZoneSet::new([1, 2]),
        )]);
        let panel = panel(&[], states);
        panel.update().await.unwrap();

        let outcome = panel.arm_home(Some("1234")).await;

        assert_eq!(
            outcome,
            CommandOutcome::StateNotConfigured(AlarmState::ArmedHome)
        );
        assert!(panel.gateway().commands().is_empty());
        assert!(!panel.capabilities().supports_arm_home());
    }

    #[tokio::test]
    async fn arm_custom_state_by_label() {
        let night = AlarmState::Custom("night".to_string());
        let states = ConfiguredStates::new(vec![NamedState::new(night, ZoneSet::new([4, 2]))]);
        let panel = panel(&[], states);
        panel.update().await.unwrap();

        assert!(panel.arm_custom("night", None).await.is_sent());
        assert_eq!(panel.gateway().commands(), vec![Call::Activate(None, vec![2, 4])]);
        assert!(matches!(
            panel.arm_custom("vacation", None).await,
            CommandOutcome::StateNotConfigured(_)
        ));
    }

    #[tokio::test]
    async fn gateway_failure_is_reported_not_raised() {
        let panel = panel(&[1], away_home());
        panel.update().await.unwrap();
        panel.gateway().fail_commands();

        let outcome = panel.arm_away(Some("1234")).await;

        assert!(matches!(outcome, CommandOutcome::Failed(ref msg) if msg.contains("500")));
        assert!(matches!(panel.disarm(None).await, CommandOutcome::Failed(_)));
        // No optimistic state change.
        assert_eq!(panel.alarm_state(), ResolvedState::State(AlarmState::ArmedHome));
    }

    #[tokio::test]
    async fn command_completion_is_published() {
        let panel = panel(&[1], away_home());
        panel.update().await.unwrap();
        let mut rx = panel.events().subscribe();

        panel.disarm(None).await;

        match rx.try_recv().unwrap() {
            PanelEvent::CommandCompleted {
                command, outcome, ..
            } => {
                assert_eq!(command, PanelCommand::Disarm);
                assert_eq!(outcome, CommandOutcome::Sent);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
}

// ============================================================================
// Events and polling
// ============================================================================

mod events {
    use super::*;

    #[tokio::test]
    async fn first_poll_emits_availability_and_state() {
        let panel = panel(&[1], away_home());
        let mut rx = panel.events().subscribe();

        panel.update().await.unwrap();

        assert!(matches!(
            rx.try_recv().unwrap(),
            PanelEvent::AvailabilityChanged { available: true, .. }
        ));
        match rx.try_recv().unwrap() {
            PanelEvent::StateChanged {
                previous, current, ..
            } => {
                assert_eq!(previous, ResolvedState::Unknown);
                assert_eq!(current, ResolvedState::State(AlarmState::ArmedHome));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn unchanged_state_emits_nothing() {
        let panel = panel(&[1], away_home());
        panel.update().await.unwrap();
        let mut rx = panel.events().subscribe();

        panel.update().await.unwrap();

        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn poller_updates_until_stopped() {
        let panel = Arc::new(panel(&[1], away_home()));
        let handle = spawn_poller(Arc::clone(&panel), Duration::from_secs(10));

        tokio::time::sleep(Duration::from_secs(25)).await;
        let polls = panel.gateway().logins();
        assert!(polls >= 2, "expected at least two polls, got {polls}");
        assert_eq!(panel.alarm_state(), ResolvedState::State(AlarmState::ArmedHome));

        handle.stop();
        tokio::time::sleep(Duration::from_secs(1)).await;
        let after_stop = panel.gateway().logins();
        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(panel.gateway().logins(), after_stop);
    }

    #[tokio::test(start_paused = true)]
    async fn poller_survives_failures() {
        let panel = Arc::new(panel(&[1], away_home()));
        panel.gateway().set_reachable(false);
        let handle = spawn_poller(Arc::clone(&panel), Duration::from_secs(5));

        tokio::time::sleep(Duration::from_secs(12)).await;
        assert!(!panel.is_available());

        panel.gateway().set_reachable(true);
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(panel.is_available());
        assert!(!handle.is_finished());
        handle.stop();
    }
}
