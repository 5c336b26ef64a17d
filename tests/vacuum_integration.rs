// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests driving the vacuum entity through a recording client.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;

use prosenic_vacuum::error::ProtocolError;
use prosenic_vacuum::platform::{DEFAULT_SCAN_INTERVAL, VacuumRegistry, setup_platform};
use prosenic_vacuum::protocol::Protocol;
use prosenic_vacuum::telemetry::Dps;
use prosenic_vacuum::{
    CleaningMode, ConfigError, CurrentState, Entity, Error, FanSpeed, Fault, Field,
    PlatformConfig, REMEMBER_FAN_SPEED_DELAY, StateChange, Vacuum, VacuumActivity, VacuumEntity,
    VacuumEvent, VacuumState,
};

// ============================================================================
// Recording client
// ============================================================================

#[derive(Default)]
struct MockProtocol {
    status: Mutex<Option<Dps>>,
    status_calls: AtomicUsize,
    writes: Mutex<Vec<(Field, Value)>>,
    fail_writes: AtomicBool,
}

impl MockProtocol {
    fn reporting(report: Value) -> Self {
        let mock = Self::default();
        mock.report(report);
        mock
    }

    fn report(&self, report: Value) {
        *self.status.lock() = report.as_object().cloned();
    }

    fn go_offline(&self) {
        *self.status.lock() = None;
    }

    fn writes(&self) -> Vec<(Field, Value)> {
        self.writes.lock().clone()
    }
}

impl Protocol for MockProtocol {
    async fn status(&self) -> Result<Dps, ProtocolError> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        self.status
            .lock()
            .clone()
            .ok_or_else(|| ProtocolError::ConnectionFailed("no route to host".to_string()))
    }

    async fn set_value(&self, field: Field, value: Value) -> Result<(), ProtocolError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(ProtocolError::Timeout(5000));
        }
        self.writes.lock().push((field, value));
        Ok(())
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn write(field: Field, value: &str) -> (Field, Value) {
    (field, Value::from(value))
}

async fn vacuum_with(report: Value, remember_fan_speed: bool) -> Vacuum<MockProtocol> {
    init_tracing();
    let vacuum = Vacuum::new("Test vacuum", MockProtocol::reporting(report), remember_fan_speed);
    vacuum.update().await;
    vacuum
}

// ============================================================================
// State mapping
// ============================================================================

mod state_mapping {
    use super::*;

    #[tokio::test]
    async fn each_field_updates_only_its_attribute() {
        let cases = [
            (json!({"11": 16}), StateChange::Fault(Fault::DUST_BIN)),
            (json!({"27": "ECO"}), StateChange::FanSpeed(FanSpeed::Eco)),
            (
                json!({"38": 4}),
                StateChange::CurrentState(CurrentState::GoingCharging),
            ),
            (json!({"39": 73}), StateChange::Battery(73)),
            (json!({"41": 12}), StateChange::CleanArea(12)),
            (json!({"42": 35}), StateChange::CleanTime(35)),
            (json!({"49": true}), StateChange::MopEquipped(true)),
        ];

        for (report, change) in cases {
            let vacuum = vacuum_with(report.clone(), false).await;

            let mut expected = VacuumState::new();
            expected.apply(&change);
            assert_eq!(vacuum.state(), expected, "report {report}");
        }
    }

    #[tokio::test]
    async fn write_only_and_record_fields_change_nothing() {
        let vacuum = vacuum_with(
            json!({"1": true, "25": "smart", "26": "forward", "40": "0101"}),
            false,
        )
        .await;

        assert_eq!(vacuum.state(), VacuumState::new());
        assert!(vacuum.is_available());
    }

    #[tokio::test]
    async fn fault_forces_error_state() {
        let vacuum = vacuum_with(json!({"11": 2, "38": 1}), false).await;

        assert_eq!(VacuumEntity::activity(&vacuum), Some(VacuumActivity::Error));
        assert_eq!(
            vacuum.extra_state_attributes().get("error"),
            Some(&json!("ROLLER_BRUSH"))
        );

        vacuum.protocol().report(json!({"11": 0, "38": 1}));
        vacuum.update().await;

        assert_eq!(
            VacuumEntity::activity(&vacuum),
            Some(VacuumActivity::Cleaning)
        );
        assert!(vacuum.extra_state_attributes().get("error").is_none());
    }

    #[tokio::test]
    async fn activity_table() {
        let expected = [
            (0, VacuumActivity::Idle),
            (1, VacuumActivity::Cleaning),
            (2, VacuumActivity::Mopping),
            (3, VacuumActivity::Cleaning),
            (4, VacuumActivity::Returning),
            (5, VacuumActivity::Docked),
            (6, VacuumActivity::Unknown),
            (7, VacuumActivity::Paused),
            (8, VacuumActivity::Cleaning),
        ];

        for (code, activity) in expected {
            let vacuum = vacuum_with(json!({"38": code}), false).await;
            assert_eq!(
                VacuumEntity::activity(&vacuum),
                Some(activity),
                "code {code}"
            );
        }
    }

    #[tokio::test]
    async fn bad_entries_are_skipped() {
        let vacuum = vacuum_with(
            json!({"7": 1, "27": "turbo", "38": 99, "39": 50, "42": "ten"}),
            false,
        )
        .await;

        let state = vacuum.state();
        assert_eq!(state.battery(), Some(50));
        assert_eq!(state.fan_speed(), FanSpeed::Normal);
        assert_eq!(state.current_state(), None);
        assert!(vacuum.is_available());
    }

    #[tokio::test]
    async fn attributes_and_properties() {
        let vacuum = vacuum_with(
            json!({"27": "strong", "38": 5, "39": 100, "41": 30, "42": 45, "49": false}),
            false,
        )
        .await;

        assert_eq!(vacuum.battery_level(), Some(100));
        assert_eq!(VacuumEntity::fan_speed(&vacuum), "strong");
        assert_eq!(
            Value::Object(vacuum.extra_state_attributes()),
            json!({"cleaned_area": 30, "cleaning_time": 45, "mop_equipped": false})
        );
        assert_eq!(vacuum.supported_features().bits(), 13_436);
    }

    #[tokio::test]
    async fn applied_changes_are_published() {
        let vacuum = Vacuum::new(
            "Kitchen",
            MockProtocol::reporting(json!({"38": 5, "39": 80})),
            false,
        );
        let mut rx = vacuum.subscribe();

        vacuum.update().await;

        let first = rx.try_recv().unwrap();
        assert!(matches!(
            first,
            VacuumEvent::StateChanged {
                change: StateChange::CurrentState(CurrentState::Charging),
                activity: Some(VacuumActivity::Docked),
                ..
            }
        ));
        assert!(matches!(
            rx.try_recv().unwrap(),
            VacuumEvent::StateChanged {
                change: StateChange::Battery(80),
                ..
            }
        ));
        assert!(matches!(
            rx.try_recv().unwrap(),
            VacuumEvent::AvailabilityChanged {
                available: true,
                ..
            }
        ));

        // Same report again: nothing changed, nothing published.
        vacuum.update().await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn every_subscriber_sees_each_event() {
        let vacuum = Vacuum::new("Kitchen", MockProtocol::reporting(json!({"39": 64})), false);
        assert_eq!(vacuum.subscriber_count(), 0);

        let mut first = vacuum.subscribe();
        let mut second = vacuum.subscribe();
        assert_eq!(vacuum.subscriber_count(), 2);

        vacuum.update().await;

        for rx in [&mut first, &mut second] {
            assert!(matches!(
                rx.try_recv().unwrap(),
                VacuumEvent::StateChanged {
                    change: StateChange::Battery(64),
                    ..
                }
            ));
            assert!(rx.try_recv().unwrap().is_availability());
            assert!(rx.try_recv().is_err());
        }

        drop(second);
        assert_eq!(vacuum.subscriber_count(), 1);
    }

    #[tokio::test]
    async fn update_without_subscribers_still_applies() {
        let vacuum = Vacuum::new("Kitchen", MockProtocol::reporting(json!({"39": 64})), false);
        drop(vacuum.subscribe());

        vacuum.update().await;
        assert!(vacuum.is_available());
        assert_eq!(vacuum.state().battery(), Some(64));
    }
}

// ============================================================================
// Commands
// ============================================================================

mod commands {
    use super::*;

    #[tokio::test]
    async fn cleaning_mode_sets_last_command_and_others_clear_it() {
        let vacuum = vacuum_with(json!({"38": 0}), false).await;

        vacuum.clean_spot().await;
        assert_eq!(vacuum.last_command(), Some(CleaningMode::Spiral));

        vacuum.stop().await;
        assert_eq!(vacuum.last_command(), None);

        vacuum.return_to_base().await;
        assert_eq!(vacuum.last_command(), Some(CleaningMode::ChargeGo));

        vacuum.set_fan_speed("ECO").await;
        assert_eq!(vacuum.last_command(), None);

        vacuum.start().await;
        assert_eq!(vacuum.last_command(), Some(CleaningMode::Smart));

        vacuum.remote_control("forward").await;
        assert_eq!(vacuum.last_command(), None);
    }

    #[tokio::test]
    async fn start_defaults_to_smart() {
        let vacuum = vacuum_with(json!({"38": 0}), false).await;

        vacuum.start().await;

        assert_eq!(
            vacuum.protocol().writes(),
            vec![write(Field::CleaningMode, "smart")]
        );
    }

    #[tokio::test]
    async fn start_mops_when_mop_is_fitted() {
        let vacuum = vacuum_with(json!({"38": 0, "49": true}), false).await;

        vacuum.start().await;

        assert_eq!(
            vacuum.protocol().writes(),
            vec![write(Field::CleaningMode, "mop")]
        );
    }

    #[tokio::test]
    async fn start_resumes_after_pause() {
        let vacuum = vacuum_with(json!({"38": 3}), false).await;

        vacuum.protocol().report(json!({"38": 1}));
        vacuum.update().await;
        vacuum.clean_spot().await;

        vacuum.pause().await;
        vacuum.protocol().report(json!({"38": 7}));
        vacuum.update().await;

        vacuum.start().await;

        assert_eq!(
            vacuum.protocol().writes(),
            vec![
                write(Field::CleaningMode, "sprial"),
                write(Field::CleaningMode, "sprial"),
                write(Field::CleaningMode, "sprial"),
            ]
        );
    }

    #[tokio::test]
    async fn start_without_pause_ignores_last_command() {
        let vacuum = vacuum_with(json!({"38": 1}), false).await;

        vacuum.return_to_base().await;
        vacuum.start().await;

        assert_eq!(
            vacuum.protocol().writes(),
            vec![
                write(Field::CleaningMode, "chargego"),
                write(Field::CleaningMode, "smart"),
            ]
        );
    }

    #[tokio::test]
    async fn pause_does_nothing_when_paused_or_without_command() {
        let vacuum = vacuum_with(json!({"38": 1}), false).await;
        vacuum.pause().await;
        assert!(vacuum.protocol().writes().is_empty());

        let vacuum = vacuum_with(json!({"38": 7}), false).await;
        vacuum.clean_spot().await;
        vacuum.pause().await;
        assert_eq!(
            vacuum.protocol().writes(),
            vec![write(Field::CleaningMode, "sprial")]
        );
    }

    #[tokio::test]
    async fn set_fan_speed_sends_and_stores() {
        let vacuum = vacuum_with(json!({}), false).await;

        vacuum.set_fan_speed("strong").await;

        assert_eq!(
            vacuum.protocol().writes(),
            vec![write(Field::FanSpeed, "strong")]
        );
        assert_eq!(vacuum.stored_fan_speed(), FanSpeed::Strong);
    }

    #[tokio::test]
    async fn unknown_fan_speed_is_rejected() {
        let vacuum = vacuum_with(json!({"38": 7}), false).await;
        vacuum.clean_spot().await;

        for speed in ["turbo", "eco", "Normal", ""] {
            vacuum.set_fan_speed(speed).await;
        }

        assert_eq!(vacuum.protocol().writes().len(), 1);
        assert_eq!(vacuum.stored_fan_speed(), FanSpeed::Normal);
        assert_eq!(vacuum.last_command(), Some(CleaningMode::Spiral));
    }

    #[tokio::test]
    async fn remote_control_accepts_wire_values_and_names() {
        let vacuum = vacuum_with(json!({}), false).await;

        vacuum.remote_control("backward").await;
        vacuum.remote_control("TURN_LEFT").await;
        vacuum.remote_control("TurnRight").await;

        assert_eq!(
            vacuum.protocol().writes(),
            vec![
                write(Field::DirectionControl, "backward"),
                write(Field::DirectionControl, "turnleft"),
                write(Field::DirectionControl, "turnright"),
            ]
        );
    }

    #[tokio::test]
    async fn unknown_direction_is_rejected() {
        let vacuum = vacuum_with(json!({}), false).await;
        vacuum.return_to_base().await;

        vacuum.remote_control("up").await;

        assert_eq!(vacuum.protocol().writes().len(), 1);
        assert_eq!(vacuum.last_command(), Some(CleaningMode::ChargeGo));
    }

    #[tokio::test]
    async fn failed_write_is_swallowed() {
        let vacuum = vacuum_with(json!({}), false).await;
        vacuum
            .protocol()
            .fail_writes
            .store(true, Ordering::SeqCst);

        vacuum.start().await;

        assert!(vacuum.protocol().writes().is_empty());
        assert_eq!(vacuum.last_command(), Some(CleaningMode::Smart));
    }
}

// ============================================================================
// Fan speed restoration
// ============================================================================

mod restoration {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn stored_speed_is_resent_after_delay() {
        let vacuum = vacuum_with(json!({}), true).await;

        vacuum.set_fan_speed("ECO").await;
        vacuum.clean_spot().await;
        assert_eq!(vacuum.pending_restorations(), 2);

        tokio::time::sleep(REMEMBER_FAN_SPEED_DELAY - Duration::from_secs(1)).await;
        assert_eq!(vacuum.protocol().writes().len(), 2);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(
            vacuum.protocol().writes(),
            vec![
                write(Field::FanSpeed, "ECO"),
                write(Field::CleaningMode, "sprial"),
                write(Field::FanSpeed, "ECO"),
                write(Field::FanSpeed, "ECO"),
            ]
        );
        assert_eq!(vacuum.pending_restorations(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn restoration_keeps_last_command() {
        let vacuum = vacuum_with(json!({"38": 7}), true).await;

        vacuum.clean_spot().await;
        tokio::time::sleep(Duration::from_secs(7)).await;

        assert_eq!(vacuum.last_command(), Some(CleaningMode::Spiral));
        assert_eq!(vacuum.protocol().writes().len(), 2);
        assert_eq!(vacuum.pending_restorations(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn command_returns_before_restoration() {
        let vacuum = vacuum_with(json!({}), true).await;
        let started = tokio::time::Instant::now();

        vacuum.stop().await;

        assert!(started.elapsed() < REMEMBER_FAN_SPEED_DELAY);
        assert_eq!(vacuum.protocol().writes().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn disabled_restoration_sends_nothing_extra() {
        let vacuum = vacuum_with(json!({}), false).await;

        vacuum.stop().await;
        tokio::time::sleep(Duration::from_secs(30)).await;

        assert_eq!(
            vacuum.protocol().writes(),
            vec![write(Field::DirectionControl, "stop")]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn failed_command_schedules_nothing() {
        let vacuum = vacuum_with(json!({}), true).await;
        vacuum
            .protocol()
            .fail_writes
            .store(true, Ordering::SeqCst);

        vacuum.stop().await;

        assert_eq!(vacuum.pending_restorations(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_aborts_pending_restorations() {
        let vacuum = vacuum_with(json!({}), true).await;

        vacuum.stop().await;
        vacuum.shutdown();
        tokio::time::sleep(Duration::from_secs(30)).await;

        assert_eq!(vacuum.protocol().writes().len(), 1);
    }
}

// ============================================================================
// Availability and polling
// ============================================================================

mod availability {
    use super::*;

    #[tokio::test]
    async fn failed_fetch_marks_unavailable_and_recovers() {
        let vacuum = vacuum_with(json!({"39": 90}), false).await;
        assert!(vacuum.available());

        let mut rx = vacuum.subscribe();
        vacuum.protocol().go_offline();
        vacuum.update().await;

        assert!(!vacuum.available());
        assert_eq!(vacuum.battery_level(), Some(90));
        assert!(matches!(
            rx.try_recv().unwrap(),
            VacuumEvent::AvailabilityChanged {
                available: false,
                ..
            }
        ));

        vacuum.protocol().report(json!({"39": 90}));
        vacuum.update().await;

        assert!(vacuum.available());
        assert!(matches!(
            rx.try_recv().unwrap(),
            VacuumEvent::AvailabilityChanged {
                available: true,
                ..
            }
        ));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn polling_loop_updates_until_shutdown() {
        let vacuum = Arc::new(Vacuum::new(
            "Poller",
            MockProtocol::reporting(json!({"39": 10})),
            false,
        ));

        vacuum.start_polling(DEFAULT_SCAN_INTERVAL);
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(vacuum.protocol().status_calls.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_secs(40)).await;
        assert_eq!(vacuum.protocol().status_calls.load(Ordering::SeqCst), 2);
        assert_eq!(vacuum.battery_level(), Some(10));

        vacuum.shutdown();
        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(vacuum.protocol().status_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_interval_is_rejected() {
        let vacuum = Arc::new(Vacuum::new(
            "Poller",
            MockProtocol::reporting(json!({"39": 10})),
            false,
        ));

        vacuum.start_polling(Duration::ZERO);
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(!vacuum.is_polling());
        assert_eq!(vacuum.protocol().status_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_interval_keeps_running_loop() {
        let vacuum = Arc::new(Vacuum::new(
            "Poller",
            MockProtocol::reporting(json!({"39": 10})),
            false,
        ));

        vacuum.start_polling(DEFAULT_SCAN_INTERVAL);
        vacuum.start_polling(Duration::ZERO);

        tokio::time::sleep(Duration::from_secs(21)).await;
        assert!(vacuum.is_polling());
        assert_eq!(vacuum.protocol().status_calls.load(Ordering::SeqCst), 1);

        vacuum.shutdown();
        assert!(!vacuum.is_polling());
    }
}

// ============================================================================
// Platform setup
// ============================================================================

mod platform {
    use super::*;

    fn config() -> PlatformConfig {
        PlatformConfig::new("192.168.1.60", "bf1234567890abcdef", "0123456789abcdef")
    }

    #[tokio::test]
    async fn setup_registers_and_updates_before_returning() {
        let registry = VacuumRegistry::new();
        let config = config().with_name("Upstairs").with_remember_fan_speed(true);

        let vacuum = setup_platform(&config, &registry, |_| {
            MockProtocol::reporting(json!({"38": 5, "39": 100}))
        })
        .await
        .unwrap();

        assert_eq!(Entity::name(&*vacuum), "Upstairs");
        assert!(vacuum.remembers_fan_speed());
        assert!(vacuum.available());
        assert_eq!(VacuumEntity::activity(&*vacuum), Some(VacuumActivity::Docked));
        assert!(Arc::ptr_eq(
            &registry.get("192.168.1.60").await.unwrap(),
            &vacuum
        ));
    }

    #[tokio::test]
    async fn setup_with_unreachable_device_still_registers() {
        let registry = VacuumRegistry::new();

        let vacuum = setup_platform(&config(), &registry, |_| MockProtocol::default())
            .await
            .unwrap();

        assert!(!vacuum.available());
        assert_eq!(Entity::name(&*vacuum), "Prosenic Vacuum cleaner");
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn invalid_config_registers_nothing() {
        let registry: VacuumRegistry<MockProtocol> = VacuumRegistry::new();
        let connector_called = AtomicBool::new(false);

        let mut short_key = config();
        short_key.local_key = "tooshort".to_string();
        let result = setup_platform(&short_key, &registry, |_| {
            connector_called.store(true, Ordering::SeqCst);
            MockProtocol::default()
        })
        .await;
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidLocalKeyLength(8)))
        ));

        let bad_version = config().with_protocol_version("2.0");
        let result = setup_platform(&bad_version, &registry, |_| MockProtocol::default()).await;
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::UnsupportedVersion(_)))
        ));

        assert!(!connector_called.load(Ordering::SeqCst));
        assert!(registry.is_empty().await);
    }

    #[tokio::test]
    async fn connector_receives_config() {
        let registry = VacuumRegistry::new();
        let config = config().with_protocol_version("3.4");

        setup_platform(&config, &registry, |config| {
            assert_eq!(config.device_id, "bf1234567890abcdef");
            assert_eq!(config.protocol_version, "3.4");
            MockProtocol::default()
        })
        .await
        .unwrap();
    }
}
