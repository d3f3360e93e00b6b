//! End-to-end session scenarios.

use std::time::Duration;
use vigil::sync::{FeedEvent, VitalsPushPayload};
use vigil::widgets::NoticeKind;
use vigil::{
    BackendConfig, Dashboard, DashboardConfig, HostCommand, ManualForm, Mode, SessionEvent,
    VitalField, VitalStatus,
};

fn backend_config() -> DashboardConfig {
    DashboardConfig {
        backend: Some(BackendConfig {
            base_url: "http://localhost:5000".to_string(),
            feed_url: None,
            reconnect_attempts: 5,
        }),
        ..DashboardConfig::default()
    }
}

fn at(seconds: u64) -> Duration {
    Duration::from_secs(seconds)
}

fn push(payload: VitalsPushPayload) -> SessionEvent {
    SessionEvent::Feed(FeedEvent::VitalsUpdate(payload))
}

#[test]
fn manual_round_trip_has_no_clamping() {
    let mut dashboard = Dashboard::new(&DashboardConfig::default());
    dashboard.handle(
        SessionEvent::ManualVital {
            field: VitalField::HeartRate,
            raw: "85".to_string(),
        },
        at(0),
    );
    assert_eq!(dashboard.record().heart_rate, 85.0);

    // 190 sits far outside the simulator's clamp band; the manual
    // path still commits it exactly as typed.

    dashboard.handle(
        SessionEvent::ManualVital {
            field: VitalField::HeartRate,
            raw: "190".to_string(),
        },
        at(1),
    );
    assert_eq!(dashboard.record().heart_rate, 190.0);
}

#[test]
fn rejected_manual_edit_leaves_snapshot_and_flags_field() {
    let mut dashboard = Dashboard::new(&DashboardConfig::default());
    let before = *dashboard.record();
    let revision = dashboard.revision();

    dashboard.handle(
        SessionEvent::ManualVital {
            field: VitalField::Spo2,
            raw: "55".to_string(),
        },
        at(0),
    );

    assert_eq!(*dashboard.record(), before);
    assert_eq!(dashboard.revision(), revision);
    assert!(dashboard.is_flagged(VitalField::Spo2, at(0)));
    // The flag auto-clears after its fixed window.
    assert!(!dashboard.is_flagged(VitalField::Spo2, at(3)));
    // Single-field rejection emits no notification.
    assert!(dashboard.notice(at(0)).is_none());
}

#[test]
fn bulk_manual_is_all_or_nothing() {
    let mut dashboard = Dashboard::new(&DashboardConfig::default());
    let before = *dashboard.record();

    // Four valid fields plus one invalid systolic.
    let form = ManualForm {
        heart_rate: "90".to_string(),
        spo2: "95".to_string(),
        temperature: "36.9".to_string(),
        systolic: "205".to_string(),
        diastolic: "82".to_string(),
    };
    dashboard.handle(SessionEvent::ManualAll(form), at(0));

    assert_eq!(*dashboard.record(), before);
    assert!(dashboard.is_flagged(VitalField::Systolic, at(0)));
    let notice = dashboard.notice(at(0)).expect("aggregate failure notice");
    assert_eq!(notice.kind, NoticeKind::Error);
}

#[test]
fn blood_pressure_pair_rejects_together() {
    let mut dashboard = Dashboard::new(&DashboardConfig::default());
    dashboard.handle(
        SessionEvent::ManualBloodPressure {
            systolic: "205".to_string(),
            diastolic: "70".to_string(),
        },
        at(0),
    );
    assert_eq!(dashboard.record().systolic, 120.0);
    assert_eq!(dashboard.record().diastolic, 80.0);
}

#[test]
fn reset_restores_documented_defaults() {
    let mut dashboard = Dashboard::new(&DashboardConfig::default());
    for _ in 0..5 {
        dashboard.handle(SessionEvent::Tick, at(0));
    }
    dashboard.handle(
        SessionEvent::ManualVital {
            field: VitalField::HeartRate,
            raw: "150".to_string(),
        },
        at(1),
    );

    dashboard.handle(SessionEvent::Reset, at(2));
    assert_eq!(dashboard.record().heart_rate, 72.0);
    assert_eq!(dashboard.record().spo2, 96.0);
    assert_eq!(dashboard.record().altitude, 5400.0);
    assert_eq!(dashboard.record().ext_temp, -15.0);
}

#[test]
fn tick_advances_local_mode_only() {
    let mut dashboard = Dashboard::new(&backend_config());

    // Local: a tick mutates the store.
    let before = dashboard.revision();
    dashboard.handle(SessionEvent::Tick, at(0));
    assert!(dashboard.revision() > before);

    // Backend: a stray tick must not produce a simulator write.
    let commands = dashboard.handle(SessionEvent::SetMode(Mode::Backend), at(1));
    assert!(commands.contains(&HostCommand::ConnectFeed));
    assert!(!dashboard.auto_update());

    let frozen = dashboard.revision();
    dashboard.handle(SessionEvent::Tick, at(2));
    dashboard.handle(SessionEvent::Tick, at(5));
    assert_eq!(dashboard.revision(), frozen);

    // Back to local: ticks resume.
    dashboard.handle(SessionEvent::SetMode(Mode::Local), at(6));
    assert!(dashboard.auto_update());
    dashboard.handle(SessionEvent::Tick, at(9));
    assert!(dashboard.revision() > frozen);
}

#[test]
fn mode_transitions_emit_the_contracted_commands() {
    let mut dashboard = Dashboard::new(&backend_config());

    let to_backend = dashboard.handle(SessionEvent::SetMode(Mode::Backend), at(0));
    assert_eq!(to_backend.len(), 2);
    assert_eq!(to_backend[0], HostCommand::ConnectFeed);
    assert!(matches!(to_backend[1], HostCommand::Pull { .. }));
    let notice = dashboard.notice(at(0)).expect("confirmation notice");
    assert_eq!(notice.kind, NoticeKind::Success);

    // Re-entering the current mode is a guarded no-op.
    assert!(dashboard
        .handle(SessionEvent::SetMode(Mode::Backend), at(1))
        .is_empty());

    let to_local = dashboard.handle(SessionEvent::SetMode(Mode::Local), at(2));
    assert_eq!(to_local, vec![HostCommand::DisconnectFeed]);
}

#[test]
fn push_merges_present_fields_only() {
    let mut dashboard = Dashboard::new(&backend_config());
    dashboard.handle(SessionEvent::SetMode(Mode::Backend), at(0));
    dashboard.handle(SessionEvent::Feed(FeedEvent::Connect), at(1));

    let spo2_before = dashboard.record().spo2;
    dashboard.handle(
        push(VitalsPushPayload {
            heart_rate: Some(105.0),
            ..VitalsPushPayload::default()
        }),
        at(3),
    );

    assert_eq!(dashboard.record().heart_rate, 105.0);
    assert_eq!(dashboard.record().spo2, spo2_before);
    assert_eq!(dashboard.overall(), VitalStatus::Warning);
}

#[test]
fn push_retains_latest_model_analysis() {
    use vigil::sync::MlAnalysis;

    let mut dashboard = Dashboard::new(&backend_config());
    dashboard.handle(SessionEvent::SetMode(Mode::Backend), at(0));

    dashboard.handle(
        push(VitalsPushPayload {
            heart_rate: Some(95.0),
            ml_analysis: Some(MlAnalysis {
                health_score: Some(85.0),
                overall_risk_level: Some("low".to_string()),
                ..MlAnalysis::default()
            }),
            ..VitalsPushPayload::default()
        }),
        at(1),
    );

    let analysis = dashboard.analysis().expect("analysis retained");
    assert_eq!(analysis.health_score, Some(85.0));

    // A later payload without analysis keeps the last one.
    dashboard.handle(
        push(VitalsPushPayload {
            heart_rate: Some(96.0),
            ..VitalsPushPayload::default()
        }),
        at(4),
    );
    assert_eq!(
        dashboard.analysis().unwrap().overall_risk_level.as_deref(),
        Some("low")
    );
}

#[test]
fn push_is_ignored_in_local_mode() {
    let mut dashboard = Dashboard::new(&backend_config());
    dashboard.handle(
        push(VitalsPushPayload {
            heart_rate: Some(105.0),
            ..VitalsPushPayload::default()
        }),
        at(0),
    );
    assert_eq!(dashboard.record().heart_rate, 72.0);
}

#[test]
fn out_of_range_push_field_keeps_last_known_good() {
    let mut dashboard = Dashboard::new(&backend_config());
    dashboard.handle(SessionEvent::SetMode(Mode::Backend), at(0));

    dashboard.handle(
        push(VitalsPushPayload {
            heart_rate: Some(250.0),
            spo2: Some(94.0),
            ..VitalsPushPayload::default()
        }),
        at(1),
    );

    assert_eq!(dashboard.record().heart_rate, 72.0);
    assert_eq!(dashboard.record().spo2, 94.0);
}

#[test]
fn stale_pull_after_mode_switch_is_discarded() {
    let mut dashboard = Dashboard::new(&backend_config());
    let commands = dashboard.handle(SessionEvent::SetMode(Mode::Backend), at(0));
    let token = match commands.iter().find(|c| matches!(c, HostCommand::Pull { .. })) {
        Some(HostCommand::Pull { token }) => *token,
        _ => unreachable!("backend transition issues a pull"),
    };

    // The user toggles back before the pull resolves.
    dashboard.handle(SessionEvent::SetMode(Mode::Local), at(1));

    dashboard.handle(
        SessionEvent::PullResolved {
            token,
            result: Ok(VitalsPushPayload {
                heart_rate: Some(140.0),
                ..VitalsPushPayload::default()
            }),
        },
        at(2),
    );
    assert_eq!(dashboard.record().heart_rate, 72.0);

    // Even re-entering backend mode keeps the old token dead.
    dashboard.handle(SessionEvent::SetMode(Mode::Backend), at(3));
    dashboard.handle(
        SessionEvent::PullResolved {
            token,
            result: Ok(VitalsPushPayload {
                heart_rate: Some(140.0),
                ..VitalsPushPayload::default()
            }),
        },
        at(4),
    );
    assert_eq!(dashboard.record().heart_rate, 72.0);
}

#[test]
fn fresh_pull_commits() {
    let mut dashboard = Dashboard::new(&backend_config());
    let commands = dashboard.handle(SessionEvent::SetMode(Mode::Backend), at(0));
    let token = match commands.iter().find(|c| matches!(c, HostCommand::Pull { .. })) {
        Some(HostCommand::Pull { token }) => *token,
        _ => unreachable!(),
    };

    dashboard.handle(
        SessionEvent::PullResolved {
            token,
            result: Ok(VitalsPushPayload {
                heart_rate: Some(95.0),
                ..VitalsPushPayload::default()
            }),
        },
        at(1),
    );
    assert_eq!(dashboard.record().heart_rate, 95.0);
}

#[test]
fn failed_pull_notifies_without_mutation() {
    let mut dashboard = Dashboard::new(&backend_config());
    let commands = dashboard.handle(SessionEvent::SetMode(Mode::Backend), at(0));
    let token = match commands.iter().find(|c| matches!(c, HostCommand::Pull { .. })) {
        Some(HostCommand::Pull { token }) => *token,
        _ => unreachable!(),
    };
    let revision = dashboard.revision();

    dashboard.handle(
        SessionEvent::PullResolved {
            token,
            result: Err("transport error: request timed out".to_string()),
        },
        at(1),
    );
    assert_eq!(dashboard.revision(), revision);
    let notice = dashboard.notice(at(1)).expect("failure notice");
    assert_eq!(notice.kind, NoticeKind::Error);
}

#[test]
fn channel_retries_are_bounded_and_degrade() {
    let mut dashboard = Dashboard::new(&backend_config());
    dashboard.handle(SessionEvent::SetMode(Mode::Backend), at(0));
    dashboard.handle(SessionEvent::Feed(FeedEvent::Connect), at(1));

    let mut retries = 0;
    let mut clock = 2;
    loop {
        let commands = dashboard.handle(SessionEvent::Feed(FeedEvent::Disconnect), at(clock));
        clock += 1;
        match commands.as_slice() {
            [HostCommand::ScheduleRetry { .. }] => {
                retries += 1;
                assert!(retries <= 5, "reconnects must stop after five attempts");
                // The delay elapses and the host reconnects; the next
                // open fails again (unclean close).
                let reconnect = dashboard.handle(SessionEvent::RetryElapsed, at(clock));
                assert_eq!(reconnect, vec![HostCommand::ConnectFeed]);
                clock += 1;
            }
            [] => break,
            other => panic!("unexpected commands: {other:?}"),
        }
    }
    assert_eq!(retries, 5);

    // Exhaustion leaves a degraded BACKEND session, not an automatic
    // fallback to local.
    assert_eq!(dashboard.mode(), Mode::Backend);
    assert!(!dashboard.auto_update());
    let notice = dashboard.notice(at(clock - 1)).expect("degradation notice");
    assert_eq!(notice.kind, NoticeKind::Warning);

    // Manual input still works while degraded.
    dashboard.handle(
        SessionEvent::ManualVital {
            field: VitalField::HeartRate,
            raw: "80".to_string(),
        },
        at(clock),
    );
    assert_eq!(dashboard.record().heart_rate, 80.0);

    // Only the explicit user toggle leaves the degraded state.
    dashboard.handle(SessionEvent::SetMode(Mode::Local), at(clock + 1));
    assert_eq!(dashboard.mode(), Mode::Local);
    assert!(dashboard.auto_update());
}

#[test]
fn chart_appends_on_ticks_and_pushes_but_not_manual_edits() {
    let mut dashboard = Dashboard::new(&backend_config());

    dashboard.handle(SessionEvent::Tick, at(0));
    dashboard.handle(SessionEvent::Tick, at(3));
    let after_ticks = dashboard
        .chart()
        .get(VitalField::HeartRate)
        .unwrap()
        .points
        .len();
    assert_eq!(after_ticks, 2);

    dashboard.handle(
        SessionEvent::ManualVital {
            field: VitalField::HeartRate,
            raw: "85".to_string(),
        },
        at(4),
    );
    assert_eq!(
        dashboard.chart().get(VitalField::HeartRate).unwrap().points.len(),
        after_ticks
    );

    dashboard.handle(SessionEvent::SetMode(Mode::Backend), at(5));
    dashboard.handle(
        push(VitalsPushPayload {
            heart_rate: Some(90.0),
            ..VitalsPushPayload::default()
        }),
        at(6),
    );
    assert_eq!(
        dashboard.chart().get(VitalField::HeartRate).unwrap().points.len(),
        after_ticks + 1
    );
}

#[test]
fn summary_redraws_only_changed_entries() {
    let mut dashboard = Dashboard::new(&DashboardConfig::default());
    let baseline = dashboard.summary().redraws();

    // A manual edit to one field redraws exactly one summary entry.
    dashboard.handle(
        SessionEvent::ManualVital {
            field: VitalField::HeartRate,
            raw: "90".to_string(),
        },
        at(0),
    );
    assert_eq!(dashboard.summary().redraws(), baseline + 1);
}

#[test]
fn submit_builds_sample_from_current_record() {
    let mut dashboard = Dashboard::new(&backend_config());
    dashboard.handle(
        SessionEvent::ManualVital {
            field: VitalField::HeartRate,
            raw: "91".to_string(),
        },
        at(0),
    );

    let commands = dashboard.handle(
        SessionEvent::SubmitVitals {
            timestamp: "2026-02-04T10:30:00".to_string(),
        },
        at(1),
    );
    match commands.as_slice() {
        [HostCommand::Send { sample }] => {
            assert_eq!(sample.soldier_id, "SOL-7842-ALPHA");
            assert_eq!(sample.heart_rate, 91.0);
            assert_eq!(sample.timestamp, "2026-02-04T10:30:00");
        }
        other => panic!("unexpected commands: {other:?}"),
    }

    // A failed send surfaces as an error notice, never a mutation.
    let revision = dashboard.revision();
    dashboard.handle(
        SessionEvent::SendFailed {
            message: "transport error: connection failed: refused".to_string(),
        },
        at(2),
    );
    assert_eq!(dashboard.revision(), revision);
    assert_eq!(dashboard.notice(at(2)).unwrap().kind, NoticeKind::Error);
}

proptest::proptest! {
    #[test]
    fn prop_manual_edits_commit_iff_in_range(value in -50.0f64..300.0) {
        let mut dashboard = Dashboard::new(&DashboardConfig::default());
        dashboard.handle(
            SessionEvent::ManualVital {
                field: VitalField::HeartRate,
                raw: value.to_string(),
            },
            at(0),
        );
        if (40.0..=200.0).contains(&value) {
            proptest::prop_assert_eq!(dashboard.record().heart_rate, value);
        } else {
            proptest::prop_assert_eq!(dashboard.record().heart_rate, 72.0);
            proptest::prop_assert!(dashboard.is_flagged(VitalField::HeartRate, at(0)));
        }
    }
}

#[test]
fn notifications_supersede_and_expire() {
    let mut dashboard = Dashboard::new(&DashboardConfig::default());
    dashboard.handle(
        SessionEvent::ManualVital {
            field: VitalField::HeartRate,
            raw: "85".to_string(),
        },
        at(0),
    );
    assert!(dashboard.notice(at(0)).is_some());

    dashboard.handle(SessionEvent::Reset, at(1));
    let visible = dashboard.notice(at(1)).unwrap();
    assert_eq!(visible.message, "Readings reset to defaults");

    // The 3-second display window has passed.
    assert!(dashboard.notice(at(4)).is_none());
}
