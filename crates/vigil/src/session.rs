//! The dashboard session runtime.
//!
//! Execution is single-threaded and cooperative: the host delivers
//! one [`SessionEvent`] at a time and every mutation plus the full
//! view fan-out runs to completion before the next event. Network
//! side effects are returned as [`HostCommand`]s for the host to run;
//! their results come back as later events carrying the mode token
//! they were issued under, so anything that resolves after a mode
//! switch is discarded instead of committed.

use std::time::Duration;
use vigil_core::{
    manual, status, validate, Mode, ModeCommand, ModeController, ModeToken, ManualForm,
    Simulator, VitalField, VitalStatus, VitalsRecord, VitalsStore,
};
use vigil_sync::{
    ChannelState, FeedChannel, FeedDirective, FeedEvent, MlAnalysis, VitalsPushPayload,
    VitalsSample,
};
use vigil_widgets::{
    ChartFeed, Gauge, InvalidFlags, Notice, NoticeKind, StatusBadge, SummaryCard, Toast,
};

use crate::config::DashboardConfig;

/// One event from any of the session's sources.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// Periodic simulator tick (local mode only)
    Tick,
    /// One manually entered vital
    ManualVital {
        /// Edited field
        field: VitalField,
        /// Raw input text
        raw: String,
    },
    /// Manually entered blood-pressure pair
    ManualBloodPressure {
        /// Raw systolic input
        systolic: String,
        /// Raw diastolic input
        diastolic: String,
    },
    /// The bulk manual form (all-or-nothing)
    ManualAll(ManualForm),
    /// Mode switch request
    SetMode(Mode),
    /// Restore the default record
    Reset,
    /// Event from the live push channel
    Feed(FeedEvent),
    /// Result of a [`HostCommand::Pull`]
    PullResolved {
        /// Token captured when the pull was issued
        token: ModeToken,
        /// Payload, or the failure message
        result: Result<VitalsPushPayload, String>,
    },
    /// Submit the current readings for remote processing
    SubmitVitals {
        /// ISO-8601 sample time supplied by the host
        timestamp: String,
    },
    /// A [`HostCommand::Send`] failed
    SendFailed {
        /// Failure message
        message: String,
    },
    /// A scheduled reconnect delay elapsed
    RetryElapsed,
}

/// Side effect the host must perform.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCommand {
    /// Open the live push channel
    ConnectFeed,
    /// Close the live push channel
    DisconnectFeed,
    /// Fetch the latest readings; answer with
    /// [`SessionEvent::PullResolved`] carrying the same token
    Pull {
        /// Mode token at issuance
        token: ModeToken,
    },
    /// POST the sample to the backend
    Send {
        /// Sample to submit
        sample: VitalsSample,
    },
    /// Deliver [`SessionEvent::RetryElapsed`] after the delay
    ScheduleRetry {
        /// Backoff delay
        delay: Duration,
    },
}

/// The assembled dashboard session.
pub struct Dashboard {
    subject_id: String,
    store: VitalsStore,
    sim: Simulator,
    mode: ModeController,
    channel: FeedChannel,
    backend_enabled: bool,

    badges: Vec<StatusBadge>,
    gauges: Vec<Gauge>,
    summary: SummaryCard,
    chart: ChartFeed,
    toast: Toast,
    flags: InvalidFlags,
    overall: VitalStatus,
    analysis: Option<MlAnalysis>,

    clock: Duration,
}

impl Dashboard {
    /// Build a session from its configuration.
    #[must_use]
    pub fn new(config: &DashboardConfig) -> Self {
        let channel = config
            .backend
            .as_ref()
            .map_or_else(FeedChannel::new, |backend| {
                FeedChannel::with_policy(backend.reconnect_policy())
            });
        let mut dashboard = Self {
            subject_id: config.subject_id.clone(),
            store: VitalsStore::new(),
            sim: Simulator::new(config.sim_seed),
            mode: ModeController::new(),
            channel,
            backend_enabled: config.backend.is_some(),
            badges: VitalField::ALL.iter().map(|&f| StatusBadge::new(f)).collect(),
            gauges: vec![
                Gauge::new(VitalField::HeartRate, 40.0, 200.0),
                Gauge::new(VitalField::Spo2, 70.0, 100.0),
                Gauge::new(VitalField::Temperature, 35.0, 42.0),
            ],
            summary: SummaryCard::new(),
            chart: ChartFeed::new(),
            toast: Toast::new(),
            flags: InvalidFlags::new(),
            overall: VitalStatus::Stable,
            analysis: None,
            clock: Duration::ZERO,
        };
        dashboard.refresh_all(false);
        dashboard
    }

    /// Process one event to completion.
    pub fn handle(&mut self, event: SessionEvent, now: Duration) -> Vec<HostCommand> {
        self.clock = now;
        self.flags.sweep(now);
        match event {
            SessionEvent::Tick => self.on_tick(),
            SessionEvent::ManualVital { field, raw } => self.on_manual_vital(field, &raw),
            SessionEvent::ManualBloodPressure { systolic, diastolic } => {
                self.on_manual_bp(&systolic, &diastolic)
            }
            SessionEvent::ManualAll(form) => self.on_manual_all(&form),
            SessionEvent::SetMode(mode) => self.on_set_mode(mode),
            SessionEvent::Reset => self.on_reset(),
            SessionEvent::Feed(feed_event) => self.on_feed(feed_event),
            SessionEvent::PullResolved { token, result } => self.on_pull_resolved(token, result),
            SessionEvent::SubmitVitals { timestamp } => self.on_submit(timestamp),
            SessionEvent::SendFailed { message } => {
                self.notify(&message, NoticeKind::Error);
                Vec::new()
            }
            SessionEvent::RetryElapsed => self.on_retry_elapsed(),
        }
    }

    // === event handlers ===

    fn on_tick(&mut self) -> Vec<HostCommand> {
        // Mode exclusivity: the simulator never writes in backend mode,
        // even if a stray timer fires after the switch.
        if !self.mode.is_local() {
            return Vec::new();
        }
        if self.sim.tick(&mut self.store) {
            self.refresh_all(true);
        }
        Vec::new()
    }

    fn on_manual_vital(&mut self, field: VitalField, raw: &str) -> Vec<HostCommand> {
        match manual::apply_vital(&mut self.store, field, raw) {
            Ok(applied) => {
                self.notify(&applied.notice(), NoticeKind::Success);
                // Manual edits refresh the views but never append to
                // the chart: series spacing belongs to the tick/push
                // cadence.
                self.refresh_all(false);
            }
            Err(err) => self.flags.raise(err.field(), self.clock),
        }
        Vec::new()
    }

    fn on_manual_bp(&mut self, systolic: &str, diastolic: &str) -> Vec<HostCommand> {
        match manual::apply_blood_pressure(&mut self.store, systolic, diastolic) {
            Ok(pair) => {
                self.notify(&pair.notice(), NoticeKind::Success);
                self.refresh_all(false);
            }
            Err(err) => self.flags.raise(err.field(), self.clock),
        }
        Vec::new()
    }

    fn on_manual_all(&mut self, form: &ManualForm) -> Vec<HostCommand> {
        match manual::apply_all(&mut self.store, form) {
            Ok(_) => {
                self.notify("All vitals updated", NoticeKind::Success);
                self.refresh_all(false);
            }
            Err(bulk) => {
                for err in &bulk.errors {
                    self.flags.raise(err.field(), self.clock);
                }
                self.notify(&bulk.to_string(), NoticeKind::Error);
            }
        }
        Vec::new()
    }

    fn on_set_mode(&mut self, mode: Mode) -> Vec<HostCommand> {
        if mode == Mode::Backend && !self.backend_enabled {
            self.notify(
                "No backend configured; staying in local mode",
                NoticeKind::Warning,
            );
            return Vec::new();
        }
        let Some(transition) = self.mode.set(mode) else {
            return Vec::new();
        };
        let mut out = Vec::new();
        for command in transition {
            match command {
                ModeCommand::StopSimulator => self.sim.set_enabled(false),
                ModeCommand::StartSimulator => self.sim.set_enabled(true),
                ModeCommand::ConnectFeed => {
                    self.channel.connecting();
                    out.push(HostCommand::ConnectFeed);
                }
                ModeCommand::DisconnectFeed => {
                    self.channel.shutdown();
                    out.push(HostCommand::DisconnectFeed);
                }
                ModeCommand::PullLatest => out.push(HostCommand::Pull {
                    token: self.mode.token(),
                }),
                ModeCommand::Announce(message) => self.notify(&message, NoticeKind::Success),
            }
        }
        out
    }

    fn on_reset(&mut self) -> Vec<HostCommand> {
        self.store.reset();
        self.notify("Readings reset to defaults", NoticeKind::Info);
        self.refresh_all(false);
        Vec::new()
    }

    fn on_feed(&mut self, event: FeedEvent) -> Vec<HostCommand> {
        // Events from a torn-down channel (the old producer) are
        // simply not listened to anymore.
        if !self.mode.is_backend() {
            return Vec::new();
        }
        match event {
            FeedEvent::Connect => {
                self.channel.opened();
                Vec::new()
            }
            FeedEvent::ConnectionResponse { message } => {
                self.notify(&message, NoticeKind::Info);
                Vec::new()
            }
            FeedEvent::VitalsUpdate(payload) => {
                self.apply_payload(&payload);
                Vec::new()
            }
            FeedEvent::Disconnect => match self.channel.closed(false) {
                FeedDirective::Retry { delay } => vec![HostCommand::ScheduleRetry { delay }],
                FeedDirective::GiveUp => {
                    self.notify(
                        "Live feed lost; switch to local mode to resume updates",
                        NoticeKind::Warning,
                    );
                    Vec::new()
                }
                FeedDirective::None => Vec::new(),
            },
        }
    }

    fn on_pull_resolved(
        &mut self,
        token: ModeToken,
        result: Result<VitalsPushPayload, String>,
    ) -> Vec<HostCommand> {
        // A pull issued under a previous mode resolves into the void.
        if !self.mode.accepts(token) || !self.mode.is_backend() {
            return Vec::new();
        }
        match result {
            Ok(payload) => self.apply_payload(&payload),
            Err(message) => self.notify(&message, NoticeKind::Error),
        }
        Vec::new()
    }

    fn on_submit(&mut self, timestamp: String) -> Vec<HostCommand> {
        if !self.backend_enabled {
            self.notify(
                "No backend configured; readings stay local",
                NoticeKind::Warning,
            );
            return Vec::new();
        }
        vec![HostCommand::Send {
            sample: VitalsSample::from_record(&self.subject_id, self.store.record(), timestamp),
        }]
    }

    fn on_retry_elapsed(&mut self) -> Vec<HostCommand> {
        if self.mode.is_backend() && self.channel.state() == ChannelState::Reconnecting {
            self.channel.connecting();
            return vec![HostCommand::ConnectFeed];
        }
        Vec::new()
    }

    // === helpers ===

    /// Commit the present, valid readings of a push payload.
    ///
    /// Absent fields fall back to the current value; a clinical field
    /// outside its accept range is rejected and the last known good
    /// value retained.
    fn apply_payload(&mut self, payload: &VitalsPushPayload) {
        if let Some(analysis) = &payload.ml_analysis {
            self.analysis = Some(analysis.clone());
        }
        let entries: Vec<(VitalField, f64)> = payload
            .fields()
            .into_iter()
            .filter(|&(field, value)| validate::check(field, value).is_valid())
            .collect();
        if entries.is_empty() {
            return;
        }
        self.store.commit_all(&entries);
        self.refresh_all(true);
    }

    fn notify(&mut self, message: &str, kind: NoticeKind) {
        self.toast.show(Notice::new(message, kind), self.clock);
    }

    /// The update dispatcher: fixed fan-out after every committed
    /// mutation.
    ///
    /// Order is a design contract: per-field display and status first,
    /// then the overall aggregation (never from stale statuses), then
    /// the summary card, and last the chart append, which only runs on
    /// the tick/push sample path.
    fn refresh_all(&mut self, sample: bool) {
        let record = self.store.snapshot();

        // 1+2. Per-field display refresh and status classification.
        for badge in &mut self.badges {
            badge.refresh(record.get(badge.field()));
        }
        for gauge in &mut self.gauges {
            gauge.refresh(record.get(gauge.field()));
        }

        // 3. Overall aggregation from the just-refreshed statuses.
        let hr_status = self
            .badges
            .iter()
            .find(|badge| badge.field() == VitalField::HeartRate)
            .map_or(VitalStatus::Stable, StatusBadge::status);
        let spo2_status = self
            .badges
            .iter()
            .find(|badge| badge.field() == VitalField::Spo2)
            .map_or(VitalStatus::Stable, StatusBadge::status);
        self.overall = hr_status.max(spo2_status);
        debug_assert_eq!(self.overall, status::overall(&record));

        // 4. Summary card touches only entries whose text changed.
        self.summary.refresh(&record);

        // 5. Chart append, tick/push path only.
        if sample {
            self.chart.append(self.clock.as_secs_f64(), &record);
        }
    }

    // === accessors for the host ===

    /// Current readings.
    #[must_use]
    pub const fn record(&self) -> &VitalsRecord {
        self.store.record()
    }

    /// Committed-mutation counter of the underlying store.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.store.revision()
    }

    /// Current mode.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode.mode()
    }

    /// Whether the simulator's auto-update is on.
    #[must_use]
    pub const fn auto_update(&self) -> bool {
        self.sim.is_enabled()
    }

    /// Push-channel state.
    #[must_use]
    pub const fn channel_state(&self) -> ChannelState {
        self.channel.state()
    }

    /// Aggregated overall status.
    #[must_use]
    pub const fn overall(&self) -> VitalStatus {
        self.overall
    }

    /// All field badges, in display order.
    #[must_use]
    pub fn badges(&self) -> &[StatusBadge] {
        &self.badges
    }

    /// One field's badge.
    #[must_use]
    pub fn badge(&self, field: VitalField) -> Option<&StatusBadge> {
        self.badges.iter().find(|badge| badge.field() == field)
    }

    /// The gauges, in display order.
    #[must_use]
    pub fn gauges(&self) -> &[Gauge] {
        &self.gauges
    }

    /// The summary card.
    #[must_use]
    pub const fn summary(&self) -> &SummaryCard {
        &self.summary
    }

    /// The chart series feed.
    #[must_use]
    pub const fn chart(&self) -> &ChartFeed {
        &self.chart
    }

    /// The most recent model analysis pushed by the backend.
    #[must_use]
    pub const fn analysis(&self) -> Option<&MlAnalysis> {
        self.analysis.as_ref()
    }

    /// The notice visible at `now`, if any.
    #[must_use]
    pub fn notice(&self, now: Duration) -> Option<&Notice> {
        self.toast.visible(now)
    }

    /// Whether a field's invalid-input flag is raised at `now`.
    #[must_use]
    pub fn is_flagged(&self, field: VitalField, now: Duration) -> bool {
        self.flags.is_flagged(field, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local_dashboard() -> Dashboard {
        Dashboard::new(&DashboardConfig::default())
    }

    #[test]
    fn test_initial_views_are_populated() {
        let dashboard = local_dashboard();
        assert_eq!(
            dashboard.badge(VitalField::HeartRate).unwrap().text(),
            "72 beats/min"
        );
        assert_eq!(dashboard.overall(), VitalStatus::Stable);
        // Construction fan-out does not append chart samples.
        assert!(dashboard.chart().get(VitalField::HeartRate).unwrap().points.is_empty());
    }

    #[test]
    fn test_backend_toggle_without_config_is_refused() {
        let mut dashboard = local_dashboard();
        let commands = dashboard.handle(SessionEvent::SetMode(Mode::Backend), Duration::ZERO);
        assert!(commands.is_empty());
        assert_eq!(dashboard.mode(), Mode::Local);
        let notice = dashboard.notice(Duration::ZERO).unwrap();
        assert_eq!(notice.kind, NoticeKind::Warning);
    }
}
