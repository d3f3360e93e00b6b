//! Producer mode control.
//!
//! At most one of the simulator and the backend feed may write to the
//! store. The controller enforces this by construction: every
//! transition's command list stops the old producer before starting
//! the new one, and each transition bumps an epoch so responses issued
//! under a previous mode can be recognized and discarded.

use serde::{Deserialize, Serialize};

/// Which producer currently holds write access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Local simulation drives the store.
    #[default]
    Local,
    /// The backend feed drives the store.
    Backend,
}

/// Opaque capture of the controller's epoch at issuance time.
///
/// Asynchronous work takes a token when it starts; its result is only
/// committed if [`ModeController::accepts`] still honors the token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeToken(u64);

/// Side effects the host must run to complete a transition, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModeCommand {
    /// Disable the simulator's tick source and auto-update flag.
    StopSimulator,
    /// Re-enable auto-update and the simulator's tick source.
    StartSimulator,
    /// Establish the live push-channel connection.
    ConnectFeed,
    /// Tear down the live push-channel connection.
    DisconnectFeed,
    /// Issue one immediate pull of the latest readings.
    PullLatest,
    /// Show a confirmation notification.
    Announce(String),
}

/// The mode state machine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModeController {
    mode: Mode,
    epoch: u64,
}

impl ModeController {
    /// Create a controller in local mode.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current mode.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Whether the simulator is the active producer.
    #[must_use]
    pub const fn is_local(&self) -> bool {
        matches!(self.mode, Mode::Local)
    }

    /// Whether the backend feed is the active producer.
    #[must_use]
    pub const fn is_backend(&self) -> bool {
        matches!(self.mode, Mode::Backend)
    }

    /// Capture the current epoch.
    #[must_use]
    pub const fn token(&self) -> ModeToken {
        ModeToken(self.epoch)
    }

    /// Whether a result issued under `token` may still commit.
    #[must_use]
    pub const fn accepts(&self, token: ModeToken) -> bool {
        token.0 == self.epoch
    }

    /// Switch to the requested mode.
    ///
    /// Returns `None` when already in that mode (guarded no-op), else
    /// the ordered command list the host must execute.
    pub fn set(&mut self, mode: Mode) -> Option<Vec<ModeCommand>> {
        match mode {
            Mode::Backend => self.enter_backend(),
            Mode::Local => self.enter_local(),
        }
    }

    /// Transition to backend mode.
    pub fn enter_backend(&mut self) -> Option<Vec<ModeCommand>> {
        if self.is_backend() {
            return None;
        }
        self.mode = Mode::Backend;
        self.epoch += 1;
        Some(vec![
            ModeCommand::StopSimulator,
            ModeCommand::ConnectFeed,
            ModeCommand::PullLatest,
            ModeCommand::Announce("Live backend feed enabled".to_string()),
        ])
    }

    /// Transition to local mode.
    pub fn enter_local(&mut self) -> Option<Vec<ModeCommand>> {
        if self.is_local() {
            return None;
        }
        self.mode = Mode::Local;
        self.epoch += 1;
        Some(vec![
            ModeCommand::DisconnectFeed,
            ModeCommand::StartSimulator,
            ModeCommand::Announce("Local simulation resumed".to_string()),
        ])
    }
}
