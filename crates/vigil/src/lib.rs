//! Vigil: a single-subject vitals dashboard core.
//!
//! The dashboard displays simulated or backend-supplied vital signs
//! and environmental readings for one monitored subject. This crate
//! ties the workspace together:
//!
//! - re-exports of [`vigil_core`] (store, validation, status, mode
//!   control), [`vigil_widgets`] (view collaborators) and
//!   [`vigil_sync`] (backend boundary)
//! - [`DashboardConfig`]: the YAML session configuration
//! - [`Dashboard`]: the single-threaded session runtime that routes
//!   producer events through the store and drives the update
//!   dispatcher

pub use vigil_core::*;
pub use vigil_sync as sync;
pub use vigil_widgets as widgets;

mod config;
mod session;

pub use config::{BackendConfig, ConfigError, DashboardConfig};
pub use session::{Dashboard, HostCommand, SessionEvent};
