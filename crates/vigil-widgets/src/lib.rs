//! View collaborators for the Vigil dashboard.
//!
//! These are the read-side components the update dispatcher fans out
//! to after a committed mutation: badges, gauges, the summary card,
//! the chart series feed, and the notification toast. None of them
//! render; they hold the display model the host paints from.

mod badge;
mod chart;
mod formats;
mod gauge;
mod summary;
mod toast;

pub use badge::StatusBadge;
pub use chart::{ChartFeed, VitalSeries};
pub use formats::format_reading;
pub use gauge::Gauge;
pub use summary::SummaryCard;
pub use toast::{InvalidFlags, Notice, NoticeKind, Toast};
