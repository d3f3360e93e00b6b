//! Push-channel protocol and connection management.
//!
//! The live channel is a persistent server-to-client stream carrying
//! named events. The socket implementation is the host's; this module
//! owns the event shapes, the connection state machine and the bounded
//! reconnect policy.

use crate::dto::VitalsPushPayload;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Push-channel connection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelState {
    /// Not connected
    #[default]
    Disconnected,
    /// Attempting to connect
    Connecting,
    /// Connected and receiving events
    Connected,
    /// Connection lost, attempting reconnection
    Reconnecting,
    /// Reconnect attempts exhausted
    Failed,
}

impl ChannelState {
    /// Whether events can currently arrive.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Connected)
    }

    /// Whether a connection attempt is in flight.
    #[must_use]
    pub const fn is_connecting(&self) -> bool {
        matches!(self, Self::Connecting | Self::Reconnecting)
    }
}

/// Named events delivered on the live channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum FeedEvent {
    /// Socket opened
    Connect,
    /// Server greeting after connect
    ConnectionResponse {
        /// Greeting text
        message: String,
    },
    /// New readings pushed by the server
    VitalsUpdate(VitalsPushPayload),
    /// Socket closed
    Disconnect,
}

/// Reconnection policy for the push channel.
///
/// Attempts are bounded: once `max_attempts` reconnects have failed
/// the channel goes [`ChannelState::Failed`] and stays there until the
/// user toggles modes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconnectPolicy {
    /// Maximum reconnection attempts
    pub max_attempts: u32,
    /// Delay before the first reconnect
    pub initial_delay: Duration,
    /// Ceiling for the backoff delay
    pub max_delay: Duration,
    /// Multiplier for exponential backoff
    pub backoff_multiplier: f32,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
            backoff_multiplier: 2.0,
        }
    }
}

impl ReconnectPolicy {
    /// Delay before the given (zero-based) attempt.
    #[must_use]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let delay_ms = self.initial_delay.as_millis() as f32
            * self.backoff_multiplier.powi(attempt.min(20) as i32);
        let delay = Duration::from_millis(delay_ms.min(self.max_delay.as_millis() as f32) as u64);
        delay.min(self.max_delay)
    }

    /// Whether another attempt is allowed.
    #[must_use]
    pub const fn should_reconnect(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }
}

/// What the host should do after a channel transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedDirective {
    /// Nothing to do
    None,
    /// Schedule a reconnect attempt after the delay
    Retry {
        /// Backoff delay before the attempt
        delay: Duration,
    },
    /// Attempts exhausted: remain degraded until the user acts
    GiveUp,
}

/// Connection state machine for the push channel.
#[derive(Debug, Clone, Default)]
pub struct FeedChannel {
    state: ChannelState,
    attempts: u32,
    policy: ReconnectPolicy,
}

impl FeedChannel {
    /// Create a channel with the default policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a channel with a custom policy.
    #[must_use]
    pub fn with_policy(policy: ReconnectPolicy) -> Self {
        Self {
            state: ChannelState::Disconnected,
            attempts: 0,
            policy,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> ChannelState {
        self.state
    }

    /// Reconnect attempts made since the last successful open.
    #[must_use]
    pub const fn attempts(&self) -> u32 {
        self.attempts
    }

    /// The host started opening the socket.
    pub fn connecting(&mut self) {
        self.state = ChannelState::Connecting;
    }

    /// The socket opened.
    pub fn opened(&mut self) {
        self.state = ChannelState::Connected;
        self.attempts = 0;
    }

    /// The socket closed.
    ///
    /// A clean close (user-initiated teardown) goes straight to
    /// disconnected. An unclean close runs the bounded reconnect
    /// policy.
    pub fn closed(&mut self, clean: bool) -> FeedDirective {
        if clean {
            self.state = ChannelState::Disconnected;
            self.attempts = 0;
            return FeedDirective::None;
        }
        if self.policy.should_reconnect(self.attempts) {
            let delay = self.policy.delay_for_attempt(self.attempts);
            self.attempts += 1;
            self.state = ChannelState::Reconnecting;
            FeedDirective::Retry { delay }
        } else {
            self.state = ChannelState::Failed;
            FeedDirective::GiveUp
        }
    }

    /// User-initiated teardown.
    pub fn shutdown(&mut self) {
        self.state = ChannelState::Disconnected;
        self.attempts = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_named_event_wire_format() {
        let event: FeedEvent = serde_json::from_str(
            r#"{"event": "vitals_update", "heart_rate": 105}"#,
        )
        .unwrap();
        match event {
            FeedEvent::VitalsUpdate(payload) => {
                assert_eq!(payload.heart_rate, Some(105.0));
                assert_eq!(payload.spo2, None);
            }
            other => panic!("unexpected: {other:?}"),
        }

        let greeting: FeedEvent = serde_json::from_str(
            r#"{"event": "connection_response", "message": "Connected to server"}"#,
        )
        .unwrap();
        assert_eq!(
            greeting,
            FeedEvent::ConnectionResponse {
                message: "Connected to server".to_string()
            }
        );
    }

    #[test]
    fn test_event_round_trip() {
        let event = FeedEvent::VitalsUpdate(VitalsPushPayload {
            spo2: Some(94.0),
            ..VitalsPushPayload::default()
        });
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"event\":\"vitals_update\""));
        let back: FeedEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_backoff_grows_and_caps() {
        let policy = ReconnectPolicy::default();
        assert_eq!(policy.delay_for_attempt(0), Duration::from_millis(500));
        assert_eq!(policy.delay_for_attempt(1), Duration::from_secs(1));
        assert_eq!(policy.delay_for_attempt(2), Duration::from_secs(2));
        assert_eq!(policy.delay_for_attempt(20), Duration::from_secs(30));
    }

    #[test]
    fn test_reconnects_are_bounded_at_five() {
        let mut channel = FeedChannel::new();
        channel.connecting();
        channel.opened();

        for _ in 0..5 {
            match channel.closed(false) {
                FeedDirective::Retry { .. } => {}
                other => panic!("expected retry, got {other:?}"),
            }
            assert_eq!(channel.state(), ChannelState::Reconnecting);
        }

        // Sixth unclean close exhausts the policy.
        assert_eq!(channel.closed(false), FeedDirective::GiveUp);
        assert_eq!(channel.state(), ChannelState::Failed);
    }

    #[test]
    fn test_successful_open_resets_the_counter() {
        let mut channel = FeedChannel::new();
        channel.connecting();
        channel.opened();
        channel.closed(false);
        channel.closed(false);
        assert_eq!(channel.attempts(), 2);

        channel.opened();
        assert_eq!(channel.attempts(), 0);
        assert!(channel.state().is_active());
    }

    #[test]
    fn test_clean_close_does_not_retry() {
        let mut channel = FeedChannel::new();
        channel.opened();
        assert_eq!(channel.closed(true), FeedDirective::None);
        assert_eq!(channel.state(), ChannelState::Disconnected);
        assert_eq!(channel.attempts(), 0);
    }

    proptest! {
        #[test]
        fn prop_backoff_is_monotone_and_capped(attempt in 0u32..64) {
            let policy = ReconnectPolicy::default();
            let delay = policy.delay_for_attempt(attempt);
            prop_assert!(delay <= policy.max_delay);
            let previous = policy.delay_for_attempt(attempt.saturating_sub(1));
            prop_assert!(delay >= previous.min(policy.max_delay));
        }
    }

    #[test]
    fn test_shutdown_clears_failed_state() {
        let mut channel = FeedChannel::with_policy(ReconnectPolicy {
            max_attempts: 0,
            ..ReconnectPolicy::default()
        });
        channel.opened();
        assert_eq!(channel.closed(false), FeedDirective::GiveUp);
        channel.shutdown();
        assert_eq!(channel.state(), ChannelState::Disconnected);
    }
}
