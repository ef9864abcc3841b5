//! Publisher lifecycle state and counters

use serde::Serialize;
use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};

/// Lifecycle state of a publisher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GatewayState {
    /// Link is established and accepting publishes
    Open,
    /// Link was lost and the supervisor is re-establishing it
    Reconnecting,
    /// Terminal: closed explicitly or after an unrecoverable failure
    Closed,
}

impl GatewayState {
    /// Returns true if publishes are attempted in this state
    pub fn accepts_publishes(&self) -> bool {
        matches!(self, GatewayState::Open)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GatewayState::Open => "open",
            GatewayState::Reconnecting => "reconnecting",
            GatewayState::Closed => "closed",
        }
    }

    fn to_u8(self) -> u8 {
        match self {
            GatewayState::Open => 0,
            GatewayState::Reconnecting => 1,
            GatewayState::Closed => 2,
        }
    }

    fn from_u8(value: u8) -> Self {
        match value {
            0 => GatewayState::Open,
            1 => GatewayState::Reconnecting,
            _ => GatewayState::Closed,
        }
    }
}

/// Atomic holder for [`GatewayState`]
///
/// `Closed` is terminal: `transition` never leaves it, and `close` is the
/// only way in besides a transition that names it as the target.
#[derive(Debug)]
pub(crate) struct StateCell(AtomicU8);

impl StateCell {
    pub(crate) fn new(state: GatewayState) -> Self {
        Self(AtomicU8::new(state.to_u8()))
    }

    pub(crate) fn get(&self) -> GatewayState {
        GatewayState::from_u8(self.0.load(Ordering::SeqCst))
    }

    /// Move from `from` to `to`; returns false if the current state was not `from`
    pub(crate) fn transition(&self, from: GatewayState, to: GatewayState) -> bool {
        if from == GatewayState::Closed {
            return false;
        }
        self.0
            .compare_exchange(from.to_u8(), to.to_u8(), Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    /// Force `Closed`, returning the previous state
    pub(crate) fn close(&self) -> GatewayState {
        GatewayState::from_u8(self.0.swap(GatewayState::Closed.to_u8(), Ordering::SeqCst))
    }
}

/// Point-in-time copy of publisher counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PublisherStats {
    pub messages_published: u64,
    pub publish_failures: u64,
    pub reconnects: u64,
}

#[derive(Debug, Default)]
pub(crate) struct Counters {
    messages_published: AtomicU64,
    publish_failures: AtomicU64,
    reconnects: AtomicU64,
}

impl Counters {
    pub(crate) fn record_published(&self) {
        self.messages_published.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_failure(&self) {
        self.publish_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_reconnect(&self) {
        self.reconnects.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> PublisherStats {
        PublisherStats {
            messages_published: self.messages_published.load(Ordering::Relaxed),
            publish_failures: self.publish_failures.load(Ordering::Relaxed),
            reconnects: self.reconnects.load(Ordering::Relaxed),
        }
    }
}
