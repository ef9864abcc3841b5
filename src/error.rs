//! Domain error types for the auth event gateway
//!
//! main.rs is the ONLY module allowed to use anyhow::Result (process boundary).
//! All library code returns Result<T, GatewayError>.

use std::time::Duration;
use thiserror::Error;

/// Boxed source error carried by transport-level variants
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Gateway domain errors
///
/// Variants fall into four families, and callers usually only care which one
/// they got:
/// - startup: the publisher could not be constructed
/// - argument: the call was rejected before any I/O
/// - delivery: the broker link failed or refused the publish
/// - lifecycle: the publisher is reconnecting or closed
///
/// Example log output:
/// ```text
/// GatewayError::Transport { routing_key: "auth.user.registered", .. }
/// → "transport failure publishing to 'auth.user.registered'"
/// ```
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Broker address could not be parsed as an AMQP URI
    #[error("invalid broker address: {reason}")]
    InvalidAddress { reason: String },

    /// Exchange name rejected before contacting the broker
    #[error("invalid exchange name '{exchange}': {reason}")]
    InvalidExchange {
        exchange: String,
        reason: &'static str,
    },

    /// TCP/AMQP handshake with the broker failed
    #[error("failed to connect to broker at {endpoint}")]
    ConnectFailed {
        endpoint: String,
        #[source]
        source: BoxError,
    },

    /// Construction or reconnection did not finish before its deadline
    #[error("broker connection not established within {timeout:?}")]
    ConnectTimeout { timeout: Duration },

    /// Broker refused to open a channel
    #[error("failed to open broker channel")]
    ChannelOpenFailed(#[source] BoxError),

    /// Exchange declaration failed (e.g. existing exchange with another type)
    #[error("failed to declare exchange '{exchange}'")]
    ExchangeDeclareFailed {
        exchange: String,
        #[source]
        source: BoxError,
    },

    /// Routing key empty or longer than an AMQP short string
    #[error("invalid routing key '{routing_key}': {reason}")]
    InvalidRoutingKey {
        routing_key: String,
        reason: &'static str,
    },

    /// Body exceeds the configured broker message limit
    #[error("payload of {size} bytes exceeds limit of {max} bytes")]
    PayloadTooLarge { size: usize, max: usize },

    /// Connection or channel became unusable during the publish
    #[error("transport failure publishing to '{routing_key}'")]
    Transport {
        routing_key: String,
        #[source]
        source: BoxError,
    },

    /// Broker rejected the publish at the protocol level
    #[error("broker rejected publish to '{routing_key}'")]
    Protocol {
        routing_key: String,
        #[source]
        source: BoxError,
    },

    /// Publisher confirms are enabled and the broker nacked the message
    #[error("broker nacked message published to '{routing_key}'")]
    Nacked { routing_key: String },

    /// Publish did not complete before its deadline
    #[error("publish to '{routing_key}' timed out after {timeout:?}")]
    PublishTimeout {
        routing_key: String,
        timeout: Duration,
    },

    /// Broker link is being re-established; publish was not attempted
    #[error("publisher is reconnecting to the broker")]
    Reconnecting,

    /// Publisher was closed explicitly or after an unrecoverable link failure
    #[error("publisher is closed")]
    Closed,

    /// Event serialization failed
    #[error("event serialization failed for {event_type}")]
    SerializationFailed {
        event_type: String,
        #[source]
        source: serde_json::Error,
    },

    /// One-time code delivery failed
    #[error("failed to deliver code to '{address}': {reason}")]
    NotifyFailed { address: String, reason: String },

    /// Prometheus recorder could not be installed
    #[error("metrics recorder installation failed")]
    MetricsInstall(#[source] BoxError),

    /// Configuration error (environment variable missing or invalid)
    #[error("configuration error: {0}")]
    Config(String),
}

impl GatewayError {
    /// Returns a static label string suitable for Prometheus metrics.
    ///
    /// Used as the `error_type` label on `publisher_publish_failures_total`.
    pub fn error_type_label(&self) -> &'static str {
        match self {
            Self::InvalidAddress { .. } => "invalid_address",
            Self::InvalidExchange { .. } => "invalid_exchange",
            Self::ConnectFailed { .. } => "connect_failed",
            Self::ConnectTimeout { .. } => "connect_timeout",
            Self::ChannelOpenFailed(_) => "channel_open",
            Self::ExchangeDeclareFailed { .. } => "exchange_declare",
            Self::InvalidRoutingKey { .. } => "invalid_routing_key",
            Self::PayloadTooLarge { .. } => "payload_too_large",
            Self::Transport { .. } => "transport",
            Self::Protocol { .. } => "protocol",
            Self::Nacked { .. } => "nacked",
            Self::PublishTimeout { .. } => "publish_timeout",
            Self::Reconnecting => "reconnecting",
            Self::Closed => "closed",
            Self::SerializationFailed { .. } => "serialization",
            Self::NotifyFailed { .. } => "notify",
            Self::MetricsInstall(_) => "metrics_install",
            Self::Config(_) => "config",
        }
    }

    /// True for failures that prevent the publisher from being constructed
    pub fn is_startup_failure(&self) -> bool {
        matches!(
            self,
            Self::InvalidAddress { .. }
                | Self::InvalidExchange { .. }
                | Self::ConnectFailed { .. }
                | Self::ConnectTimeout { .. }
                | Self::ChannelOpenFailed(_)
                | Self::ExchangeDeclareFailed { .. }
        )
    }

    /// True when the broker link itself is unusable
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// True when the call was rejected locally or by the broker as misuse
    pub fn is_argument(&self) -> bool {
        matches!(
            self,
            Self::InvalidRoutingKey { .. } | Self::PayloadTooLarge { .. } | Self::Protocol { .. }
        )
    }

    /// True when the publisher will not accept publishes any more
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_error() -> BoxError {
        Box::new(std::io::Error::new(std::io::ErrorKind::Other, "test"))
    }

    fn all_variants() -> Vec<GatewayError> {
        vec![
            GatewayError::InvalidAddress {
                reason: "bad".to_string(),
            },
            GatewayError::InvalidExchange {
                exchange: "x".to_string(),
                reason: "bad",
            },
            GatewayError::ConnectFailed {
                endpoint: "localhost:5672/".to_string(),
                source: test_error(),
            },
            GatewayError::ConnectTimeout {
                timeout: Duration::from_secs(1),
            },
            GatewayError::ChannelOpenFailed(test_error()),
            GatewayError::ExchangeDeclareFailed {
                exchange: "x".to_string(),
                source: test_error(),
            },
            GatewayError::InvalidRoutingKey {
                routing_key: String::new(),
                reason: "empty",
            },
            GatewayError::PayloadTooLarge { size: 2, max: 1 },
            GatewayError::Transport {
                routing_key: "a".to_string(),
                source: test_error(),
            },
            GatewayError::Protocol {
                routing_key: "a".to_string(),
                source: test_error(),
            },
            GatewayError::Nacked {
                routing_key: "a".to_string(),
            },
            GatewayError::PublishTimeout {
                routing_key: "a".to_string(),
                timeout: Duration::from_millis(5),
            },
            GatewayError::Reconnecting,
            GatewayError::Closed,
            GatewayError::SerializationFailed {
                event_type: "test".to_string(),
                source: serde_json::from_str::<()>("invalid").unwrap_err(),
            },
            GatewayError::NotifyFailed {
                address: "a@b".to_string(),
                reason: "down".to_string(),
            },
            GatewayError::MetricsInstall(test_error()),
            GatewayError::Config("test".to_string()),
        ]
    }

    #[test]
    fn every_variant_has_distinct_error_type_label() {
        let labels: Vec<_> = all_variants().iter().map(|e| e.error_type_label()).collect();

        let mut unique = labels.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(labels.len(), unique.len(), "Duplicate error_type_label found");
    }

    #[test]
    fn transport_and_argument_failures_are_distinct() {
        for err in all_variants() {
            assert!(
                !(err.is_transport() && err.is_argument()),
                "{} classified as both transport and argument",
                err.error_type_label()
            );
        }

        let transport = GatewayError::Transport {
            routing_key: "a".to_string(),
            source: test_error(),
        };
        assert!(transport.is_transport());
        assert!(!transport.is_startup_failure());

        let protocol = GatewayError::Protocol {
            routing_key: "a".to_string(),
            source: test_error(),
        };
        assert!(protocol.is_argument());
    }

    #[test]
    fn closed_is_distinguishable() {
        assert!(GatewayError::Closed.is_closed());
        assert!(!GatewayError::Reconnecting.is_closed());
    }

    #[test]
    fn error_messages_contain_context() {
        let err = GatewayError::Transport {
            routing_key: "auth.user.registered".to_string(),
            source: test_error(),
        };
        assert!(err.to_string().contains("auth.user.registered"));

        let err = GatewayError::PayloadTooLarge { size: 20, max: 10 };
        let msg = err.to_string();
        assert!(msg.contains("20") && msg.contains("10"));

        let err = GatewayError::ExchangeDeclareFailed {
            exchange: "auth.events".to_string(),
            source: test_error(),
        };
        assert!(err.to_string().contains("auth.events"));
    }

    #[test]
    fn config_error_preserves_message() {
        let err = GatewayError::Config("AMQP_URL must be set".to_string());
        assert_eq!(err.to_string(), "configuration error: AMQP_URL must be set");
    }
}
