//! Emission policy for auth events
//!
//! Whether a business operation survives a failed publish is the host's
//! decision, made per call site. The gateway never makes it implicitly.

use crate::amqp::AmqpPublisher;
use crate::error::GatewayError;
use crate::events::envelope::AuthEvent;
use tracing::warn;

/// What a failed publish means for the calling operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmitPolicy {
    /// Propagate the error; the operation fails with it
    Required,
    /// Log the failure and let the operation succeed
    #[default]
    BestEffort,
}

/// Publish `event` and apply `policy` to the outcome
///
/// Under [`EmitPolicy::BestEffort`] a failure is still counted by the
/// publisher's stats and metrics, then logged with the event id so it can
/// be replayed by hand.
pub async fn emit(
    publisher: &AmqpPublisher,
    event: &AuthEvent,
    policy: EmitPolicy,
) -> Result<(), GatewayError> {
    match publisher.publish_event(event).await {
        Ok(()) => Ok(()),
        Err(e) => match policy {
            EmitPolicy::Required => Err(e),
            EmitPolicy::BestEffort => {
                warn!(
                    event_id = %event.event_id,
                    event_type = %event.event_type,
                    error = %e,
                    "Auth event dropped (best effort)"
                );
                Ok(())
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amqp::{Connector, Link, PublisherSettings, ReconnectPolicy};
    use async_trait::async_trait;
    use std::sync::Arc;
    use tokio::sync::Notify;

    /// Link whose every publish fails at the broker
    struct RejectingLink;

    #[async_trait]
    impl Link for RejectingLink {
        async fn publish(&self, _: &str, routing_key: &str, _: &[u8]) -> Result<(), GatewayError> {
            Err(GatewayError::Nacked {
                routing_key: routing_key.to_string(),
            })
        }

        fn is_connected(&self) -> bool {
            true
        }

        async fn close(&self) {}
    }

    struct RejectingConnector;

    #[async_trait]
    impl Connector for RejectingConnector {
        async fn establish(&self, _: Arc<Notify>) -> Result<Box<dyn Link>, GatewayError> {
            Ok(Box::new(RejectingLink))
        }
    }

    async fn rejecting_publisher() -> AmqpPublisher {
        let mut settings = PublisherSettings::new("amqp://fake:5672/%2f", "auth.events");
        settings.reconnect = ReconnectPolicy::disabled();
        AmqpPublisher::with_connector(settings, Arc::new(RejectingConnector))
            .await
            .unwrap()
    }

    #[test]
    fn default_policy_is_best_effort() {
        assert_eq!(EmitPolicy::default(), EmitPolicy::BestEffort);
    }

    #[tokio::test]
    async fn required_policy_propagates_failure() {
        let publisher = rejecting_publisher().await;
        let event = AuthEvent::user_registered("42", "a@example.com");

        let err = emit(&publisher, &event, EmitPolicy::Required).await.unwrap_err();
        assert!(matches!(err, GatewayError::Nacked { .. }));
        publisher.close().await;
    }

    #[tokio::test]
    async fn best_effort_policy_swallows_failure_but_counts_it() {
        let publisher = rejecting_publisher().await;
        let event = AuthEvent::otp_requested("a@example.com");

        assert!(emit(&publisher, &event, EmitPolicy::BestEffort).await.is_ok());
        assert_eq!(publisher.stats().publish_failures, 1);
        publisher.close().await;
    }
}
