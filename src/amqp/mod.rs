//! AMQP (RabbitMQ) integration
//!
//! Publishes auth-service events to a durable topic exchange.

mod backoff;
mod link;
mod publisher;
mod state;

pub use backoff::{BackoffConfig, ExponentialBackoff};
pub use link::{AmqpConnector, Connector, Link, CONTENT_TYPE};
pub use publisher::{
    validate_message, AmqpPublisher, PublisherSettings, ReconnectPolicy, DEFAULT_MAX_BODY_BYTES,
    MAX_ROUTING_KEY_BYTES,
};
pub use state::{GatewayState, PublisherStats};
