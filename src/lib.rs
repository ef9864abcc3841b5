//! Auth event gateway
//!
//! Publishes auth-service domain events ("user registered", "OTP
//! requested", ...) to a RabbitMQ topic exchange through a single
//! supervised connection:
//! - [`amqp::AmqpPublisher`] owns the broker link and serialises publishes
//! - [`events`] defines the JSON envelopes and the emission policy
//! - [`notify`] is the one-time code delivery boundary
//! - [`health`] and [`metrics`] expose readiness and Prometheus metrics

pub mod amqp;
pub mod config;
pub mod error;
pub mod events;
pub mod health;
pub mod metrics;
pub mod notify;

pub use amqp::{AmqpPublisher, GatewayState, PublisherSettings};
pub use error::GatewayError;
