//! Gateway configuration module
//!
//! Handles loading configuration from environment variables.

use crate::amqp::{BackoffConfig, PublisherSettings, ReconnectPolicy};
use crate::error::GatewayError;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Gateway configuration
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// AMQP broker URI
    pub amqp_url: String,

    /// Topic exchange name; empty publishes to the default exchange
    pub exchange: String,

    pub connect_timeout: Duration,
    pub publish_timeout: Duration,

    /// Wait for broker acks on every publish
    pub publisher_confirms: bool,

    /// 0 disables reconnection
    pub reconnect_max_attempts: u32,
    pub reconnect_initial_delay: Duration,
    pub reconnect_max_delay: Duration,

    /// Health/metrics HTTP port
    pub http_port: u16,

    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl GatewayConfig {
    /// Load configuration from environment variables (and `.env` if present)
    pub fn from_env() -> Result<Self, GatewayError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, GatewayError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let amqp_url = lookup("AMQP_URL")
            .or_else(|| lookup("RABBITMQ_URL"))
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| {
                GatewayError::Config("AMQP_URL or RABBITMQ_URL must be set".to_string())
            })?;

        let exchange = lookup("AMQP_EXCHANGE").unwrap_or_default();

        let connect_timeout =
            Duration::from_millis(parse(&lookup, "AMQP_CONNECT_TIMEOUT_MS", 10_000)?);
        let publish_timeout =
            Duration::from_millis(parse(&lookup, "AMQP_PUBLISH_TIMEOUT_MS", 5_000)?);

        let publisher_confirms = parse_bool(&lookup, "AMQP_PUBLISHER_CONFIRMS", false)?;

        let reconnect_max_attempts = parse(&lookup, "AMQP_RECONNECT_MAX_ATTEMPTS", 5)?;
        let reconnect_initial_delay =
            Duration::from_millis(parse(&lookup, "AMQP_RECONNECT_INITIAL_DELAY_MS", 100)?);
        let reconnect_max_delay =
            Duration::from_millis(parse(&lookup, "AMQP_RECONNECT_MAX_DELAY_MS", 30_000)?);

        let http_port = match lookup("HTTP_PORT").or_else(|| lookup("METRICS_PORT")) {
            Some(raw) => raw.parse().map_err(|e| {
                GatewayError::Config(format!("HTTP_PORT must be a valid port number: {e}"))
            })?,
            None => 9090,
        };

        let log_level = lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        Ok(Self {
            amqp_url,
            exchange,
            connect_timeout,
            publish_timeout,
            publisher_confirms,
            reconnect_max_attempts,
            reconnect_initial_delay,
            reconnect_max_delay,
            http_port,
            log_level,
        })
    }

    /// Settings for [`crate::amqp::AmqpPublisher::connect`]
    pub fn publisher_settings(&self) -> PublisherSettings {
        let mut settings = PublisherSettings::new(self.amqp_url.clone(), self.exchange.clone());
        settings.connect_timeout = self.connect_timeout;
        settings.publish_timeout = self.publish_timeout;
        settings.publisher_confirms = self.publisher_confirms;
        settings.reconnect = ReconnectPolicy {
            max_attempts: self.reconnect_max_attempts,
            backoff: BackoffConfig {
                initial_delay: self.reconnect_initial_delay,
                max_delay: self.reconnect_max_delay,
                ..BackoffConfig::default()
            },
        };
        settings
    }
}

fn parse<F, T>(lookup: &F, key: &str, default: T) -> Result<T, GatewayError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| GatewayError::Config(format!("{key} must be a valid number: {e}"))),
        None => Ok(default),
    }
}

fn parse_bool<F>(lookup: &F, key: &str, default: bool) -> Result<bool, GatewayError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).map(|raw| raw.trim().to_ascii_lowercase()) {
        None => Ok(default),
        Some(raw) => match raw.as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(GatewayError::Config(format!("{key} must be a boolean, got '{raw}'"))),
        },
    }
}
