//! Exponential backoff for broker reconnection

use rand::Rng;
use std::time::Duration;

/// Exponential backoff configuration
#[derive(Debug, Clone, PartialEq)]
pub struct BackoffConfig {
    /// Delay before the first attempt
    pub initial_delay: Duration,
    /// Upper bound for any single delay
    pub max_delay: Duration,
    /// Growth factor between attempts
    pub multiplier: f64,
    /// Jitter factor (0.0 to 1.0) applied symmetrically around the delay
    pub jitter_factor: f64,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(30),
            multiplier: 2.0,
            jitter_factor: 0.1,
        }
    }
}

/// Exponential backoff calculator with jitter
#[derive(Debug)]
pub struct ExponentialBackoff {
    config: BackoffConfig,
    attempt: u32,
}

impl ExponentialBackoff {
    pub fn new(config: BackoffConfig) -> Self {
        Self { config, attempt: 0 }
    }

    /// Delay to wait before the next attempt; advances the attempt counter
    pub fn next_delay(&mut self) -> Duration {
        let exponent = self.attempt.min(32) as i32;
        self.attempt = self.attempt.saturating_add(1);

        let base_ms = self.config.initial_delay.as_millis() as f64
            * self.config.multiplier.max(1.0).powi(exponent);
        let capped_ms = base_ms.min(self.config.max_delay.as_millis() as f64);

        let jitter = self.config.jitter_factor.clamp(0.0, 1.0);
        let final_ms = if jitter > 0.0 {
            let range = capped_ms * jitter;
            capped_ms + rand::rng().random_range(-range..=range)
        } else {
            capped_ms
        };

        Duration::from_millis(final_ms.max(1.0) as u64)
    }

    pub fn attempt(&self) -> u32 {
        self.attempt
    }
}
