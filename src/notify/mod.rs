//! One-time code delivery
//!
//! The gateway never calls this; the auth service uses it next to the
//! publisher when issuing codes.

use crate::error::GatewayError;
use async_trait::async_trait;
use tracing::info;

/// Delivers a short code to an address (email, phone, ...)
#[async_trait]
pub trait OtpNotifier: Send + Sync {
    async fn notify(&self, address: &str, code: &str) -> Result<(), GatewayError>;
}

/// Mock notifier that logs and prints instead of sending
///
/// Swap for a real email/SMS provider in production.
#[derive(Debug, Default, Clone)]
pub struct LogNotifier;

impl LogNotifier {
    pub fn new() -> Self {
        Self
    }
}

fn validate(address: &str, code: &str) -> Result<(), GatewayError> {
    let reason = if address.trim().is_empty() {
        "address is empty"
    } else if code.is_empty() {
        "code is empty"
    } else if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        "code must be alphanumeric"
    } else {
        return Ok(());
    };

    Err(GatewayError::NotifyFailed {
        address: address.to_string(),
        reason: reason.to_string(),
    })
}

#[async_trait]
impl OtpNotifier for LogNotifier {
    async fn notify(&self, address: &str, code: &str) -> Result<(), GatewayError> {
        validate(address, code)?;

        // the code goes to the mock mailbox only, never to the log stream
        info!(address, code_len = code.len(), "Simulating one-time code delivery");
        println!("--- MOCK EMAIL SENT ---");
        println!("To: {address}");
        println!("Subject: Your OTP");
        println!("Body: Your OTP is: {code}");
        println!("-----------------------");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_notifier_accepts_valid_code() {
        let notifier = LogNotifier::new();
        assert!(notifier.notify("alice@example.com", "482913").await.is_ok());
    }

    #[tokio::test]
    async fn empty_address_is_rejected() {
        let err = LogNotifier::new().notify("", "482913").await.unwrap_err();
        assert!(matches!(err, GatewayError::NotifyFailed { .. }));
        assert!(err.to_string().contains("address is empty"));
    }

    #[tokio::test]
    async fn non_alphanumeric_code_is_rejected() {
        let err = LogNotifier::new()
            .notify("alice@example.com", "48 29")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("alphanumeric"));
    }

    #[tokio::test]
    async fn usable_as_trait_object() {
        let notifier: Box<dyn OtpNotifier> = Box::new(LogNotifier);
        assert!(notifier.notify("bob@example.com", "A1B2C3").await.is_ok());
    }
}
