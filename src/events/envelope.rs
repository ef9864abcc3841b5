//! Auth event envelopes
//!
//! JSON payloads published by the auth service. Consumers match on the
//! routing key; the envelope repeats the type for consumers that don't.

use crate::error::GatewayError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Routing key prefixes and full keys for the well-known events
pub mod routing {
    /// Every auth event is published under this prefix
    pub const PREFIX: &str = "auth";
    /// auth.user.registered
    pub const USER_REGISTERED: &str = "auth.user.registered";
    /// auth.otp.requested
    pub const OTP_REQUESTED: &str = "auth.otp.requested";
    /// auth.otp.verified
    pub const OTP_VERIFIED: &str = "auth.otp.verified";
}

/// Event type names carried in the envelope
pub mod event_types {
    pub const USER_REGISTERED: &str = "user.registered";
    pub const OTP_REQUESTED: &str = "otp.requested";
    pub const OTP_VERIFIED: &str = "otp.verified";
}

/// Generic auth event payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthEvent {
    pub event_id: String,
    pub event_type: String,
    /// Milliseconds since the Unix epoch
    pub timestamp: u64,
    pub user_id: Option<String>,
    pub data: serde_json::Value,
}

impl AuthEvent {
    pub fn new(
        event_type: impl Into<String>,
        user_id: Option<String>,
        data: serde_json::Value,
    ) -> Self {
        Self {
            event_id: Uuid::new_v4().to_string(),
            event_type: event_type.into(),
            timestamp: now_millis(),
            user_id,
            data,
        }
    }

    /// A user account was created
    pub fn user_registered(user_id: impl Into<String>, email: &str) -> Self {
        Self::new(
            event_types::USER_REGISTERED,
            Some(user_id.into()),
            serde_json::json!({ "email": email }),
        )
    }

    /// A one-time code was issued; the code itself is never published
    pub fn otp_requested(email: &str) -> Self {
        Self::new(event_types::OTP_REQUESTED, None, serde_json::json!({ "email": email }))
    }

    /// A one-time code was accepted
    pub fn otp_verified(user_id: impl Into<String>, email: &str) -> Self {
        Self::new(
            event_types::OTP_VERIFIED,
            Some(user_id.into()),
            serde_json::json!({ "email": email }),
        )
    }

    /// Routing key for this event's type
    pub fn routing_key(&self) -> String {
        match self.event_type.as_str() {
            event_types::USER_REGISTERED => routing::USER_REGISTERED.to_string(),
            event_types::OTP_REQUESTED => routing::OTP_REQUESTED.to_string(),
            event_types::OTP_VERIFIED => routing::OTP_VERIFIED.to_string(),

            // Default: single segment under the prefix
            other => format!("{}.{}", routing::PREFIX, other.replace('.', "_")),
        }
    }

    pub fn to_json(&self) -> Result<Vec<u8>, GatewayError> {
        serde_json::to_vec(self).map_err(|source| GatewayError::SerializationFailed {
            event_type: self.event_type.clone(),
            source,
        })
    }
}

fn now_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}
