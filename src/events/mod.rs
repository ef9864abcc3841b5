//! Auth event handling
//!
//! Event envelopes plus the policy hosts use when publishing them.

pub mod emit;
pub mod envelope;

pub use emit::{emit, EmitPolicy};
pub use envelope::{event_types, routing, AuthEvent};
