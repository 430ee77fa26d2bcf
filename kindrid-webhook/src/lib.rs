//! Kindrid donation webhooks: signature verification and payload decoding.
//!
//! Kindrid delivers one JSON document per donation, signed with HMAC-SHA1
//! over the webhook URL followed by the raw body. Handling a delivery is a
//! two-step protocol:
//!
//! ```text
//! raw body → UnverifiedPayload::verify() → VerifiedPayload::decode() → DonationEvent
//! ```
//!
//! The `web` module wraps this in an axum receiver used by the `kindrid-web`
//! binary.

pub mod config;
pub mod error;
pub mod payload;
pub mod signature;
pub mod verified;
pub mod web;

#[cfg(test)]
mod fixtures;

// Re-export commonly used types
pub use config::Config;
pub use error::{ConfigError, WebhookError};
pub use payload::{DonationEvent, DonationStatus, Donor, TagSet};
pub use signature::{
    compute_signature, signing_message, verify_signature, SignatureVerifier, SIGNATURE_HEADER,
};
pub use verified::{UnverifiedPayload, VerifiedPayload};
