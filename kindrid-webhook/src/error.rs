//! Error types for webhook verification, decoding, and configuration.

use thiserror::Error;

/// Errors surfaced while handling a single webhook delivery.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// Body is not valid JSON or has no top-level `donation` object.
    #[error("malformed payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    /// The `X-Kindrid-Signature` header does not match the computed HMAC.
    #[error("signature mismatch")]
    SignatureMismatch,
}

/// Errors raised while loading configuration at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),

    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("invalid webhook url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("invalid port {value:?}")]
    InvalidPort { value: String },
}
