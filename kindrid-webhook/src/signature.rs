//! Kindrid webhook signature verification.
//!
//! Kindrid signs every webhook with HMAC-SHA1 and sends the lowercase hex
//! digest in the `X-Kindrid-Signature` header. The signed message is the
//! fully-qualified webhook URL with the raw request body appended, byte for
//! byte, before any JSON parsing:
//!
//! ```text
//! https://example.com/endpoint{"donation":{"status"...
//! ```

use std::fmt;

use hmac::{Hmac, Mac};
use sha1::Sha1;
use subtle::ConstantTimeEq;
use tracing::warn;
use url::Url;

use crate::config::{API_SECRET_VAR, WEBHOOK_URL_VAR};
use crate::error::ConfigError;

type HmacSha1 = Hmac<Sha1>;

/// Header carrying the sender's signature.
pub const SIGNATURE_HEADER: &str = "X-Kindrid-Signature";

/// Build the message Kindrid signs: endpoint URL followed by the raw body.
pub fn signing_message(endpoint_url: &str, body: &[u8]) -> Vec<u8> {
    let mut message = Vec::with_capacity(endpoint_url.len() + body.len());
    message.extend_from_slice(endpoint_url.as_bytes());
    message.extend_from_slice(body);
    message
}

/// Compute the lowercase hex HMAC-SHA1 of `message` keyed by `secret`.
///
/// Every call builds its own MAC state. If the key is rejected the result is
/// empty, which [`verify_signature`] never accepts.
pub fn compute_signature(message: &[u8], secret: &[u8]) -> String {
    let mut mac = match HmacSha1::new_from_slice(secret) {
        Ok(m) => m,
        Err(_) => {
            warn!(key_length = secret.len(), "kindrid_signature_invalid_key");
            return String::new();
        }
    };
    mac.update(message);
    hex::encode(mac.finalize().into_bytes())
}

/// Compare a received signature header against a computed signature.
///
/// Both sides are lowercased and compared in constant time. An empty header
/// never matches.
pub fn verify_signature(received: &str, computed: &str) -> bool {
    let received = received.trim();
    if received.is_empty() || computed.is_empty() {
        return false;
    }

    let received = received.to_ascii_lowercase();
    let computed = computed.to_ascii_lowercase();

    received.as_bytes().ct_eq(computed.as_bytes()).into()
}

/// Request-level verifier bound to one API secret and webhook URL.
#[derive(Clone)]
pub struct SignatureVerifier {
    secret: String,
    endpoint_url: String,
}

impl SignatureVerifier {
    /// Create a verifier, rejecting an empty secret or a bad endpoint URL.
    ///
    /// The URL is kept exactly as given: Kindrid signs the string that was
    /// registered on the dashboard, not a normalized form of it.
    pub fn new(
        secret: impl Into<String>,
        endpoint_url: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let secret = secret.into();
        let endpoint_url = endpoint_url.into();

        validate_secret(&secret)?;
        validate_endpoint_url(&endpoint_url)?;

        Ok(Self {
            secret,
            endpoint_url,
        })
    }

    pub fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }

    /// Signature Kindrid should have sent for `body`.
    pub fn expected_signature(&self, body: &[u8]) -> String {
        compute_signature(
            &signing_message(&self.endpoint_url, body),
            self.secret.as_bytes(),
        )
    }

    /// Check the signature header of a request against its raw body.
    ///
    /// A missing header is treated as empty and fails.
    pub fn verify(&self, header: Option<&str>, body: &[u8]) -> bool {
        let received = header.unwrap_or("");
        if received.trim().is_empty() {
            warn!(body_length = body.len(), "kindrid_signature_missing");
            return false;
        }

        let expected = self.expected_signature(body);
        let valid = verify_signature(received, &expected);

        if !valid {
            warn!(
                expected_length = expected.len(),
                actual_length = received.trim().len(),
                body_length = body.len(),
                "kindrid_signature_mismatch"
            );
        }

        valid
    }
}

impl fmt::Debug for SignatureVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignatureVerifier")
            .field("secret", &"<redacted>")
            .field("endpoint_url", &self.endpoint_url)
            .finish()
    }
}

fn validate_secret(secret: &str) -> Result<(), ConfigError> {
    if secret.trim().is_empty() {
        return Err(ConfigError::Empty(API_SECRET_VAR));
    }
    Ok(())
}

/// The endpoint must be an absolute http(s) URL.
fn validate_endpoint_url(endpoint_url: &str) -> Result<(), ConfigError> {
    if endpoint_url.trim().is_empty() {
        return Err(ConfigError::Empty(WEBHOOK_URL_VAR));
    }

    let parsed = Url::parse(endpoint_url).map_err(|e| ConfigError::InvalidUrl {
        url: endpoint_url.to_string(),
        reason: e.to_string(),
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::InvalidUrl {
            url: endpoint_url.to_string(),
            reason: format!("unsupported scheme {other}"),
        }),
    }
}
