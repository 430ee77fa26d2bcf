//! Verify-then-decode protocol for inbound webhook bodies.
//!
//! ```text
//! raw body → UnverifiedPayload → verify() → VerifiedPayload → decode() → DonationEvent
//! ```
//!
//! A [`DonationEvent`] can only be produced from a [`VerifiedPayload`], and a
//! `VerifiedPayload` can only be produced by a successful signature check.

use tracing::{debug, info};

use crate::error::WebhookError;
use crate::payload::{self, DonationEvent};
use crate::signature::SignatureVerifier;

/// Raw request body whose signature has not been checked yet.
#[derive(Debug, Clone)]
pub struct UnverifiedPayload {
    body: Vec<u8>,
}

impl UnverifiedPayload {
    /// Wrap the body exactly as received, before any parsing.
    pub fn new(body: impl Into<Vec<u8>>) -> Self {
        Self { body: body.into() }
    }

    /// Check `signature` (the `X-Kindrid-Signature` header, if any) against
    /// the body.
    pub fn verify(
        self,
        verifier: &SignatureVerifier,
        signature: Option<&str>,
    ) -> Result<VerifiedPayload, WebhookError> {
        if !verifier.verify(signature, &self.body) {
            return Err(WebhookError::SignatureMismatch);
        }

        debug!(body_length = self.body.len(), "kindrid_signature_verified");

        Ok(VerifiedPayload { body: self.body })
    }
}

/// Request body that passed signature verification.
///
/// This is the only way to decode a body. The donation types do not
/// implement `Deserialize`, so they cannot be parsed from unverified bytes:
///
/// ```compile_fail
/// let body = br#"{"donation":{"status":"completed","amount":9999.99,"id":"forged"}}"#;
/// let donation: kindrid::DonationEvent = serde_json::from_slice(body).unwrap();
/// ```
///
/// Nor can a `VerifiedPayload` be built without going through
/// [`UnverifiedPayload::verify`]:
///
/// ```compile_fail
/// let verified = kindrid::VerifiedPayload { body: b"{}".to_vec() };
/// ```
///
/// The supported path:
///
/// ```
/// use kindrid::{SignatureVerifier, UnverifiedPayload};
///
/// let verifier = SignatureVerifier::new("abc123", "https://example.com/endpoint").unwrap();
/// let body = br#"{"donation":{"status":"completed","amount":12.12,"id":"abc"}}"#;
/// let signature = verifier.expected_signature(body);
///
/// let donation = UnverifiedPayload::new(body.to_vec())
///     .verify(&verifier, Some(&signature))
///     .unwrap()
///     .decode()
///     .unwrap();
/// assert!(donation.is_completed());
/// ```
#[derive(Debug, Clone)]
pub struct VerifiedPayload {
    body: Vec<u8>,
}

impl VerifiedPayload {
    pub fn as_bytes(&self) -> &[u8] {
        &self.body
    }

    /// Decode the body into a [`DonationEvent`].
    pub fn decode(&self) -> Result<DonationEvent, WebhookError> {
        let donation = payload::decode(&self.body)?;

        info!(
            donation_id = %donation.id,
            status = %donation.status_raw,
            amount = %donation.amount,
            "kindrid_payload_decoded"
        );

        Ok(donation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{API_SECRET, ENDPOINT_URL, REAL_SAMPLE, REAL_SAMPLE_SIGNATURE};
    use crate::signature::{compute_signature, signing_message};
    use rust_decimal::Decimal;

    fn verifier() -> SignatureVerifier {
        SignatureVerifier::new(API_SECRET, ENDPOINT_URL).unwrap()
    }

    #[test]
    fn test_end_to_end_real_sample() {
        let message = signing_message(ENDPOINT_URL, REAL_SAMPLE.as_bytes());
        assert_eq!(
            compute_signature(&message, API_SECRET.as_bytes()),
            REAL_SAMPLE_SIGNATURE
        );

        let donation = UnverifiedPayload::new(REAL_SAMPLE)
            .verify(&verifier(), Some(REAL_SAMPLE_SIGNATURE))
            .unwrap()
            .decode()
            .unwrap();

        assert_eq!(donation.status_raw, "completed");
        assert_eq!(donation.amount, Decimal::new(1212, 2));
        assert_eq!(donation.donor.tags.campus_id(), "58629938b5ef8a00019b721f");
    }

    #[test]
    fn test_uppercase_header_accepted() {
        let header = REAL_SAMPLE_SIGNATURE.to_uppercase();
        let verified = UnverifiedPayload::new(REAL_SAMPLE).verify(&verifier(), Some(&header));
        assert!(verified.is_ok());
    }

    #[test]
    fn test_missing_header_rejected() {
        let err = UnverifiedPayload::new(REAL_SAMPLE)
            .verify(&verifier(), None)
            .unwrap_err();
        assert!(matches!(err, WebhookError::SignatureMismatch));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let other = SignatureVerifier::new("not-the-secret", ENDPOINT_URL).unwrap();
        let err = UnverifiedPayload::new(REAL_SAMPLE)
            .verify(&other, Some(REAL_SAMPLE_SIGNATURE))
            .unwrap_err();
        assert!(matches!(err, WebhookError::SignatureMismatch));
    }

    #[test]
    fn test_reformatted_body_rejected() {
        let pretty = serde_json::to_string_pretty(
            &serde_json::from_str::<serde_json::Value>(REAL_SAMPLE).unwrap(),
        )
        .unwrap();
        let err = UnverifiedPayload::new(pretty)
            .verify(&verifier(), Some(REAL_SAMPLE_SIGNATURE))
            .unwrap_err();
        assert!(matches!(err, WebhookError::SignatureMismatch));
    }

    #[test]
    fn test_verified_but_malformed() {
        let body = br#"{"donation":{"status":"comp"#;
        let signature = verifier().expected_signature(body);

        let verified = UnverifiedPayload::new(body.to_vec())
            .verify(&verifier(), Some(&signature))
            .unwrap();
        assert_eq!(verified.as_bytes(), body);
        assert!(matches!(
            verified.decode(),
            Err(WebhookError::MalformedPayload(_))
        ));
    }
}
