//! Webhook endpoint handlers.
//!
//! The Kindrid handler only:
//! 1. Verifies the `X-Kindrid-Signature` header against the raw body
//! 2. Decodes the verified body
//! 3. Hands the donation to the event channel and returns
//!
//! Whatever happens to a donation afterwards is up to the channel consumer.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::payload::DonationEvent;
use crate::signature::{SignatureVerifier, SIGNATURE_HEADER};
use crate::verified::UnverifiedPayload;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub verifier: Arc<SignatureVerifier>,
    pub events: mpsc::Sender<DonationEvent>,
}

impl AppState {
    pub fn new(verifier: SignatureVerifier, events: mpsc::Sender<DonationEvent>) -> Self {
        Self {
            verifier: Arc::new(verifier),
            events,
        }
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// =============================================================================
// Kindrid Webhook
// =============================================================================

/// Webhook response.
#[derive(Serialize)]
pub struct WebhookResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub donation_id: Option<String>,
}

impl WebhookResponse {
    fn rejected(code: StatusCode, status: &'static str) -> (StatusCode, Json<WebhookResponse>) {
        (
            code,
            Json(WebhookResponse {
                status,
                donation_id: None,
            }),
        )
    }
}

/// Kindrid webhook endpoint.
///
/// The body is taken as raw bytes: the signature covers the exact bytes sent,
/// so it must be checked before any JSON extraction.
pub async fn kindrid_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok());

    info!(
        body_length = body.len(),
        has_signature = signature.is_some(),
        "kindrid_webhook_received"
    );

    let verified = match UnverifiedPayload::new(body).verify(&state.verifier, signature) {
        Ok(verified) => verified,
        Err(_) => {
            warn!("kindrid_webhook_unauthorized");
            return WebhookResponse::rejected(StatusCode::UNAUTHORIZED, "unauthorized");
        }
    };

    let donation = match verified.decode() {
        Ok(donation) => donation,
        Err(e) => {
            warn!(error = %e, "kindrid_webhook_malformed");
            return WebhookResponse::rejected(StatusCode::BAD_REQUEST, "malformed_payload");
        }
    };

    let donation_id = donation.id.clone();

    if let Err(e) = state.events.send(donation).await {
        error!(error = %e, donation_id = %donation_id, "kindrid_event_channel_closed");
        return WebhookResponse::rejected(StatusCode::SERVICE_UNAVAILABLE, "unavailable");
    }

    info!(donation_id = %donation_id, "kindrid_webhook_accepted");

    (
        StatusCode::OK,
        Json(WebhookResponse {
            status: "accepted",
            donation_id: Some(donation_id),
        }),
    )
}
