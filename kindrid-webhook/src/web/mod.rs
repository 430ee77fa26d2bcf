//! Web server module for receiving Kindrid webhooks.
//!
//! A thin receiver that:
//! - Verifies the `X-Kindrid-Signature` header against the raw body
//! - Decodes the donation only after verification succeeds
//! - Forwards decoded donations to an in-process channel
//! - Returns immediately

pub mod handlers;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

pub use handlers::{health, kindrid_webhook, AppState, HealthResponse, WebhookResponse};

/// Build the receiver's router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/webhooks/kindrid", post(kindrid_webhook))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
