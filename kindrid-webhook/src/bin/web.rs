//! Kindrid Web Server - webhook receiver for Kindrid donations.
//!
//! This binary:
//! - Receives Kindrid donation webhooks
//! - Verifies the HMAC-SHA1 signature against the configured secret and URL
//! - Decodes verified payloads and hands them to the donation consumer
//!
//! The consumer here only logs donations; real handling belongs to the
//! embedding application.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use tokio::{net::TcpListener, signal, sync::mpsc};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use kindrid::web::{self, AppState};
use kindrid::{Config, DonationEvent};

const EVENT_BUFFER: usize = 64;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize structured JSON logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().flatten_event(true))
        .init();

    info!("kindrid_web_starting");

    // Missing or invalid configuration stops startup here
    let config = Config::from_env().context("Failed to load configuration")?;
    info!(
        port = config.port,
        webhook_url = %config.webhook_url(),
        "config_loaded"
    );

    let (tx, rx) = mpsc::channel(EVENT_BUFFER);
    let consumer = tokio::spawn(consume_donations(rx));

    let app = web::router(AppState::new(config.verifier.clone(), tx));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!(address = %addr, "kindrid_web_listening");

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    // The router (and its sender) is gone, so the consumer drains and exits
    consumer.await.context("Donation consumer panicked")?;

    info!("kindrid_web_shutdown_complete");

    Ok(())
}

/// Log each verified donation until the channel closes.
async fn consume_donations(mut rx: mpsc::Receiver<DonationEvent>) {
    while let Some(donation) = rx.recv().await {
        info!(
            donation_id = %donation.id,
            status = %donation.status_raw,
            completed = donation.is_completed(),
            amount = %donation.amount,
            to = %donation.to,
            designation = %donation.designation,
            donor_id = %donation.donor.id,
            campus = %donation.donor.tags.campus_id(),
            "donation_received"
        );
    }

    info!("donation_consumer_stopped");
}

/// Resolve once SIGINT or SIGTERM arrives, so the receiver stops taking
/// donations and the consumer can drain.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let received = tokio::select! {
        _ = ctrl_c => "SIGINT",
        _ = terminate => "SIGTERM",
    };

    info!(signal = received, "kindrid_webhook_intake_stopping");
}
