//! Notification service - entry point.

use notify_gateway::{SendGridClient, TwilioClient};
use notify_service::{
    api::{create_router, AppState, RequestQuota},
    config::{Config, LogFormat},
};
use otp_store::MemoryOtpStore;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    // Load configuration; missing provider credentials are fatal
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log.level));
    let subscriber = tracing_subscriber::registry().with(filter);
    match config.log.format {
        LogFormat::Json => subscriber.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => subscriber.with(tracing_subscriber::fmt::layer()).init(),
    }

    info!("Starting notification service");

    let twilio = match TwilioClient::new(
        &config.twilio.api_url,
        &config.twilio.account_sid,
        config.twilio.auth_token.clone(),
        &config.twilio.from_number,
        config.twilio.timeout,
    ) {
        Ok(c) => match &config.twilio.whatsapp_from {
            Some(number) => c.with_whatsapp_from(number),
            None => c,
        },
        Err(e) => {
            error!("Failed to create Twilio client: {}", e);
            std::process::exit(1);
        }
    };

    let sendgrid = match SendGridClient::new(
        &config.sendgrid.api_url,
        config.sendgrid.api_key.clone(),
        &config.sendgrid.from_email,
        config.sendgrid.from_name.clone(),
        config.sendgrid.timeout,
    ) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to create SendGrid client: {}", e);
            std::process::exit(1);
        }
    };

    let store = MemoryOtpStore::new(config.otp.ttl);

    let state = AppState::new(
        Arc::new(twilio),
        Arc::new(sendgrid),
        Arc::new(store),
        config.otp.single_use,
    );

    let quota = config
        .rate_limit
        .global_per_minute
        .and_then(RequestQuota::per_minute);
    if quota.is_some() {
        info!(per_minute = ?config.rate_limit.global_per_minute, "Request quota enabled");
    }
    let app = create_router(state, quota);

    let addr = SocketAddr::new(
        config.server.listen_addr.parse().unwrap_or([0, 0, 0, 0].into()),
        config.server.port,
    );

    info!("Listening on {}", addr);

    let listener = match TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
