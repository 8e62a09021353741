// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! StudentFit API Server
//!
//! Serves personalized plan generation and photo analysis backed by Gemini.

use std::sync::Arc;
use studentfit::{
    config::Config,
    services::{Coach, GeminiClient},
    AppState,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting StudentFit API");

    // A missing key keeps the server up; model routes report it per request
    let coach = match GeminiClient::from_config(&config) {
        Some(client) => {
            tracing::info!(model = %client.model(), "Gemini client initialized");
            Some(Coach::new(Arc::new(client)))
        }
        None => {
            tracing::error!("GEMINI_API_KEY not set; plan and photo analysis are disabled");
            None
        }
    };

    let state = Arc::new(AppState::new(config.clone(), coach));

    // Build router
    let app = studentfit::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            EnvFilter::from_default_env()
                .add_directive("studentfit=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
