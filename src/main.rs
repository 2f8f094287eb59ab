// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Mergington Activities API Server
//!
//! Serves the activity catalog and the signup page for Mergington High
//! School extracurriculars.

use anyhow::Context;
use mergington_activities::{config::Config, services::ActivityRoster, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured JSON logging
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        port = config.port,
        enforce_capacity = config.enforce_capacity,
        "Starting Mergington Activities API"
    );

    config.static_dir_available();

    // Seed the roster
    let roster = match &config.activities_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "Loading activities");
            ActivityRoster::load_from_file(path, config.enforce_capacity)
                .context("Failed to load activities")?
        }
        None => {
            tracing::info!("Loading built-in activities");
            ActivityRoster::builtin(config.enforce_capacity)
                .context("Failed to load built-in activities")?
        }
    };

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        roster,
    });

    // Build router
    let app = mergington_activities::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() -> anyhow::Result<()> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mergington_activities=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();

    Ok(())
}
