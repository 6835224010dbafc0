//! # CareerPath API Server
//!
//! This is the main API server for CareerPath, providing endpoints for
//! user onboarding, profile management, and cached industry insights.
//!
//! ## Architecture
//!
//! The API server is built with Axum and provides:
//! - Session-authenticated user endpoints (onboarding status, current user,
//!   profile update)
//! - Lazy user record creation on first authenticated request
//! - Atomic, time-budgeted profile updates with insight generation
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p careerpath-api
//! ```

use std::sync::Arc;

use careerpath_api::{
    app::{build_router, AppState},
    config::Config,
};
use careerpath_shared::{
    db::{migrations::run_migrations, pool::create_pool},
    insights::HttpInsightGenerator,
    profile::{ProfileOptions, ProfileService},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "careerpath_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "CareerPath API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    // Load configuration
    let config = Config::from_env()?;

    // Initialize database pool and schema
    let db_config = careerpath_shared::db::pool::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    };
    let pool = create_pool(db_config).await?;
    run_migrations(&pool).await?;
    tracing::info!("Database pool ready, migrations applied");

    // Wire up the profile service
    let generator = Arc::new(HttpInsightGenerator::new(
        config.insights.generator_url.clone(),
        config.insights.generator_api_key.clone(),
    ));
    let profile = Arc::new(ProfileService::new(
        pool.clone(),
        generator,
        ProfileOptions {
            transaction_timeout: config.profile.tx_timeout(),
            race_policy: config.profile.race_policy,
        },
    ));

    let bind_address = config.bind_address();
    let state = AppState::new(pool, config, profile);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Waits for Ctrl+C
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install shutdown signal handler: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received, draining connections...");
}
