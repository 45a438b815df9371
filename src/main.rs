mod api;
mod app;
mod config;
mod db;
mod domain;
mod error;
mod logging;
mod routes;
mod services;

use anyhow::Result;

use services::{catalog_store, Mailer};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let settings = config::Settings::from_env()?;

    // Initialize logging
    logging::init_logging(&settings.env);

    tracing::info!(
        env = ?settings.env,
        server_addr = %settings.server_addr,
        "Starting garden room backend"
    );

    // Create database pool
    let pool = db::create_pool(&settings).await?;

    // Run migrations
    sqlx::migrate!().run(&pool).await?;

    // Backfill the launch price list on first run
    catalog_store::seed_defaults(&pool).await?;

    // Create mail provider client
    let mailer = Mailer::new(
        &settings.resend_api_key,
        &settings.enquiry_from,
        &settings.enquiry_to,
        settings.mailer_timeout_seconds,
    )?;

    // Create application state
    let state = app::AppState::new(pool, settings.clone(), mailer);

    // Build application
    let app = app::create_app(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&settings.server_addr).await?;
    tracing::info!("Listening on {}", settings.server_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
