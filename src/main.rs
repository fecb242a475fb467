// src/main.rs

use actix_web::{web as actix_data, App, HttpServer};
use anyhow::Context;
use tracing_subscriber::EnvFilter;

use order_service::config::AppConfig;
use order_service::state::AppState;
use order_service::{db, web};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  // Initialize tracing subscriber for logging (RUST_LOG overrides the default)
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .init();

  tracing::info!("Starting order service...");

  // Load application configuration
  let app_config = AppConfig::from_env().context("Failed to load application configuration")?;

  // Initialize Database Pool
  let db_pool = db::init_pool(&app_config.database_url)
    .await
    .context("Failed to connect to the database")?;
  tracing::info!("Successfully connected to the database.");

  if app_config.run_migrations {
    db::run_migrations(&db_pool)
      .await
      .context("Failed to apply database migrations")?;
    tracing::info!("Database migrations applied.");
  }

  // Create AppState
  let app_state = AppState::new(db_pool);

  // Configure and Start Actix Web Server
  let server_address = format!("{}:{}", app_config.server_host, app_config.server_port);
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone())) // Share AppState with handlers
      .app_data(web::json_error_config())
      .wrap(tracing_actix_web::TracingLogger::default()) // Actix middleware for tracing requests
      .configure(web::configure_app_routes)
  })
  .bind(&server_address)?
  .run()
  .await?;

  Ok(())
}
