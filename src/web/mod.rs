// src/web/mod.rs

// Declare child modules
pub mod handlers;
pub mod routes;

// Re-export the routing configuration for main.rs and the integration tests.
pub use routes::{configure_app_routes, json_error_config};
