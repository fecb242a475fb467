// tests/common/mod.rs
#![allow(dead_code, unused_imports, unused_macros)] // Shared across test crates; not every crate uses every helper

use order_service::db::MIGRATOR;
use order_service::state::AppState;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

/// Fresh in-memory database with the schema applied. A single connection
/// keeps every query in the test on the same in-memory database.
pub async fn test_pool() -> SqlitePool {
  let pool = SqlitePoolOptions::new()
    .max_connections(1)
    .connect("sqlite::memory:")
    .await
    .expect("failed to open in-memory sqlite");

  MIGRATOR.run(&pool).await.expect("failed to apply migrations");
  pool
}

pub async fn test_state() -> AppState {
  AppState::new(test_pool().await)
}

// Builds an actix test app wired exactly like the real server: shared state,
// JSON error shaping, full route table.
macro_rules! init_app {
  ($state:expr) => {
    actix_web::test::init_service(
      actix_web::App::new()
        .app_data(actix_web::web::Data::new($state))
        .app_data(order_service::web::json_error_config())
        .configure(order_service::web::configure_app_routes),
    )
    .await
  };
}
pub(crate) use init_app;

// POSTs an order payload and hands back the store-assigned id.
macro_rules! create_order {
  ($app:expr, $body:expr) => {{
    let req = actix_web::test::TestRequest::post()
      .uri("/orders")
      .set_json(&$body)
      .to_request();
    let resp = actix_web::test::call_service(&$app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::CREATED);
    let body: serde_json::Value = actix_web::test::read_body_json(resp).await;
    body["order_id"].as_i64().expect("order_id in response")
  }};
}
pub(crate) use create_order;
