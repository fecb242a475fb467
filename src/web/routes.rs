// src/web/routes.rs

use actix_web::{web, HttpResponse};

use crate::web::handlers::{order_handlers, order_item_handlers};

// Liveness probe; no collaborator checks behind it.
async fn health_check_handler() -> HttpResponse {
  HttpResponse::Ok().json(serde_json::json!({ "status": "healthy" }))
}

/// JSON body rejections (malformed payloads, missing required fields) come
/// back as the API's uniform 400 error shape instead of actix's plain-text
/// default.
pub fn json_error_config() -> web::JsonConfig {
  web::JsonConfig::default().error_handler(|err, _req| {
    let message = err.to_string();
    actix_web::error::InternalError::from_response(
      err,
      HttpResponse::BadRequest().json(serde_json::json!({ "error": message })),
    )
    .into()
  })
}

// This function is called in `main.rs` (and by the integration tests) to
// configure services for the Actix App.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg
    // Health Check Route
    .route("/health", web::get().to(health_check_handler))
    .service(
      web::scope("/orders")
        .route("", web::post().to(order_handlers::create_order_handler))
        .route("", web::get().to(order_handlers::list_orders_handler))
        // Fixed-path routes go first so they never collide with `{order_id}`.
        .route(
          "/calculate-total",
          web::post().to(order_handlers::calculate_total_handler),
        )
        .route(
          "/user/{user_id}",
          web::get().to(order_handlers::list_orders_by_user_handler),
        )
        .route(
          "/status/{status}",
          web::get().to(order_handlers::list_orders_by_status_handler),
        )
        .route(
          "/items/{item_id}",
          web::patch().to(order_item_handlers::update_order_item_handler),
        )
        .route(
          "/items/{item_id}",
          web::delete().to(order_item_handlers::delete_order_item_handler),
        )
        .route("/{order_id}", web::get().to(order_handlers::get_order_handler))
        .route(
          "/{order_id}",
          web::patch().to(order_handlers::update_order_status_handler),
        )
        .route("/{order_id}", web::delete().to(order_handlers::cancel_order_handler))
        .route(
          "/{order_id}/recompute-total",
          web::post().to(order_handlers::recompute_total_handler),
        )
        .route(
          "/{order_id}/items",
          web::post().to(order_item_handlers::create_order_item_handler),
        )
        .route(
          "/{order_id}/items",
          web::get().to(order_item_handlers::list_order_items_handler),
        ),
    );
}
