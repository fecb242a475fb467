// src/web/handlers/order_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::errors::AppError;
use crate::services::{sum_of_prices, NewOrder, PricedItem};
use crate::state::AppState;

// --- Request DTOs ---

#[derive(Deserialize, Debug)]
pub struct StatusPatch {
  pub status: String,
}

#[derive(Deserialize, Debug)]
pub struct CalculateTotalRequest {
  // `order_items` is the wire name this endpoint has always used.
  pub order_items: Vec<PricedItem>,
}

// --- Handler Implementations ---

#[instrument(name = "handler::create_order", skip(app_state, payload), fields(user_id = payload.user_id))]
pub async fn create_order_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<NewOrder>,
) -> Result<HttpResponse, AppError> {
  let order_id = app_state.orders.create_order(payload.into_inner()).await?;

  info!(order_id, "New order created");
  Ok(HttpResponse::Created().json(json!({
      "message": "New order created",
      "order_id": order_id
  })))
}

#[instrument(name = "handler::list_orders", skip(app_state))]
pub async fn list_orders_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let orders = app_state.orders.list_orders().await?;
  Ok(HttpResponse::Ok().json(orders))
}

#[instrument(name = "handler::get_order", skip(app_state, path), fields(order_id = %path.as_ref()))]
pub async fn get_order_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
  let order_id = path.into_inner();

  match app_state.orders.get_order(order_id).await? {
    Some(order) => Ok(HttpResponse::Ok().json(order)),
    None => {
      warn!(order_id, "Order not found");
      Ok(HttpResponse::NotFound().json(json!({"message": "Order not found"})))
    }
  }
}

#[instrument(name = "handler::update_order_status", skip(app_state, path, payload), fields(order_id = %path.as_ref()))]
pub async fn update_order_status_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
  payload: web::Json<StatusPatch>,
) -> Result<HttpResponse, AppError> {
  let order_id = path.into_inner();

  if app_state.orders.update_status(order_id, &payload.status).await? {
    Ok(HttpResponse::Ok().json(json!({"message": "Order status updated"})))
  } else {
    warn!(order_id, "Order not found");
    Ok(HttpResponse::NotFound().json(json!({"message": "Order not found"})))
  }
}

#[instrument(name = "handler::list_orders_by_user", skip(app_state, path), fields(user_id = %path.as_ref()))]
pub async fn list_orders_by_user_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
  let orders = app_state.orders.list_orders_by_user(path.into_inner()).await?;
  Ok(HttpResponse::Ok().json(orders))
}

#[instrument(name = "handler::cancel_order", skip(app_state, path), fields(order_id = %path.as_ref()))]
pub async fn cancel_order_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
  let order_id = path.into_inner();

  if app_state.orders.cancel_order(order_id).await? {
    Ok(HttpResponse::Ok().json(json!({"message": "Order canceled"})))
  } else {
    warn!(order_id, "Order not found");
    Ok(HttpResponse::NotFound().json(json!({"message": "Order not found"})))
  }
}

#[instrument(name = "handler::list_orders_by_status", skip(app_state, path), fields(status = %path.as_ref()))]
pub async fn list_orders_by_status_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let orders = app_state.orders.list_orders_by_status(&path.into_inner()).await?;
  Ok(HttpResponse::Ok().json(orders))
}

#[instrument(name = "handler::calculate_total", skip(payload))]
pub async fn calculate_total_handler(
  payload: web::Json<CalculateTotalRequest>,
) -> Result<HttpResponse, AppError> {
  let items = payload.into_inner().order_items;
  if items.is_empty() {
    return Err(AppError::Validation("No order items provided".to_string()));
  }

  // Price-only sum; this surface never multiplied by quantity.
  let total_price = sum_of_prices(&items);
  Ok(HttpResponse::Ok().json(json!({"total_price": total_price})))
}

#[instrument(name = "handler::recompute_total", skip(app_state, path), fields(order_id = %path.as_ref()))]
pub async fn recompute_total_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
  let order_id = path.into_inner();

  match app_state.orders.recompute_total(order_id).await? {
    Some(total_price) => Ok(HttpResponse::Ok().json(json!({
        "order_id": order_id,
        "total_price": total_price
    }))),
    None => {
      warn!(order_id, "Order not found");
      Ok(HttpResponse::NotFound().json(json!({"message": "Order not found"})))
    }
  }
}
