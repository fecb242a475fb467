// src/web/handlers/order_item_handlers.rs

use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::errors::AppError;
use crate::services::{ItemPatch, NewOrderItem};
use crate::state::AppState;

#[instrument(name = "handler::create_order_item", skip(app_state, path, payload), fields(order_id = %path.as_ref()))]
pub async fn create_order_item_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
  payload: web::Json<NewOrderItem>,
) -> Result<HttpResponse, AppError> {
  let order_id = path.into_inner();
  let item_id = app_state.order_items.add_item(order_id, payload.into_inner()).await?;

  info!(order_id, item_id, "New order item created");
  Ok(HttpResponse::Created().json(json!({
      "message": "New order item created",
      "item_id": item_id
  })))
}

#[instrument(name = "handler::list_order_items", skip(app_state, path), fields(order_id = %path.as_ref()))]
pub async fn list_order_items_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
  let items = app_state.order_items.list_items(path.into_inner()).await?;
  Ok(HttpResponse::Ok().json(items))
}

#[instrument(name = "handler::update_order_item", skip(app_state, path, payload), fields(item_id = %path.as_ref()))]
pub async fn update_order_item_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
  payload: web::Json<ItemPatch>,
) -> Result<HttpResponse, AppError> {
  let item_id = path.into_inner();

  if app_state.order_items.update_item(item_id, payload.into_inner()).await? {
    Ok(HttpResponse::Ok().json(json!({"message": "Order item updated"})))
  } else {
    warn!(item_id, "Order item not found");
    Ok(HttpResponse::NotFound().json(json!({"message": "Order item not found"})))
  }
}

#[instrument(name = "handler::delete_order_item", skip(app_state, path), fields(item_id = %path.as_ref()))]
pub async fn delete_order_item_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
  let item_id = path.into_inner();

  if app_state.order_items.delete_item(item_id).await? {
    Ok(HttpResponse::Ok().json(json!({"message": "Order item deleted"})))
  } else {
    warn!(item_id, "Order item not found");
    Ok(HttpResponse::NotFound().json(json!({"message": "Order item not found"})))
  }
}
