// src/services/order_items.rs

use crate::errors::{AppError, Result};
use crate::models::OrderItem;
use crate::services::orders::NewOrderItem;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::SqlitePool;
use tracing::instrument;

/// Quantity-only item update. The caller may supply the `updated_at` stamp;
/// when the field is left out the service stamps the current time.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemPatch {
  pub quantity: i64,
  pub updated_at: Option<DateTime<Utc>>,
}

/// Item operations scoped to existing orders, over the injected store handle.
#[derive(Clone)]
pub struct OrderItemService {
  pool: SqlitePool,
}

impl OrderItemService {
  pub fn new(pool: SqlitePool) -> Self {
    Self { pool }
  }

  /// Attach a new item to an existing order and return the item id. The
  /// parent order's `total_price` and `updated_at` are left untouched;
  /// `recompute_total` on the order service is the explicit repair for the
  /// resulting drift.
  #[instrument(name = "service::add_item", skip(self, item), fields(product_id = item.product_id))]
  pub async fn add_item(&self, order_id: i64, item: NewOrderItem) -> Result<i64> {
    item.validate()?;

    let mut tx = self.pool.begin().await?;

    // The item must attach to an existing order. The FK pragma would also
    // refuse the insert; this check reports absence as a 404 instead of a
    // constraint error.
    let order_exists: Option<i64> = sqlx::query_scalar("SELECT id FROM orders WHERE id = ?")
      .bind(order_id)
      .fetch_optional(&mut *tx)
      .await?;
    if order_exists.is_none() {
      return Err(AppError::NotFound("Order not found".to_string()));
    }

    let now = Utc::now();
    let item_id = sqlx::query(
      "INSERT INTO order_items (order_id, product_id, quantity, price, created_at, updated_at) \
       VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(order_id)
    .bind(item.product_id)
    .bind(item.quantity)
    .bind(item.price)
    .bind(now)
    .bind(now)
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

    tx.commit().await?;

    tracing::info!(order_id, item_id, "Order item created");
    Ok(item_id)
  }

  /// All items belonging to an order, oldest first. An unknown order id
  /// yields an empty list; after a cancel the listing comes back empty.
  #[instrument(name = "service::list_items", skip(self))]
  pub async fn list_items(&self, order_id: i64) -> Result<Vec<OrderItem>> {
    let items = sqlx::query_as(
      "SELECT id, order_id, product_id, quantity, price, created_at, updated_at \
       FROM order_items WHERE order_id = ? ORDER BY id",
    )
    .bind(order_id)
    .fetch_all(&self.pool)
    .await?;
    Ok(items)
  }

  /// Update an item's quantity and stamp. Returns false for a missing item.
  /// The parent order is not touched; its total is not recomputed.
  #[instrument(name = "service::update_item", skip(self, patch), fields(quantity = patch.quantity))]
  pub async fn update_item(&self, item_id: i64, patch: ItemPatch) -> Result<bool> {
    if patch.quantity <= 0 {
      return Err(AppError::Validation(format!(
        "Invalid quantity {}: must be a positive integer",
        patch.quantity
      )));
    }

    let updated_at = patch.updated_at.unwrap_or_else(Utc::now);
    let result = sqlx::query("UPDATE order_items SET quantity = ?, updated_at = ? WHERE id = ?")
      .bind(patch.quantity)
      .bind(updated_at)
      .bind(item_id)
      .execute(&self.pool)
      .await?;

    Ok(result.rows_affected() > 0)
  }

  /// Delete one item. Returns false for a missing item. The parent order's
  /// total is not adjusted.
  #[instrument(name = "service::delete_item", skip(self))]
  pub async fn delete_item(&self, item_id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM order_items WHERE id = ?")
      .bind(item_id)
      .execute(&self.pool)
      .await?;

    Ok(result.rows_affected() > 0)
  }
}
