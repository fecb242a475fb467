// src/services/orders.rs

use crate::errors::{AppError, Result};
use crate::models::{Order, OrderItem, OrderStatus, OrderSummary, OrderWithItems};
use chrono::Utc;
use serde::Deserialize;
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::instrument;

/// Input for order creation: the owning user, an initial status (any case)
/// and the initial line items, written atomically alongside the order.
#[derive(Debug, Clone, Deserialize)]
pub struct NewOrder {
  pub user_id: i64,
  pub status: String,
  pub items: Vec<NewOrderItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewOrderItem {
  pub product_id: i64,
  pub quantity: i64,
  pub price: f64,
}

impl NewOrderItem {
  /// Data-model constraints: positive quantity, non-negative unit price.
  pub fn validate(&self) -> Result<()> {
    if self.quantity <= 0 {
      return Err(AppError::Validation(format!(
        "Invalid quantity {}: must be a positive integer",
        self.quantity
      )));
    }
    if self.price.is_nan() || self.price < 0.0 {
      return Err(AppError::Validation(format!(
        "Invalid price {}: must be non-negative",
        self.price
      )));
    }
    Ok(())
  }
}

/// Line shape accepted by the standalone calculate-total operation. Only the
/// price matters there; any other fields in the payload are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct PricedItem {
  pub price: f64,
}

/// Sum of `quantity * price` over the supplied lines. This is the formula
/// order creation and `recompute_total` persist.
pub fn total_with_quantity(items: &[NewOrderItem]) -> f64 {
  items.iter().map(|item| item.quantity as f64 * item.price).sum()
}

/// Sum of the `price` fields only; quantity is not applied. The standalone
/// calculate-total endpoint has always behaved this way, so the two formulas
/// stay under separate names instead of being silently unified.
pub fn sum_of_prices(items: &[PricedItem]) -> f64 {
  items.iter().map(|item| item.price).sum()
}

/// Order operations over the injected store handle. Holds nothing besides
/// the pool; there is no global state.
#[derive(Clone)]
pub struct OrderService {
  pool: SqlitePool,
}

impl OrderService {
  pub fn new(pool: SqlitePool) -> Self {
    Self { pool }
  }

  /// Create an order plus its items as one atomic write and return the
  /// store-assigned order id.
  #[instrument(name = "service::create_order", skip(self, new_order), fields(user_id = new_order.user_id))]
  pub async fn create_order(&self, new_order: NewOrder) -> Result<i64> {
    let status = OrderStatus::from_str(&new_order.status)?;
    for item in &new_order.items {
      item.validate()?;
    }

    let total_price = total_with_quantity(&new_order.items);
    let now = Utc::now();

    let mut tx = self.pool.begin().await?;

    let order_id = sqlx::query(
      "INSERT INTO orders (user_id, total_price, status, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(new_order.user_id)
    .bind(total_price)
    .bind(status)
    .bind(now)
    .bind(now)
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

    for item in &new_order.items {
      sqlx::query(
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
      .await?;
    }

    tx.commit().await?;

    tracing::info!(order_id, total_price, "Order created");
    Ok(order_id)
  }

  /// Fetch one order with its items. Absence is `None`, never an error.
  #[instrument(name = "service::get_order", skip(self))]
  pub async fn get_order(&self, order_id: i64) -> Result<Option<OrderWithItems>> {
    let order: Option<Order> = sqlx::query_as(
      "SELECT id, user_id, total_price, status, created_at, updated_at FROM orders WHERE id = ?",
    )
    .bind(order_id)
    .fetch_optional(&self.pool)
    .await?;

    match order {
      Some(order) => {
        let items = self.items_for(order.id).await?;
        Ok(Some(OrderWithItems { order, items }))
      }
      None => Ok(None),
    }
  }

  /// All orders, each with its nested items.
  #[instrument(name = "service::list_orders", skip(self))]
  pub async fn list_orders(&self) -> Result<Vec<OrderWithItems>> {
    let orders: Vec<Order> = sqlx::query_as(
      "SELECT id, user_id, total_price, status, created_at, updated_at FROM orders ORDER BY id",
    )
    .fetch_all(&self.pool)
    .await?;

    self.with_items(orders).await
  }

  /// Orders belonging to one user, reduced to summary fields (no items,
  /// no timestamps).
  #[instrument(name = "service::list_orders_by_user", skip(self))]
  pub async fn list_orders_by_user(&self, user_id: i64) -> Result<Vec<OrderSummary>> {
    let orders = sqlx::query_as("SELECT id, user_id, total_price, status FROM orders WHERE user_id = ? ORDER BY id")
      .bind(user_id)
      .fetch_all(&self.pool)
      .await?;
    Ok(orders)
  }

  /// Orders whose status matches `status` (parsed case-insensitively, so
  /// "pending" and "PENDING" address the same set), with nested items.
  #[instrument(name = "service::list_orders_by_status", skip(self))]
  pub async fn list_orders_by_status(&self, status: &str) -> Result<Vec<OrderWithItems>> {
    let status = OrderStatus::from_str(status)?;
    let orders: Vec<Order> = sqlx::query_as(
      "SELECT id, user_id, total_price, status, created_at, updated_at FROM orders WHERE status = ? ORDER BY id",
    )
    .bind(status)
    .fetch_all(&self.pool)
    .await?;

    self.with_items(orders).await
  }

  /// Overwrite the status of an existing order and refresh `updated_at`.
  /// Any status may replace any other, the current value included; there
  /// is no transition table. Returns false when the order does not exist.
  #[instrument(name = "service::update_status", skip(self))]
  pub async fn update_status(&self, order_id: i64, status: &str) -> Result<bool> {
    let status = OrderStatus::from_str(status)?;

    let result = sqlx::query("UPDATE orders SET status = ?, updated_at = ? WHERE id = ?")
      .bind(status)
      .bind(Utc::now())
      .bind(order_id)
      .execute(&self.pool)
      .await?;

    let updated = result.rows_affected() > 0;
    if updated {
      tracing::info!(order_id, status = %status, "Order status updated");
    }
    Ok(updated)
  }

  /// Delete the order and all of its items in one transaction. The cascade
  /// is spelled out here instead of being delegated to the schema. Returns
  /// false (with nothing written) when the order does not exist.
  #[instrument(name = "service::cancel_order", skip(self))]
  pub async fn cancel_order(&self, order_id: i64) -> Result<bool> {
    let mut tx = self.pool.begin().await?;

    sqlx::query("DELETE FROM order_items WHERE order_id = ?")
      .bind(order_id)
      .execute(&mut *tx)
      .await?;

    let result = sqlx::query("DELETE FROM orders WHERE id = ?")
      .bind(order_id)
      .execute(&mut *tx)
      .await?;

    if result.rows_affected() == 0 {
      // Nothing to cancel; the dropped transaction rolls back.
      return Ok(false);
    }

    tx.commit().await?;

    tracing::info!(order_id, "Order canceled with its items");
    Ok(true)
  }

  /// The authoritative repair for total drift: recompute the stored total
  /// from the order's current items (quantity * price) and refresh
  /// `updated_at`. Item-level mutations never trigger this implicitly.
  #[instrument(name = "service::recompute_total", skip(self))]
  pub async fn recompute_total(&self, order_id: i64) -> Result<Option<f64>> {
    let mut tx = self.pool.begin().await?;

    let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM orders WHERE id = ?")
      .bind(order_id)
      .fetch_optional(&mut *tx)
      .await?;
    if exists.is_none() {
      return Ok(None);
    }

    let total_price: f64 = sqlx::query_scalar(
      "SELECT COALESCE(SUM(quantity * price), 0.0) FROM order_items WHERE order_id = ?",
    )
    .bind(order_id)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query("UPDATE orders SET total_price = ?, updated_at = ? WHERE id = ?")
      .bind(total_price)
      .bind(Utc::now())
      .bind(order_id)
      .execute(&mut *tx)
      .await?;

    tx.commit().await?;

    tracing::info!(order_id, total_price, "Order total recomputed from items");
    Ok(Some(total_price))
  }

  async fn with_items(&self, orders: Vec<Order>) -> Result<Vec<OrderWithItems>> {
    let mut out = Vec::with_capacity(orders.len());
    for order in orders {
      let items = self.items_for(order.id).await?;
      out.push(OrderWithItems { order, items });
    }
    Ok(out)
  }

  async fn items_for(&self, order_id: i64) -> Result<Vec<OrderItem>> {
    let items = sqlx::query_as(
      "SELECT id, order_id, product_id, quantity, price, created_at, updated_at \
       FROM order_items WHERE order_id = ? ORDER BY id",
    )
    .bind(order_id)
    .fetch_all(&self.pool)
    .await?;
    Ok(items)
  }
}
