// src/models/order_item.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// A single product line within an order.
///
/// `updated_at` starts equal to `created_at` and is only moved by the
/// item-update operation (which may carry a caller-supplied stamp).
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct OrderItem {
  pub id: i64,
  pub order_id: i64,
  pub product_id: i64,
  pub quantity: i64,
  pub price: f64,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}
