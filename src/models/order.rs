// src/models/order.rs

use crate::errors::AppError;
use crate::models::OrderItem;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, Type as SqlxType};
use std::fmt;
use std::str::FromStr;

/// Lifecycle state of an order. Stored and serialized in its canonical
/// uppercase form; parsed case-insensitively at the input edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, SqlxType)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(rename_all = "UPPERCASE")]
pub enum OrderStatus {
  Pending,
  Processing,
  Shipped,
}

impl OrderStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      OrderStatus::Pending => "PENDING",
      OrderStatus::Processing => "PROCESSING",
      OrderStatus::Shipped => "SHIPPED",
    }
  }
}

impl fmt::Display for OrderStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for OrderStatus {
  type Err = AppError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "pending" => Ok(OrderStatus::Pending),
      "processing" => Ok(OrderStatus::Processing),
      "shipped" => Ok(OrderStatus::Shipped),
      other => Err(AppError::Validation(format!(
        "Invalid status '{}': expected one of pending, processing, shipped",
        other
      ))),
    }
  }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Order {
  pub id: i64,
  pub user_id: i64,
  pub total_price: f64,
  pub status: OrderStatus,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// An order together with its owned line items, serialized as one object
/// (items nested under an `items` key alongside the order fields).
#[derive(Debug, Serialize)]
pub struct OrderWithItems {
  #[serde(flatten)]
  pub order: Order,
  pub items: Vec<OrderItem>,
}

/// Reduced projection used by the by-user listing: no items, no timestamps.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct OrderSummary {
  pub id: i64,
  pub user_id: i64,
  pub total_price: f64,
  pub status: OrderStatus,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn status_parses_case_insensitively() {
    assert_eq!("pending".parse::<OrderStatus>().unwrap(), OrderStatus::Pending);
    assert_eq!("PENDING".parse::<OrderStatus>().unwrap(), OrderStatus::Pending);
    assert_eq!("Processing".parse::<OrderStatus>().unwrap(), OrderStatus::Processing);
    assert_eq!("sHiPpEd".parse::<OrderStatus>().unwrap(), OrderStatus::Shipped);
  }

  #[test]
  fn unknown_status_is_a_validation_error() {
    let err = "delivered".parse::<OrderStatus>().unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
  }

  #[test]
  fn status_serializes_in_canonical_case() {
    let json = serde_json::to_string(&OrderStatus::Pending).unwrap();
    assert_eq!(json, "\"PENDING\"");
    assert_eq!(OrderStatus::Shipped.as_str(), "SHIPPED");
  }

  #[test]
  fn order_with_items_flattens_fields() {
    let now = Utc::now();
    let order = OrderWithItems {
      order: Order {
        id: 7,
        user_id: 1,
        total_price: 40.0,
        status: OrderStatus::Pending,
        created_at: now,
        updated_at: now,
      },
      items: vec![],
    };

    let value = serde_json::to_value(&order).unwrap();
    assert_eq!(value["id"], 7);
    assert_eq!(value["status"], "PENDING");
    assert!(value["items"].as_array().unwrap().is_empty());
  }
}
