// src/state.rs

use crate::services::{OrderItemService, OrderService};
use sqlx::SqlitePool;

/// Shared application state handed to every handler: the two pool-injected
/// services. No other mutable state lives in the process.
#[derive(Clone)]
pub struct AppState {
  pub orders: OrderService,
  pub order_items: OrderItemService,
}

impl AppState {
  pub fn new(pool: SqlitePool) -> Self {
    Self {
      orders: OrderService::new(pool.clone()),
      order_items: OrderItemService::new(pool),
    }
  }
}
