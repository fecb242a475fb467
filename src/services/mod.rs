// src/services/mod.rs

//! Order and order-item operations over the storage pool.

pub mod order_items;
pub mod orders;

pub use order_items::{ItemPatch, OrderItemService};
pub use orders::{sum_of_prices, total_with_quantity, NewOrder, NewOrderItem, OrderService, PricedItem};
