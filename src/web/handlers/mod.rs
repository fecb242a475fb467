// src/web/handlers/mod.rs

// Declare handler modules
pub mod order_handlers;
pub mod order_item_handlers;
