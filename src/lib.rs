// src/lib.rs

//! Order management HTTP service: the order aggregate (status lifecycle,
//! owned line items, total-price rules) over a SQLite store, exposed
//! through actix-web.

pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod services;
pub mod state;
pub mod web;
