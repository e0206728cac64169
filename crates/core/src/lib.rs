//! Minimart Core - Shared types and cart logic.
//!
//! This crate provides the domain types used across the minimart workspace:
//! - `server` - HTTP binary serving the catalog, cart, and admin pages
//! - `integration-tests` - end-to-end tests against a running server
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no database
//! access, no HTTP. This keeps it lightweight and allows the cart semantics
//! to be tested without a server or a database.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids and money, plus the catalog
//!   [`Product`] record
//! - [`cart`] - The per-session cart mapping and checkout-total computation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;

pub use cart::{Cart, PricedCart, PricedLine, price_cart};
pub use types::*;
