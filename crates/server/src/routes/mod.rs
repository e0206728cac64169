//! HTTP route handlers for minimart.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                   - Catalog grid
//! GET  /health             - Health check
//! GET  /health/ready       - Readiness check (database ping)
//!
//! # Catalog
//! GET  /product/{id}       - Product detail (404 for unknown ids)
//!
//! # Cart
//! POST /add-to-cart/{id}   - Merge quantity into the session cart,
//!                            redirect back to the referring page
//! GET  /cart               - Cart page with per-line subtotals and total
//! POST /update-cart        - Bulk overwrite quantities (qty_{id} fields),
//!                            redirect to /cart
//!
//! # Admin (Basic auth when MINIMART_ADMIN_PASSWORD is set)
//! GET  /admin              - Product list + creation form
//! POST /admin              - Create a product, redirect to /admin
//! ```

pub mod admin;
pub mod cart;
pub mod catalog;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create all routes for the storefront and admin pages.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog::index))
        .route("/product/{id}", get(catalog::show))
        .route("/add-to-cart/{id}", post(cart::add))
        .route("/cart", get(cart::show))
        .route("/update-cart", post(cart::update))
        .route("/admin", get(admin::index).post(admin::create))
}
