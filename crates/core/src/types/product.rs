//! Catalog product records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// A product as stored in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    /// Free-form description shown on the detail page; may be absent.
    pub description: Option<String>,
    pub price: Price,
    /// Path or URL of the product image. Listings fall back to a
    /// placeholder when this is `None`.
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields required to create a product; the id and creation timestamp
/// are assigned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub title: String,
    pub description: Option<String>,
    pub price: Price,
    pub image: Option<String>,
}
