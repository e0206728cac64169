//! Form DTOs and the numeric-coercion policy for user input.
//!
//! The storefront never rejects a request over a malformed number; every
//! numeric field has a declared fallback instead:
//!
//! | Field                        | Malformed or missing | Effect              |
//! |------------------------------|----------------------|---------------------|
//! | `quantity` on add-to-cart    | `1`                  | adds one unit       |
//! | `qty_{id}` on update-cart    | `0`                  | removes the line    |
//! | `price` on product creation  | `0.00`               | free product        |
//!
//! Update-cart fields that do not match `qty_{id}` with an integer id are
//! ignored. Duplicate fields keep the last value submitted.

use serde::Deserialize;

use minimart_core::{NewProduct, Price, ProductId};

/// Add-to-cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    #[serde(default)]
    pub quantity: Option<String>,
}

impl AddToCartForm {
    /// The quantity to merge into the cart; falls back to 1.
    #[must_use]
    pub fn quantity(&self) -> i64 {
        self.quantity
            .as_deref()
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .unwrap_or(1)
    }
}

/// Parsed update-cart submission: one absolute quantity per cart line.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CartUpdateForm {
    pub updates: Vec<(ProductId, i64)>,
}

impl CartUpdateForm {
    /// Build the update set from raw urlencoded pairs.
    ///
    /// The cart page submits one `qty_{id}` field per line, so the field
    /// names themselves carry product ids and cannot be a fixed struct.
    #[must_use]
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let updates = pairs
            .iter()
            .filter_map(|(name, value)| {
                let id = ProductId::parse(name.strip_prefix("qty_")?)?;
                let quantity = value.trim().parse::<i64>().unwrap_or(0);
                Some((id, quantity))
            })
            .collect();

        Self { updates }
    }
}

/// Admin product-creation form data.
#[derive(Debug, Deserialize)]
pub struct NewProductForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub image: String,
}

impl NewProductForm {
    /// Apply the coercion policy and produce the record to insert.
    ///
    /// The title is stored exactly as submitted, empty included; empty
    /// description and image become `NULL`.
    #[must_use]
    pub fn into_new_product(self) -> NewProduct {
        NewProduct {
            title: self.title,
            description: none_if_empty(self.description),
            price: Price::parse(&self.price).unwrap_or(Price::ZERO),
            image: none_if_empty(self.image),
        }
    }
}

fn none_if_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}
