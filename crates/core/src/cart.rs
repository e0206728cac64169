//! Shopping cart contents and pricing.
//!
//! A [`Cart`] is the session-resident mapping of product id to quantity.
//! It deliberately stores nothing else; titles and prices are looked up
//! from the catalog at render time via [`price_cart`], so a price change
//! is reflected the next time the cart page loads.
//!
//! Keys are the string form of the product id because the cart lives in
//! the session as a JSON object. Entries whose key does not parse back
//! into an id are ignored rather than treated as corruption.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::types::{Price, Product, ProductId};

/// Product-id-to-quantity mapping stored in the visitor session.
///
/// ## Constraints
///
/// - Every stored quantity is at least 1; updates that would drop a line
///   to zero or below remove it instead
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart(BTreeMap<String, u32>);

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of distinct lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Quantity for a product, or `None` when it is not in the cart.
    #[must_use]
    pub fn quantity(&self, id: ProductId) -> Option<u32> {
        self.0.get(&id.to_string()).copied()
    }

    /// Merge `delta` units into the line for `id`.
    ///
    /// Adding to an existing line increases its quantity; a merged
    /// quantity of zero or below removes the line.
    pub fn add(&mut self, id: ProductId, delta: i64) {
        let current = self.quantity(id).map_or(0, i64::from);
        self.set(id, current.saturating_add(delta));
    }

    /// Overwrite the line for `id` with an absolute quantity.
    ///
    /// A quantity of zero or below removes the line.
    pub fn set(&mut self, id: ProductId, quantity: i64) {
        if quantity <= 0 {
            self.0.remove(&id.to_string());
        } else {
            let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
            self.0.insert(id.to_string(), quantity);
        }
    }

    /// Apply a batch of absolute quantities, one per line.
    pub fn apply<I>(&mut self, updates: I)
    where
        I: IntoIterator<Item = (ProductId, i64)>,
    {
        for (id, quantity) in updates {
            self.set(id, quantity);
        }
    }

    /// Cart lines in ascending product-id order.
    ///
    /// Keys that do not parse as product ids are skipped.
    #[must_use]
    pub fn lines(&self) -> Vec<(ProductId, u32)> {
        let mut lines: Vec<(ProductId, u32)> = self
            .0
            .iter()
            .filter_map(|(key, &quantity)| ProductId::parse(key).map(|id| (id, quantity)))
            .collect();
        lines.sort_unstable_by_key(|&(id, _)| id.as_i64());
        lines
    }
}

/// A cart line joined against the catalog, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricedLine {
    pub product: Product,
    pub quantity: u32,
    /// `product.price` multiplied by `quantity`.
    pub subtotal: Price,
}

/// A fully priced cart: resolved lines plus their grand total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricedCart {
    pub lines: Vec<PricedLine>,
    pub total: Price,
}

impl PricedCart {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Join cart lines against the given catalog slice and total them.
///
/// Lines whose product id no longer resolves (the product was removed
/// after it went into the cart) are dropped from the result; the total
/// covers resolved lines only.
#[must_use]
pub fn price_cart(cart: &Cart, products: &[Product]) -> PricedCart {
    let by_id: HashMap<ProductId, &Product> = products.iter().map(|p| (p.id, p)).collect();

    let lines: Vec<PricedLine> = cart
        .lines()
        .into_iter()
        .filter_map(|(id, quantity)| {
            by_id.get(&id).map(|&product| PricedLine {
                product: product.clone(),
                quantity,
                subtotal: product.price.times(quantity),
            })
        })
        .collect();

    let total = lines.iter().map(|line| line.subtotal).sum();

    PricedCart { lines, total }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn product(id: i64, cents: i64) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            description: None,
            price: Price::from_cents(cents),
            image: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_add_merges_into_existing_line() {
        let mut cart = Cart::new();
        cart.add(ProductId::new(7), 3);
        cart.add(ProductId::new(7), 2);

        assert_eq!(cart.quantity(ProductId::new(7)), Some(5));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_set_overwrites_instead_of_merging() {
        let mut cart = Cart::new();
        cart.set(ProductId::new(7), 2);
        cart.set(ProductId::new(7), 5);

        assert_eq!(cart.quantity(ProductId::new(7)), Some(5));
    }

    #[test]
    fn test_set_zero_or_below_removes_the_line() {
        let mut cart = Cart::new();
        cart.set(ProductId::new(1), 4);
        cart.set(ProductId::new(1), 0);
        assert!(cart.is_empty());

        cart.set(ProductId::new(1), 4);
        cart.set(ProductId::new(1), -2);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_apply_updates_each_line_independently() {
        let mut cart = Cart::new();
        cart.set(ProductId::new(1), 1);
        cart.set(ProductId::new(2), 2);

        cart.apply([(ProductId::new(1), 3), (ProductId::new(2), 0)]);

        assert_eq!(cart.quantity(ProductId::new(1)), Some(3));
        assert_eq!(cart.quantity(ProductId::new(2)), None);
    }

    #[test]
    fn test_lines_sort_numerically_not_lexicographically() {
        let mut cart = Cart::new();
        cart.set(ProductId::new(10), 1);
        cart.set(ProductId::new(2), 1);

        let ids: Vec<i64> = cart.lines().into_iter().map(|(id, _)| id.as_i64()).collect();
        assert_eq!(ids, vec![2, 10]);
    }

    #[test]
    fn test_lines_skip_keys_that_are_not_ids() {
        let cart: Cart =
            serde_json::from_value(serde_json::json!({ "3": 2, "gift-card": 1 })).unwrap();

        assert_eq!(cart.lines(), vec![(ProductId::new(3), 2)]);
    }

    #[test]
    fn test_price_cart_totals_lines_exactly() {
        let catalog = [product(1, 10_000), product(2, 1_999)];
        let mut cart = Cart::new();
        cart.set(ProductId::new(1), 2);
        cart.set(ProductId::new(2), 1);

        let priced = price_cart(&cart, &catalog);

        assert_eq!(priced.lines.len(), 2);
        assert_eq!(priced.lines[0].subtotal, Price::from_cents(20_000));
        assert_eq!(priced.lines[1].subtotal, Price::from_cents(1_999));
        assert_eq!(priced.total, Price::from_cents(21_999));
    }

    #[test]
    fn test_price_cart_drops_lines_for_missing_products() {
        let catalog = [product(1, 500)];
        let mut cart = Cart::new();
        cart.set(ProductId::new(1), 1);
        cart.set(ProductId::new(999), 3);

        let priced = price_cart(&cart, &catalog);

        assert_eq!(priced.lines.len(), 1);
        assert_eq!(priced.lines[0].product.id, ProductId::new(1));
        assert_eq!(priced.total, Price::from_cents(500));
    }

    #[test]
    fn test_price_cart_on_empty_cart() {
        let priced = price_cart(&Cart::new(), &[product(1, 500)]);

        assert!(priced.is_empty());
        assert_eq!(priced.total, Price::ZERO);
    }
}
