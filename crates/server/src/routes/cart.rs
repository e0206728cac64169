//! Cart route handlers.
//!
//! The cart itself is a plain id-to-quantity map in the session; these
//! handlers join it against the catalog at render time so the page always
//! shows current titles and prices. All mutations redirect (303) back to a
//! GET page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    http::HeaderMap,
    http::header::REFERER,
    response::Redirect,
};
use tower_sessions::Session;
use tracing::instrument;
use url::Url;

use minimart_core::{Price, PricedCart, ProductId, price_cart};

use crate::db::ProductRepository;
use crate::error::Result;
use crate::filters;
use crate::forms::{AddToCartForm, CartUpdateForm};
use crate::session::{load_cart, push_flash, save_cart, take_flash};
use crate::state::AppState;

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartLineView {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    pub quantity: u32,
    pub subtotal: Price,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub total: Price,
}

impl CartView {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl From<PricedCart> for CartView {
    fn from(priced: PricedCart) -> Self {
        Self {
            lines: priced
                .lines
                .into_iter()
                .map(|line| CartLineView {
                    id: line.product.id,
                    title: line.product.title,
                    price: line.product.price,
                    quantity: line.quantity,
                    subtotal: line.subtotal,
                })
                .collect(),
            total: priced.total,
        }
    }
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
    pub flash: Option<String>,
}

/// Display the cart page.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<CartShowTemplate> {
    let cart = load_cart(&session).await;
    let products = ProductRepository::new(state.pool()).list().await?;
    let priced = price_cart(&cart, &products);
    let flash = take_flash(&session).await;

    Ok(CartShowTemplate {
        cart: CartView::from(priced),
        flash,
    })
}

/// Merge a quantity into the cart line for a product.
///
/// Touches only the session: the id is not checked against the catalog,
/// and a line that stops resolving is dropped at render time instead.
/// Redirects back to the page the form was submitted from.
#[instrument(skip(session, headers))]
pub async fn add(
    session: Session,
    Path(raw_id): Path<String>,
    headers: HeaderMap,
    Form(form): Form<AddToCartForm>,
) -> Result<Redirect> {
    let back = headers
        .get(REFERER)
        .and_then(|value| value.to_str().ok())
        .and_then(back_path)
        .unwrap_or_else(|| "/".to_string());

    if let Some(id) = ProductId::parse(&raw_id) {
        let mut cart = load_cart(&session).await;
        cart.add(id, form.quantity());
        save_cart(&session, &cart).await?;
        push_flash(&session, "Added to cart.").await?;
    }

    Ok(Redirect::to(&back))
}

/// Apply the cart page's bulk quantity update.
///
/// The form field names carry the product ids (`qty_{id}`), so the body is
/// taken as raw pairs and parsed by [`CartUpdateForm`].
#[instrument(skip(session, pairs))]
pub async fn update(
    session: Session,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Redirect> {
    let form = CartUpdateForm::from_pairs(&pairs);

    let mut cart = load_cart(&session).await;
    cart.apply(form.updates);
    save_cart(&session, &cart).await?;
    push_flash(&session, "Cart updated.").await?;

    Ok(Redirect::to("/cart"))
}

/// Reduce a Referer header value to a local path for redirecting back.
///
/// Accepts rooted paths as-is and strips http(s) URLs down to their
/// path+query. Anything else (other schemes, protocol-relative URLs,
/// unparseable values) is rejected so the redirect can never leave the
/// site.
fn back_path(referer: &str) -> Option<String> {
    if referer.starts_with('/') && !referer.starts_with("//") {
        return Some(referer.to_string());
    }

    let url = Url::parse(referer).ok()?;
    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }

    let mut path = url.path().to_string();
    if let Some(query) = url.query() {
        path.push('?');
        path.push_str(query);
    }
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_back_path_keeps_rooted_paths() {
        assert_eq!(back_path("/product/3"), Some("/product/3".to_string()));
    }

    #[test]
    fn test_back_path_reduces_absolute_urls() {
        assert_eq!(
            back_path("http://localhost:3000/product/3?ref=grid"),
            Some("/product/3?ref=grid".to_string())
        );
        assert_eq!(
            back_path("https://shop.example.com/cart"),
            Some("/cart".to_string())
        );
    }

    #[test]
    fn test_back_path_rejects_other_schemes() {
        assert_eq!(back_path("javascript:alert(1)"), None);
        assert_eq!(back_path("data:text/html,hi"), None);
    }

    #[test]
    fn test_back_path_rejects_protocol_relative_urls() {
        assert_eq!(back_path("//evil.example.com/"), None);
    }

    #[test]
    fn test_back_path_rejects_garbage() {
        assert_eq!(back_path("not a url"), None);
        assert_eq!(back_path(""), None);
    }
}
