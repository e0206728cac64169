//! Catalog route handlers: the product grid and detail pages.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use tower_sessions::Session;
use tracing::instrument;

use minimart_core::{Price, Product, ProductId};

use crate::db::ProductRepository;
use crate::error::{AppError, Result};
use crate::filters;
use crate::session::take_flash;
use crate::state::AppState;

/// Image shown for products created without one.
pub const PLACEHOLDER_IMAGE: &str = "/static/img/placeholder.svg";

/// Product card display data for the catalog grid.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    pub image: String,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            price: product.price,
            image: product
                .image
                .clone()
                .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
        }
    }
}

/// Product display data for the detail page.
#[derive(Clone)]
pub struct ProductDetailView {
    pub id: ProductId,
    pub title: String,
    pub description: Option<String>,
    pub price: Price,
    pub image: String,
}

impl From<&Product> for ProductDetailView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            description: product.description.clone(),
            price: product.price,
            image: product
                .image
                .clone()
                .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
        }
    }
}

/// Catalog grid page template.
#[derive(Template, WebTemplate)]
#[template(path = "catalog/index.html")]
pub struct CatalogTemplate {
    pub products: Vec<ProductCardView>,
    pub flash: Option<String>,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub product: ProductDetailView,
    pub flash: Option<String>,
}

/// Display the catalog grid.
#[instrument(skip(state, session))]
pub async fn index(State(state): State<AppState>, session: Session) -> Result<CatalogTemplate> {
    let products = ProductRepository::new(state.pool()).list().await?;
    let flash = take_flash(&session).await;

    Ok(CatalogTemplate {
        products: products.iter().map(ProductCardView::from).collect(),
        flash,
    })
}

/// Display a product detail page.
///
/// Non-numeric ids get the same 404 as numeric ids with no product behind
/// them.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    Path(raw_id): Path<String>,
) -> Result<ProductShowTemplate> {
    let id = ProductId::parse(&raw_id)
        .ok_or_else(|| AppError::NotFound(format!("product {raw_id}")))?;

    let product = ProductRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    let flash = take_flash(&session).await;

    Ok(ProductShowTemplate {
        product: ProductDetailView::from(&product),
        flash,
    })
}
