//! Admin route handlers: product list and creation.
//!
//! Products created here are live immediately; there is no draft state,
//! and no edit or delete path exists in this version.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, extract::State, response::Redirect};
use tower_sessions::Session;
use tracing::instrument;

use minimart_core::{Price, Product, ProductId};

use crate::db::ProductRepository;
use crate::error::Result;
use crate::filters;
use crate::forms::NewProductForm;
use crate::middleware::RequireAdmin;
use crate::session::{push_flash, take_flash};
use crate::state::AppState;

/// Product row display data for the admin table.
#[derive(Clone)]
pub struct AdminProductView {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    pub created: String,
}

impl From<&Product> for AdminProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            price: product.price,
            created: product.created_at.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Admin page template: product table plus the creation form.
#[derive(Template, WebTemplate)]
#[template(path = "admin/index.html")]
pub struct AdminTemplate {
    pub products: Vec<AdminProductView>,
    pub flash: Option<String>,
}

/// Display the admin page.
#[instrument(skip(_admin, state, session))]
pub async fn index(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    session: Session,
) -> Result<AdminTemplate> {
    let products = ProductRepository::new(state.pool()).list().await?;
    let flash = take_flash(&session).await;

    Ok(AdminTemplate {
        products: products.iter().map(AdminProductView::from).collect(),
        flash,
    })
}

/// Create a product from the admin form and redirect back to `/admin`.
///
/// Numeric coercion happens in [`NewProductForm`]; by the time the record
/// reaches the repository its price is a valid non-negative amount.
#[instrument(skip(_admin, state, session))]
pub async fn create(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<NewProductForm>,
) -> Result<Redirect> {
    let new = form.into_new_product();
    let product = ProductRepository::new(state.pool()).create(&new).await?;

    tracing::info!(id = %product.id, "product created");
    push_flash(&session, &format!("Product #{} created.", product.id)).await?;

    Ok(Redirect::to("/admin"))
}
