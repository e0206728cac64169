//! Product repository for catalog database operations.
//!
//! Products are append-only: this version has no update or delete path, so
//! an id handed out once stays valid for the lifetime of the database.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use minimart_core::{NewProduct, Price, Product, ProductId};

use super::RepositoryError;

/// Raw `product` table row, converted into the domain type after fetch.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i64,
    title: String,
    description: Option<String>,
    price_cents: i64,
    image: Option<String>,
    created_at: DateTime<Utc>,
}

impl ProductRow {
    /// Convert a fetched row into a [`Product`].
    ///
    /// The table has a `CHECK (price_cents >= 0)` constraint; a negative
    /// value here means the database was modified out of band.
    fn into_product(self) -> Result<Product, RepositoryError> {
        if self.price_cents < 0 {
            return Err(RepositoryError::DataCorruption(format!(
                "negative price_cents for product {}",
                self.id
            )));
        }

        Ok(Product {
            id: ProductId::new(self.id),
            title: self.title,
            description: self.description,
            price: Price::from_cents(self.price_cents),
            image: self.image,
            created_at: self.created_at,
        })
    }
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List all products in catalog order (ascending id).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a row holds an invalid price.
    pub async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, title, description, price_cents, image, created_at
            FROM product
            ORDER BY id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(ProductRow::into_product).collect()
    }

    /// Get a product by its id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the row holds an invalid price.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, title, description, price_cents, image, created_at
            FROM product
            WHERE id = ?1
            ",
        )
        .bind(id.as_i64())
        .fetch_optional(self.pool)
        .await?;

        row.map(ProductRow::into_product).transpose()
    }

    /// Create a product in a single atomic insert and return the stored row.
    ///
    /// The id and creation timestamp are assigned by the database.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, new: &NewProduct) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r"
            INSERT INTO product (title, description, price_cents, image)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id, title, description, price_cents, image, created_at
            ",
        )
        .bind(&new.title)
        .bind(&new.description)
        .bind(new.price.as_cents())
        .bind(&new.image)
        .fetch_one(self.pool)
        .await?;

        row.into_product()
    }
}
