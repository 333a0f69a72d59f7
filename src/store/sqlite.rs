//! SQLite-backed [`CatalogStore`] implementation.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use crate::models::{Category, NewProduct, Product};

use super::CatalogStore;

/// SQLite implementation of the [`CatalogStore`] trait.
///
/// Wraps a [`SqlitePool`] and translates every operation into SQL against
/// the `categories` and `products` tables.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl CatalogStore for SqliteStore {
    async fn list_categories(&self) -> Result<Vec<Category>> {
        let rows = sqlx::query("SELECT id, name FROM categories")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .iter()
            .map(|row| Category {
                id: row.get("id"),
                name: row.get("name"),
            })
            .collect())
    }

    async fn create_category(&self, name: &str) -> Result<Category> {
        let result = sqlx::query("INSERT INTO categories (name) VALUES (?)")
            .bind(name)
            .execute(&self.pool)
            .await?;

        Ok(Category {
            id: result.last_insert_rowid(),
            name: name.to_string(),
        })
    }

    async fn get_category(&self, id: i64) -> Result<Option<Category>> {
        let row = sqlx::query("SELECT id, name FROM categories WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|row| Category {
            id: row.get("id"),
            name: row.get("name"),
        }))
    }

    async fn list_products(&self) -> Result<Vec<Product>> {
        let rows = sqlx::query(
            r#"
            SELECT p.id, p.name, p.description, p.price, p.category_id, c.name AS category_name
            FROM products p
            LEFT JOIN categories c ON c.id = p.category_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| {
                let category_id: Option<i64> = row.get("category_id");
                let category = category_id.map(|id| Category {
                    id,
                    name: row.get("category_name"),
                });
                Product {
                    id: row.get("id"),
                    name: row.get("name"),
                    description: row.get("description"),
                    price: row.get("price"),
                    category_id,
                    category,
                }
            })
            .collect())
    }

    async fn create_product(&self, product: &NewProduct) -> Result<Product> {
        let result = sqlx::query(
            "INSERT INTO products (name, description, price, category_id) VALUES (?, ?, ?, ?)",
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.category_id)
        .execute(&self.pool)
        .await?;

        let category = match product.category_id {
            Some(id) => self.get_category(id).await?,
            None => None,
        };

        Ok(Product {
            id: result.last_insert_rowid(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            category_id: product.category_id,
            category,
        })
    }
}
