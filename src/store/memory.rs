//! In-memory [`CatalogStore`] implementation for tests.
//!
//! Uses `Vec` behind `std::sync::RwLock` for thread safety. Ids are
//! assigned sequentially from 1, mirroring SQLite rowid assignment.

use std::sync::RwLock;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{Category, NewProduct, Product};

use super::CatalogStore;

/// In-memory store used as the fake backend in endpoint and view tests.
#[derive(Default)]
pub struct MemoryStore {
    categories: RwLock<Vec<Category>>,
    products: RwLock<Vec<Product>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn list_categories(&self) -> Result<Vec<Category>> {
        Ok(self.categories.read().unwrap().clone())
    }

    async fn create_category(&self, name: &str) -> Result<Category> {
        let mut categories = self.categories.write().unwrap();
        let category = Category {
            id: categories.len() as i64 + 1,
            name: name.to_string(),
        };
        categories.push(category.clone());
        Ok(category)
    }

    async fn get_category(&self, id: i64) -> Result<Option<Category>> {
        let categories = self.categories.read().unwrap();
        Ok(categories.iter().find(|c| c.id == id).cloned())
    }

    async fn list_products(&self) -> Result<Vec<Product>> {
        Ok(self.products.read().unwrap().clone())
    }

    async fn create_product(&self, product: &NewProduct) -> Result<Product> {
        let category = match product.category_id {
            Some(id) => self.get_category(id).await?,
            None => None,
        };
        let mut products = self.products.write().unwrap();
        let product = Product {
            id: products.len() as i64 + 1,
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            category_id: product.category_id,
            category,
        };
        products.push(product.clone());
        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn assigns_sequential_ids() {
        let store = MemoryStore::new();
        let a = store.create_category("Fruit").await.unwrap();
        let b = store.create_category("Dessert").await.unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
    }

    #[tokio::test]
    async fn list_is_idempotent_without_writes() {
        let store = MemoryStore::new();
        store.create_category("Fruit").await.unwrap();
        store
            .create_product(&NewProduct {
                name: "Apple".into(),
                description: "A crisp red apple".into(),
                price: 12.0,
                category_id: Some(1),
            })
            .await
            .unwrap();

        let first = store.list_products().await.unwrap();
        let second = store.list_products().await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn product_carries_joined_category() {
        let store = MemoryStore::new();
        let cat = store.create_category("Fruit").await.unwrap();
        let product = store
            .create_product(&NewProduct {
                name: "Apple".into(),
                description: "A crisp red apple".into(),
                price: 12.0,
                category_id: Some(cat.id),
            })
            .await
            .unwrap();
        assert_eq!(product.category.as_ref().unwrap().name, "Fruit");

        let listed = store.list_products().await.unwrap();
        assert_eq!(listed[0].category, Some(cat));
    }
}
