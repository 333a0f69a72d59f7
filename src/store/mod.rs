//! Storage abstraction for the catalog.
//!
//! The [`CatalogStore`] trait defines the five operations the endpoints and
//! the seed routine need, enabling pluggable backends (SQLite in production,
//! in-memory for tests). The store is constructed once per process and
//! injected — never an ambient global.
//!
//! Implementations must be `Send + Sync` to work with async runtimes.

pub mod memory;
pub mod sqlite;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{Category, NewProduct, Product};

/// Abstract storage backend for the catalog.
///
/// # Operations
///
/// | Method | Purpose |
/// |--------|---------|
/// | [`list_categories`](CatalogStore::list_categories) | All categories, store order |
/// | [`create_category`](CatalogStore::create_category) | Insert, return with assigned id |
/// | [`get_category`](CatalogStore::get_category) | Look up one category by id |
/// | [`list_products`](CatalogStore::list_products) | All products, category joined |
/// | [`create_product`](CatalogStore::create_product) | Insert, return with assigned id |
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Returns all categories in store order.
    async fn list_categories(&self) -> Result<Vec<Category>>;

    /// Inserts a category with the given name (stored as passed — trimming
    /// is the endpoint's job) and returns it with its assigned id.
    async fn create_category(&self, name: &str) -> Result<Category>;

    /// Looks up a single category by id.
    async fn get_category(&self, id: i64) -> Result<Option<Category>>;

    /// Returns all products, each with its category eagerly attached.
    async fn list_products(&self) -> Result<Vec<Product>>;

    /// Inserts a product and returns it with its assigned id and its
    /// category (if any) attached.
    async fn create_product(&self, product: &NewProduct) -> Result<Product>;
}
