//! Out-of-band seed routine.
//!
//! Populates a fixed set of categories, then a fixed set of products that
//! reference them by name lookup. Fails fast if an expected category is
//! missing after the category pass.

use anyhow::{anyhow, Result};

use crate::config::Config;
use crate::db;
use crate::models::{Category, NewProduct};
use crate::store::{sqlite::SqliteStore, CatalogStore};

const SEED_CATEGORIES: &[&str] = &["Main Dishes", "Desserts", "Fruit"];

/// (name, description, price, category name)
const SEED_PRODUCTS: &[(&str, &str, f64, &str)] = &[
    (
        "Pad Thai",
        "Stir-fried rice noodles with shrimp and peanuts",
        120.0,
        "Main Dishes",
    ),
    (
        "Green Curry",
        "Chicken green curry with thai eggplant",
        150.0,
        "Main Dishes",
    ),
    (
        "Mango Sticky Rice",
        "Sweet sticky rice with ripe mango",
        89.0,
        "Desserts",
    ),
    ("Fresh Papaya", "Half a ripe papaya, sliced", 45.0, "Fruit"),
];

/// CLI entry point — seeds the configured database.
pub async fn run_seed(config: &Config) -> Result<()> {
    let pool = db::connect(config).await?;
    let store = SqliteStore::new(pool);
    seed_store(&store).await?;
    store.pool().close().await;
    println!(
        "Seeded {} categories and {} products.",
        SEED_CATEGORIES.len(),
        SEED_PRODUCTS.len()
    );
    Ok(())
}

/// Seeds any store: categories first, then products resolved by name.
pub async fn seed_store(store: &dyn CatalogStore) -> Result<()> {
    for name in SEED_CATEGORIES {
        store.create_category(name).await?;
    }
    let categories = store.list_categories().await?;
    insert_products(store, &categories, SEED_PRODUCTS).await
}

async fn insert_products(
    store: &dyn CatalogStore,
    categories: &[Category],
    products: &[(&str, &str, f64, &str)],
) -> Result<()> {
    for (name, description, price, category_name) in products {
        let category = categories
            .iter()
            .find(|c| c.name == *category_name)
            .ok_or_else(|| anyhow!("seed category missing after insert: {}", category_name))?;

        store
            .create_product(&NewProduct {
                name: name.to_string(),
                description: description.to_string(),
                price: *price,
                category_id: Some(category.id),
            })
            .await?;
    }
    Ok(())
}
