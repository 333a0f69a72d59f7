use anyhow::Result;

use crate::config::Config;
use crate::db;

/// Creates the catalog schema. Idempotent — safe to run repeatedly.
///
/// Category names are NOT unique at the store layer; the only duplicate
/// guard in the system lives in the creation form. The products foreign key
/// backs the endpoint's explicit existence check, which stays in place
/// because the two are not atomic with respect to each other.
pub async fn run_migrations(config: &Config) -> Result<()> {
    let pool = db::connect(config).await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS categories (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL
        )
        "#,
    )
    .execute(&pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS products (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            price REAL NOT NULL,
            category_id INTEGER,
            FOREIGN KEY (category_id) REFERENCES categories(id)
        )
        "#,
    )
    .execute(&pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_products_category_id ON products(category_id)")
        .execute(&pool)
        .await?;

    pool.close().await;
    Ok(())
}
