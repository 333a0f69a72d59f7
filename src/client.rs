//! HTTP client for the catalog API.
//!
//! The listing and creation-form view models talk to the two endpoints
//! through the [`CatalogApi`] trait rather than a concrete client, so tests
//! can substitute a fake that records calls. [`HttpApi`] is the production
//! implementation used by the `storefront list` and `storefront add`
//! commands.

use anyhow::{bail, Result};
use async_trait::async_trait;
use serde::Serialize;

use crate::models::{Category, Product};

/// Fields the creation form submits to `POST /products`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category_id: Option<i64>,
}

/// The view models' window onto the two endpoints.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn list_categories(&self) -> Result<Vec<Category>>;
    async fn create_category(&self, name: &str) -> Result<Category>;
    async fn list_products(&self) -> Result<Vec<Product>>;
    async fn create_product(&self, draft: &ProductDraft) -> Result<Product>;
}

/// reqwest-backed [`CatalogApi`] talking to a running catalog server.
pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Pulls the `error.message` out of the unified error envelope, falling
/// back to the HTTP status when the body is not the expected shape.
async fn error_message(resp: reqwest::Response) -> String {
    let status = resp.status();
    match resp.json::<serde_json::Value>().await {
        Ok(body) => body
            .pointer("/error/message")
            .and_then(|m| m.as_str())
            .map(|m| m.to_string())
            .unwrap_or_else(|| format!("unexpected response: {}", status)),
        Err(_) => format!("unexpected response: {}", status),
    }
}

#[async_trait]
impl CatalogApi for HttpApi {
    async fn list_categories(&self) -> Result<Vec<Category>> {
        let resp = self.client.get(self.url("/categories")).send().await?;
        if !resp.status().is_success() {
            bail!("{}", error_message(resp).await);
        }
        Ok(resp.json().await?)
    }

    async fn create_category(&self, name: &str) -> Result<Category> {
        let resp = self
            .client
            .post(self.url("/categories"))
            .json(&serde_json::json!({ "name": name }))
            .send()
            .await?;
        if !resp.status().is_success() {
            bail!("{}", error_message(resp).await);
        }
        Ok(resp.json().await?)
    }

    async fn list_products(&self) -> Result<Vec<Product>> {
        let resp = self.client.get(self.url("/products")).send().await?;
        if !resp.status().is_success() {
            bail!("{}", error_message(resp).await);
        }
        Ok(resp.json().await?)
    }

    async fn create_product(&self, draft: &ProductDraft) -> Result<Product> {
        let resp = self
            .client
            .post(self.url("/products"))
            .json(draft)
            .send()
            .await?;
        if !resp.status().is_success() {
            bail!("{}", error_message(resp).await);
        }
        Ok(resp.json().await?)
    }
}
