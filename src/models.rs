//! Core data models for the catalog.
//!
//! Wire names are camelCase to match the JSON API (`categoryId`, nested
//! `category`).

use serde::{Deserialize, Serialize};

/// A named grouping a product may optionally belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// A catalog entry. `category` is eagerly joined on reads and is `null`
/// when the product has no category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category_id: Option<i64>,
    pub category: Option<Category>,
}

/// Fields for a product insert, after validation. Name and description are
/// expected to already be trimmed by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category_id: Option<i64>,
}
