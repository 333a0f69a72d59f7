//! Catalog HTTP server.
//!
//! Exposes the two catalog resources as a JSON API consumed by the listing
//! and creation-form views (and the `storefront list`/`add` commands).
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/categories` | List all categories |
//! | `POST` | `/categories` | Create a category |
//! | `GET`  | `/products` | List all products with their category |
//! | `POST` | `/products` | Create a product |
//! | `GET`  | `/health` | Health check (returns version) |
//!
//! # Error Contract
//!
//! All error responses share one envelope:
//!
//! ```json
//! { "error": { "code": "bad_request", "message": "product name must not be empty" } }
//! ```
//!
//! Error codes: `bad_request` (400) for validation failures, `internal`
//! (500) for store failures. Validation failures are returned as-is;
//! store failures return a generic message and log the full cause.
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted so browser pages can
//! call the API cross-origin.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::config::Config;
use crate::db;
use crate::models::{Category, NewProduct, Product};
use crate::store::{sqlite::SqliteStore, CatalogStore};

/// Shared application state passed to all route handlers via Axum's `State`
/// extractor. The store is the one process-wide data-access object.
#[derive(Clone)]
struct AppState {
    store: Arc<dyn CatalogStore>,
}

/// Starts the catalog HTTP server against the configured SQLite database.
///
/// Binds to the address in `[server].bind` and runs until the process is
/// terminated.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let pool = db::connect(config).await?;
    let store: Arc<dyn CatalogStore> = Arc::new(SqliteStore::new(pool));
    serve(store, &config.server.bind).await
}

/// Starts the server with an injected store. Used by tests to run the full
/// HTTP stack over an in-memory backend.
pub async fn serve(store: Arc<dyn CatalogStore>, bind_addr: &str) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!("catalog server listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(store)).await?;
    Ok(())
}

/// Builds the router over any [`CatalogStore`].
pub fn router(store: Arc<dyn CatalogStore>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/categories", get(handle_list_categories).post(handle_create_category))
        .route("/products", get(handle_list_products).post(handle_create_product))
        .route("/health", get(handle_health))
        .layer(cors)
        .with_state(AppState { store })
}

// ============ Error response ============

/// JSON error response body. Both validation and store failures use this
/// envelope; the original API's `{message}`/`{error}` split is normalized.
#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

/// Inner error detail with a machine-readable code and human-readable message.
#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

/// Internal error type that converts into an Axum HTTP response.
struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

/// Constructs a 400 Bad Request error for a validation failure.
fn bad_request(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        code: "bad_request".to_string(),
        message: message.into(),
    }
}

/// Constructs a 500 error for a store failure. The generic `message` goes to
/// the caller; the underlying cause is logged here and only here.
fn store_error(message: &str, err: anyhow::Error) -> AppError {
    tracing::error!("{}: {:#}", message, err);
    AppError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        code: "internal".to_string(),
        message: message.to_string(),
    }
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============ GET /categories ============

/// Returns all categories in store order. Never partially succeeds.
async fn handle_list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<Category>>, AppError> {
    let categories = state
        .store
        .list_categories()
        .await
        .map_err(|e| store_error("could not fetch categories", e))?;
    Ok(Json(categories))
}

// ============ POST /categories ============

#[derive(Deserialize)]
struct CreateCategoryRequest {
    name: Option<String>,
}

/// Creates a category from a trimmed, non-empty name.
///
/// Duplicate names are NOT rejected here; the only duplicate guard in the
/// system is the client-side check in the creation form.
async fn handle_create_category(
    State(state): State<AppState>,
    Json(req): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<Category>), AppError> {
    let name = req.name.as_deref().unwrap_or("").trim().to_string();
    if name.is_empty() {
        return Err(bad_request("category name must not be empty"));
    }

    let category = state
        .store
        .create_category(&name)
        .await
        .map_err(|e| store_error("could not create category", e))?;

    Ok((StatusCode::CREATED, Json(category)))
}

// ============ GET /products ============

/// Returns all products with their category (or `null`) eagerly attached.
async fn handle_list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>, AppError> {
    let products = state
        .store
        .list_products()
        .await
        .map_err(|e| store_error("could not fetch products", e))?;
    Ok(Json(products))
}

// ============ POST /products ============

/// Create-product request body. `price` is accepted as a JSON number or a
/// numeric string, matching the permissiveness of the original API.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateProductRequest {
    name: Option<String>,
    description: Option<String>,
    price: Option<serde_json::Value>,
    category_id: Option<i64>,
}

/// Coerces the incoming price into a float. Numbers pass through; strings
/// are trimmed and parsed. Anything else is "not a number".
fn coerce_price(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Creates a product.
///
/// Validation order: name, price, category reference. The price rule here is
/// weaker than the creation form's (`> 0` is not required) — zero and
/// negative prices submitted directly to the endpoint are accepted.
///
/// The category-existence check and the insert are two sequential store
/// calls with no transaction between them; the schema's foreign key is the
/// backstop.
async fn handle_create_product(
    State(state): State<AppState>,
    Json(req): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    let name = req.name.as_deref().unwrap_or("").trim().to_string();
    if name.is_empty() {
        return Err(bad_request("product name must not be empty"));
    }

    let price = match req.price.as_ref().and_then(coerce_price) {
        Some(p) => p,
        None => return Err(bad_request("price must be a number")),
    };

    if let Some(category_id) = req.category_id {
        let exists = state
            .store
            .get_category(category_id)
            .await
            .map_err(|e| store_error("could not create product", e))?;
        if exists.is_none() {
            return Err(bad_request("category does not exist"));
        }
    }

    let new_product = NewProduct {
        name,
        description: req
            .description
            .as_deref()
            .unwrap_or("")
            .trim()
            .to_string(),
        price,
        category_id: req.category_id,
    };

    let product = state
        .store
        .create_product(&new_product)
        .await
        .map_err(|e| store_error("could not create product", e))?;

    Ok((StatusCode::CREATED, Json(product)))
}
