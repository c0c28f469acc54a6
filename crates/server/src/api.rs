//! HTTP surface of the storefront.
//!
//! JSON API Endpoints:
//! - `GET  /api/products`        — full catalog as a JSON array
//! - `GET  /api/products/{id}`   — single product by id
//! - `POST /api/checkout`        — validate a cart and decrement stock
//! - `GET  /health`              — readiness report (see `health`)
//!
//! Every other path falls through to the static frontend, with the entry
//! document served for `/`. All `/api/*` responses carry
//! `Cache-Control: no-store` so browsers never render a stale catalog.

use std::path::Path as FsPath;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::{error, info};

use shopfront_catalog::CatalogStore;
use shopfront_core::domain::product::{Product, ProductId};
use shopfront_core::errors::{CheckoutError, LineFailure};

use crate::checkout::{self, CheckoutFailure};
use crate::health;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CatalogStore>,
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct CheckoutAccepted {
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct CheckoutRejection {
    pub error: String,
    pub details: Vec<LineFailure>,
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub fn router(state: AppState, frontend_dir: &FsPath) -> Router {
    let api = Router::new()
        .route("/products", get(list_products))
        .route("/products/{id}", get(get_product))
        .route("/checkout", post(checkout_cart))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .with_state(state.clone());

    let frontend = ServeDir::new(frontend_dir)
        .not_found_service(ServeFile::new(frontend_dir.join("index.html")));

    Router::new().nest("/api", api).merge(health::router(state)).fallback_service(frontend)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>, (StatusCode, Json<ApiError>)> {
    let products = state.store.load_all().await.map_err(|err| store_failure("list", &err))?;
    Ok(Json(products))
}

async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, (StatusCode, Json<ApiError>)> {
    let found = state
        .store
        .find_by_id(&ProductId(id))
        .await
        .map_err(|err| store_failure("get", &err))?;

    match found {
        Some(product) => Ok(Json(product)),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(ApiError { error: "product not found".to_string() }),
        )),
    }
}

async fn checkout_cart(State(state): State<AppState>, body: Bytes) -> Response {
    // The body is taken raw so a syntactically broken payload still gets the
    // JSON error envelope instead of the extractor's plain-text rejection.
    // An unparseable body carries no cart lines, which makes it an empty cart.
    let payload = serde_json::from_slice::<Value>(&body).unwrap_or(Value::Null);

    match checkout::process(state.store.as_ref(), &payload).await {
        Ok(()) => (StatusCode::OK, Json(CheckoutAccepted { success: true })).into_response(),
        Err(CheckoutFailure::Cart(CheckoutError::Rejected(details))) => {
            info!(
                event_name = "api.checkout.rejected",
                failed_lines = details.len(),
                "checkout rejected on stock validation"
            );
            let body = CheckoutRejection { error: "checkout rejected".to_string(), details };
            (StatusCode::BAD_REQUEST, Json(body)).into_response()
        }
        Err(CheckoutFailure::Cart(cart_error)) => {
            (StatusCode::BAD_REQUEST, Json(ApiError { error: cart_error.to_string() }))
                .into_response()
        }
        Err(CheckoutFailure::Store(store_error)) => {
            store_failure("checkout", &store_error).into_response()
        }
    }
}

fn store_failure(
    operation: &'static str,
    source: &shopfront_catalog::StoreError,
) -> (StatusCode, Json<ApiError>) {
    error!(
        event_name = "api.store.unavailable",
        operation,
        error = %source,
        "catalog store access failed"
    );
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiError { error: "catalog store is unavailable".to_string() }),
    )
}
