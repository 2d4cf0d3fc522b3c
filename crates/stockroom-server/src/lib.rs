// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! HTTP surface of stockroom: router, handlers and runtime configuration.

use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;
use std::sync::atomic::AtomicU64;
use std::sync::Arc;

mod config;
mod db;
mod http;
mod middleware;

pub use config::{validate_startup_config, ApiConfig, IN_MEMORY_DATABASE};
pub use db::Database;

pub const CRATE_NAME: &str = "stockroom-server";

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub api: ApiConfig,
    pub(crate) request_id_seed: Arc<AtomicU64>,
}

impl AppState {
    #[must_use]
    pub fn new(db: Database) -> Self {
        Self::with_config(db, ApiConfig::default())
    }

    #[must_use]
    pub fn with_config(db: Database, api: ApiConfig) -> Self {
        Self {
            db,
            api,
            request_id_seed: Arc::new(AtomicU64::new(1)),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    use crate::http::{categories, health, products};

    Router::new()
        .route("/healthz", get(health::healthz_handler))
        .route(
            "/api/products",
            get(products::list_products_handler).post(products::create_product_handler),
        )
        .route(
            "/api/products/out-of-stock",
            get(products::out_of_stock_handler),
        )
        .route("/api/products/expensive", get(products::expensive_handler))
        .route(
            "/api/products/bulk-delete",
            post(products::bulk_delete_handler),
        )
        .route(
            "/api/products/category/:categoryId",
            get(products::products_by_category_handler),
        )
        .route(
            "/api/products/:id",
            get(products::get_product_handler)
                .put(products::update_product_handler)
                .delete(products::delete_product_handler),
        )
        .route(
            "/api/categories",
            get(categories::list_categories_handler).post(categories::create_category_handler),
        )
        .route("/api/categories/reset", post(categories::reset_handler))
        .route(
            "/api/categories/:id",
            get(categories::get_category_handler)
                .put(categories::update_category_handler)
                .delete(categories::delete_category_handler),
        )
        .layer(from_fn_with_state(state.clone(), middleware::cors::cors_middleware))
        .layer(from_fn_with_state(
            state.clone(),
            middleware::request_tracing::request_tracing_middleware,
        ))
        .layer(DefaultBodyLimit::max(state.api.max_body_bytes))
        .with_state(state)
}
