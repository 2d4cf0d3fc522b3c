// SPDX-License-Identifier: Apache-2.0

use crate::http::responses::{
    api_error_response, json_body, json_response, path_id, store_error_response,
};
use crate::AppState;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value;
use std::collections::BTreeMap;
use stockroom_api::dto::BulkDeleteResponseDto;
use stockroom_api::params::parse_list_products_params;
use stockroom_api::payloads::{parse_bulk_delete, parse_new_product, parse_product_changes};
use stockroom_model::ProductFilter;
use stockroom_store as store;
use tracing::info;

async fn list_with(state: &AppState, filter: ProductFilter, failure: &'static str) -> Response {
    match state
        .db
        .call(move |conn| store::list_products(conn, &filter))
        .await
    {
        Ok(rows) => json_response(StatusCode::OK, &rows),
        Err(err) => store_error_response(err, failure),
    }
}

pub(crate) async fn list_products_handler(
    State(state): State<AppState>,
    Query(query): Query<BTreeMap<String, String>>,
) -> Response {
    match parse_list_products_params(&query) {
        Ok(filter) => list_with(&state, filter, "error fetching products").await,
        Err(err) => api_error_response(&err),
    }
}

pub(crate) async fn get_product_handler(
    State(state): State<AppState>,
    raw_id: Result<Path<String>, PathRejection>,
) -> Response {
    let id = match path_id("id", raw_id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match state.db.call(move |conn| store::get_product(conn, id)).await {
        Ok(product) => json_response(StatusCode::OK, &product),
        Err(err) => store_error_response(err, "error fetching product"),
    }
}

pub(crate) async fn create_product_handler(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let new = match json_body(body).and_then(|body| parse_new_product(&body)) {
        Ok(new) => new,
        Err(err) => return api_error_response(&err),
    };
    match state
        .db
        .call(move |conn| store::create_product(conn, &new))
        .await
    {
        Ok(product) => json_response(StatusCode::CREATED, &product),
        Err(err) => store_error_response(err, "error creating product"),
    }
}

pub(crate) async fn update_product_handler(
    State(state): State<AppState>,
    raw_id: Result<Path<String>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let id = match path_id("id", raw_id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let changes = match json_body(body).and_then(|body| parse_product_changes(&body)) {
        Ok(changes) => changes,
        Err(err) => return api_error_response(&err),
    };
    match state
        .db
        .call(move |conn| store::update_product(conn, id, &changes))
        .await
    {
        Ok(product) => json_response(StatusCode::OK, &product),
        Err(err) => store_error_response(err, "error updating product"),
    }
}

pub(crate) async fn delete_product_handler(
    State(state): State<AppState>,
    raw_id: Result<Path<String>, PathRejection>,
) -> Response {
    let id = match path_id("id", raw_id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match state
        .db
        .call(move |conn| store::delete_product(conn, id))
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => store_error_response(err, "error deleting product"),
    }
}

pub(crate) async fn products_by_category_handler(
    State(state): State<AppState>,
    raw_id: Result<Path<String>, PathRejection>,
) -> Response {
    let category_id = match path_id("categoryId", raw_id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    list_with(
        &state,
        ProductFilter::by_category(category_id),
        "error fetching products by category",
    )
    .await
}

pub(crate) async fn out_of_stock_handler(State(state): State<AppState>) -> Response {
    list_with(
        &state,
        ProductFilter::out_of_stock(),
        "error fetching out of stock products",
    )
    .await
}

pub(crate) async fn expensive_handler(State(state): State<AppState>) -> Response {
    list_with(
        &state,
        ProductFilter::expensive(),
        "error fetching expensive products",
    )
    .await
}

pub(crate) async fn bulk_delete_handler(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let ids = match json_body(body).and_then(|body| parse_bulk_delete(&body)) {
        Ok(ids) => ids,
        Err(err) => return api_error_response(&err),
    };
    let requested = ids.len();
    match state
        .db
        .call(move |conn| store::bulk_delete_products(conn, &ids))
        .await
    {
        Ok(deleted) => {
            info!(requested, deleted, "bulk product delete");
            json_response(StatusCode::OK, &BulkDeleteResponseDto::new(deleted))
        }
        Err(err) => store_error_response(err, "error deleting products"),
    }
}
