// SPDX-License-Identifier: Apache-2.0

use crate::http::responses::{
    api_error_response, json_body, json_response, path_id, store_error_response,
};
use crate::AppState;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;
use serde_json::Value;
use stockroom_api::dto::MessageDto;
use stockroom_api::payloads::{parse_category_changes, parse_new_category};
use stockroom_store as store;
use tracing::{info, warn};

pub(crate) async fn list_categories_handler(State(state): State<AppState>) -> Response {
    match state.db.call(store::list_categories).await {
        Ok(rows) => json_response(StatusCode::OK, &rows),
        Err(err) => store_error_response(err, "error fetching categories"),
    }
}

pub(crate) async fn get_category_handler(
    State(state): State<AppState>,
    raw_id: Result<Path<String>, PathRejection>,
) -> Response {
    let id = match path_id("id", raw_id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match state
        .db
        .call(move |conn| store::get_category_detail(conn, id))
        .await
    {
        Ok(category) => json_response(StatusCode::OK, &category),
        Err(err) => store_error_response(err, "error fetching category"),
    }
}

pub(crate) async fn create_category_handler(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let new = match json_body(body).and_then(|body| parse_new_category(&body)) {
        Ok(new) => new,
        Err(err) => return api_error_response(&err),
    };
    match state
        .db
        .call(move |conn| store::create_category(conn, &new))
        .await
    {
        Ok(category) => json_response(StatusCode::CREATED, &category),
        Err(err) => store_error_response(err, "error creating category"),
    }
}

pub(crate) async fn update_category_handler(
    State(state): State<AppState>,
    raw_id: Result<Path<String>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let id = match path_id("id", raw_id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let changes = match json_body(body).and_then(|body| parse_category_changes(&body)) {
        Ok(changes) => changes,
        Err(err) => return api_error_response(&err),
    };
    match state
        .db
        .call(move |conn| store::update_category(conn, id, &changes))
        .await
    {
        Ok(category) => json_response(StatusCode::OK, &category),
        Err(err) => store_error_response(err, "error updating category"),
    }
}

pub(crate) async fn delete_category_handler(
    State(state): State<AppState>,
    raw_id: Result<Path<String>, PathRejection>,
) -> Response {
    let id = match path_id("id", raw_id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match state
        .db
        .call(move |conn| store::delete_category(conn, id))
        .await
    {
        Ok(_) => json_response(StatusCode::OK, &MessageDto::new("category deleted")),
        Err(err) => store_error_response(err, "error deleting category"),
    }
}

pub(crate) async fn reset_handler(State(state): State<AppState>) -> Response {
    warn!("database reset requested");
    match state.db.call(store::reset_database).await {
        Ok(report) => {
            info!(
                deleted_products = report.deleted_products,
                deleted_categories = report.deleted_categories,
                "database reset complete"
            );
            json_response(StatusCode::OK, &MessageDto::new("database reset"))
        }
        Err(err) => store_error_response(err, "error resetting database"),
    }
}
