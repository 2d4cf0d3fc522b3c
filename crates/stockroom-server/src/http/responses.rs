// SPDX-License-Identifier: Apache-2.0

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value;
use stockroom_api::error_mapping::{map_error, ErrorBody};
use stockroom_api::params::parse_path_id;
use stockroom_api::ApiError;
use stockroom_store::StoreError;
use tracing::error;

pub(crate) fn api_error_response(err: &ApiError) -> Response {
    let status = StatusCode::from_u16(map_error(err).status_code)
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ErrorBody::from(err))).into_response()
}

/// Not-found and name conflicts keep their meaning; everything else is
/// logged and collapsed into a generic 500 naming the failed operation.
pub(crate) fn store_error_response(err: StoreError, failure: &'static str) -> Response {
    let api = match err {
        StoreError::ProductNotFound(id) => ApiError::product_not_found(id),
        StoreError::CategoryNotFound(id) => ApiError::category_not_found(id),
        StoreError::CategoryNameTaken(name) => ApiError::name_conflict(&name),
        other => {
            error!(error = %other, "{failure}");
            ApiError::internal(failure)
        }
    };
    api_error_response(&api)
}

pub(crate) fn json_response<T: serde::Serialize>(status: StatusCode, body: &T) -> Response {
    (status, Json(body)).into_response()
}

pub(crate) fn json_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, ApiError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| ApiError::invalid_body(rejection.body_text()))
}

/// Segments axum cannot decode (invalid UTF-8 after percent-decoding) get
/// the same JSON error body as segments that fail id parsing.
pub(crate) fn path_id(
    name: &str,
    raw: Result<Path<String>, PathRejection>,
) -> Result<i64, Response> {
    let parsed = match raw {
        Ok(Path(raw)) => parse_path_id(name, &raw),
        Err(rejection) => Err(ApiError::invalid_path_param(name, &rejection.body_text())),
    };
    parsed.map_err(|err| api_error_response(&err))
}
