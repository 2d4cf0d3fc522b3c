// SPDX-License-Identifier: Apache-2.0

use crate::http::responses::json_response;
use axum::http::StatusCode;
use axum::response::Response;
use stockroom_api::dto::HealthDto;

pub(crate) async fn healthz_handler() -> Response {
    json_response(
        StatusCode::OK,
        &HealthDto {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    )
}
