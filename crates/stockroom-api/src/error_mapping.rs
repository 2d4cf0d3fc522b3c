// SPDX-License-Identifier: Apache-2.0

use crate::{ApiError, ApiErrorCode};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiErrorMapping {
    pub status_code: u16,
}

#[must_use]
pub fn map_error(error: &ApiError) -> ApiErrorMapping {
    let status_code = match error.code {
        ApiErrorCode::InvalidQueryParameter
        | ApiErrorCode::InvalidPathParameter
        | ApiErrorCode::InvalidBody
        | ApiErrorCode::ValidationFailed
        | ApiErrorCode::NameConflict => 400,
        ApiErrorCode::ProductNotFound | ApiErrorCode::CategoryNotFound => 404,
        ApiErrorCode::Internal => 500,
    };
    ApiErrorMapping { status_code }
}

/// Wire shape of every error response: `error` carries the message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorBody<'a> {
    pub error: &'a str,
    pub code: ApiErrorCode,
    #[serde(skip_serializing_if = "is_null")]
    pub details: &'a Value,
}

fn is_null(details: &&Value) -> bool {
    details.is_null()
}

impl<'a> From<&'a ApiError> for ErrorBody<'a> {
    fn from(err: &'a ApiError) -> Self {
        Self {
            error: &err.message,
            code: err.code,
            details: &err.details,
        }
    }
}
