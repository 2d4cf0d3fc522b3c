// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ApiErrorCode {
    InvalidQueryParameter,
    InvalidPathParameter,
    InvalidBody,
    ValidationFailed,
    NameConflict,
    ProductNotFound,
    CategoryNotFound,
    Internal,
}

impl ApiErrorCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidQueryParameter => "InvalidQueryParameter",
            Self::InvalidPathParameter => "InvalidPathParameter",
            Self::InvalidBody => "InvalidBody",
            Self::ValidationFailed => "ValidationFailed",
            Self::NameConflict => "NameConflict",
            Self::ProductNotFound => "ProductNotFound",
            Self::CategoryNotFound => "CategoryNotFound",
            Self::Internal => "Internal",
        }
    }
}

impl fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiError {
    pub code: ApiErrorCode,
    pub message: String,
    #[serde(default)]
    pub details: Value,
}

impl ApiError {
    #[must_use]
    pub fn new(code: ApiErrorCode, message: impl Into<String>, details: Value) -> Self {
        Self {
            code,
            message: message.into(),
            details,
        }
    }

    #[must_use]
    pub fn invalid_param(name: &str, value: &str) -> Self {
        Self::new(
            ApiErrorCode::InvalidQueryParameter,
            format!("invalid query parameter: {name}"),
            json!({"parameter": name, "value": value}),
        )
    }

    #[must_use]
    pub fn invalid_path_param(name: &str, value: &str) -> Self {
        Self::new(
            ApiErrorCode::InvalidPathParameter,
            format!("invalid path parameter: {name}"),
            json!({"parameter": name, "value": value}),
        )
    }

    #[must_use]
    pub fn invalid_body(reason: impl Into<String>) -> Self {
        Self::new(ApiErrorCode::InvalidBody, reason, Value::Null)
    }

    #[must_use]
    pub fn validation_failed(field: &str, message: impl Into<String>) -> Self {
        Self::new(
            ApiErrorCode::ValidationFailed,
            message,
            json!({"field": field}),
        )
    }

    #[must_use]
    pub fn name_conflict(name: &str) -> Self {
        Self::new(
            ApiErrorCode::NameConflict,
            "category name already exists",
            json!({"name": name}),
        )
    }

    #[must_use]
    pub fn product_not_found(id: i64) -> Self {
        Self::new(
            ApiErrorCode::ProductNotFound,
            "product not found",
            json!({"id": id}),
        )
    }

    #[must_use]
    pub fn category_not_found(id: i64) -> Self {
        Self::new(
            ApiErrorCode::CategoryNotFound,
            "category not found",
            json!({"id": id}),
        )
    }

    /// Generic failure; `message` names the operation, never the cause.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ApiErrorCode::Internal, message, Value::Null)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
