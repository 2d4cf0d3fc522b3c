// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MessageDto {
    pub message: String,
}

impl MessageDto {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct BulkDeleteResponseDto {
    pub message: String,
    pub deleted_count: usize,
}

impl BulkDeleteResponseDto {
    #[must_use]
    pub fn new(deleted_count: usize) -> Self {
        Self {
            message: format!("{deleted_count} product(s) deleted"),
            deleted_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HealthDto {
    pub status: String,
    pub version: String,
}
