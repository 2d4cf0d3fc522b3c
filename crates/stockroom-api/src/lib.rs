// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

pub mod dto;
pub mod error_mapping;
mod errors;
pub mod params;
pub mod payloads;

pub use errors::{ApiError, ApiErrorCode};

pub const CRATE_NAME: &str = "stockroom-api";
