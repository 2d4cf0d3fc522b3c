// SPDX-License-Identifier: Apache-2.0

use crate::AppState;
use axum::http::HeaderMap;

const MAX_REQUEST_ID_BYTES: usize = 128;

/// Uses the caller's `x-request-id` when it is present and sane, otherwise
/// mints `req-<16 hex>` from the per-process counter.
#[must_use]
pub(crate) fn extract_request_id(headers: &HeaderMap, state: &AppState) -> String {
    headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty() && v.len() <= MAX_REQUEST_ID_BYTES)
        .map(ToString::to_string)
        .unwrap_or_else(|| {
            let id = state
                .request_id_seed
                .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
            format!("req-{id:016x}")
        })
}
