// SPDX-License-Identifier: Apache-2.0

use crate::errors::ApiError;
use stockroom_model::{CategoryRef, ProductFilter, StockFilter};
use std::collections::BTreeMap;

/// Literal accepted wherever a category id may be replaced by "no category".
pub const UNCATEGORIZED_LITERAL: &str = "none";

/// Parses the list-products query string into a filter.
///
/// Empty values are treated as absent. Anything present that does not
/// parse is rejected as a whole, so a filter is never partially applied.
pub fn parse_list_products_params(
    query: &BTreeMap<String, String>,
) -> Result<ProductFilter, ApiError> {
    let mut filter = ProductFilter::default();

    if let Some(raw) = non_empty(query, "category") {
        filter.category = Some(if raw == UNCATEGORIZED_LITERAL {
            CategoryRef::Uncategorized
        } else {
            CategoryRef::Id(parse_id(raw).ok_or_else(|| ApiError::invalid_param("category", raw))?)
        });
    }
    if let Some(raw) = non_empty(query, "minPrice") {
        filter.min_price =
            Some(parse_decimal(raw).ok_or_else(|| ApiError::invalid_param("minPrice", raw))?);
    }
    if let Some(raw) = non_empty(query, "maxPrice") {
        filter.max_price =
            Some(parse_decimal(raw).ok_or_else(|| ApiError::invalid_param("maxPrice", raw))?);
    }
    if let Some(raw) = non_empty(query, "inStock") {
        filter.stock = Some(match raw {
            "true" => StockFilter::InStock,
            "false" => StockFilter::OutOfStock,
            _ => return Err(ApiError::invalid_param("inStock", raw)),
        });
    }

    Ok(filter)
}

/// Parses a positive integer id taken from the request path.
pub fn parse_path_id(name: &str, raw: &str) -> Result<i64, ApiError> {
    parse_id(raw).ok_or_else(|| ApiError::invalid_path_param(name, raw))
}

pub(crate) fn parse_id(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok().filter(|id| *id > 0)
}

pub(crate) fn parse_decimal(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn non_empty<'a>(query: &'a BTreeMap<String, String>, key: &str) -> Option<&'a str> {
    query
        .get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
}
