// SPDX-License-Identifier: Apache-2.0

//! JSON body validation for product and category mutations.
//!
//! Bodies arrive loosely typed: numbers may be JSON numbers or numeric
//! strings, `categoryId` may be the literal `"none"`. Each field is parsed
//! on its own; the first invalid present field rejects the request before
//! anything is written.

use crate::errors::ApiError;
use crate::params::{parse_decimal, UNCATEGORIZED_LITERAL};
use serde_json::{Map, Value};
use stockroom_model::{
    CategoryChanges, CategoryRef, NewCategory, NewProduct, ProductChanges, ProductId,
};

pub fn parse_new_product(body: &Value) -> Result<NewProduct, ApiError> {
    let fields = object(body)?;
    let name = text(fields, "name")?
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ApiError::validation_failed("name", "name is required"))?;

    Ok(NewProduct {
        name,
        description: text(fields, "description")?,
        price: price(fields)?,
        stock: stock(fields)?,
        category: category(fields)?,
    })
}

pub fn parse_product_changes(body: &Value) -> Result<ProductChanges, ApiError> {
    let fields = object(body)?;
    let changes = ProductChanges {
        name: text(fields, "name")?.filter(|v| !v.trim().is_empty()),
        description: text(fields, "description")?.filter(|v| !v.trim().is_empty()),
        price: price(fields)?,
        stock: stock(fields)?,
        category: category(fields)?,
    };
    if changes.is_empty() {
        return Err(ApiError::validation_failed(
            "body",
            "no valid fields provided for update",
        ));
    }
    Ok(changes)
}

pub fn parse_bulk_delete(body: &Value) -> Result<Vec<ProductId>, ApiError> {
    let invalid =
        || ApiError::validation_failed("productIds", "productIds must be a non-empty array of ids");
    let ids = object(body)?
        .get("productIds")
        .and_then(Value::as_array)
        .filter(|ids| !ids.is_empty())
        .ok_or_else(invalid)?;
    ids.iter()
        .map(|raw| integer(raw).ok_or_else(invalid))
        .collect()
}

pub fn parse_new_category(body: &Value) -> Result<NewCategory, ApiError> {
    let fields = object(body)?;
    let name = text(fields, "name")?
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ApiError::validation_failed("name", "name is required"))?;
    Ok(NewCategory {
        name,
        description: text(fields, "description")?,
    })
}

pub fn parse_category_changes(body: &Value) -> Result<CategoryChanges, ApiError> {
    let fields = object(body)?;
    let changes = CategoryChanges {
        name: text(fields, "name")?.filter(|v| !v.trim().is_empty()),
        description: text(fields, "description")?.filter(|v| !v.trim().is_empty()),
    };
    if changes.is_empty() {
        return Err(ApiError::validation_failed(
            "body",
            "no valid fields provided for update",
        ));
    }
    Ok(changes)
}

fn object(body: &Value) -> Result<&Map<String, Value>, ApiError> {
    body.as_object()
        .ok_or_else(|| ApiError::invalid_body("request body must be a JSON object"))
}

/// Absent and `null` are the same thing to every field parser.
fn present<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    fields.get(key).filter(|v| !v.is_null())
}

fn text(fields: &Map<String, Value>, key: &str) -> Result<Option<String>, ApiError> {
    match present(fields, key) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(ApiError::validation_failed(key, format!("invalid {key}"))),
    }
}

fn blank(value: &Value) -> bool {
    value.as_str().is_some_and(|s| s.trim().is_empty())
}

fn price(fields: &Map<String, Value>) -> Result<Option<f64>, ApiError> {
    let Some(raw) = present(fields, "price").filter(|v| !blank(v)) else {
        return Ok(None);
    };
    let parsed = match raw {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => parse_decimal(s),
        _ => None,
    };
    parsed
        .filter(|v| *v >= 0.0)
        .map(Some)
        .ok_or_else(|| ApiError::validation_failed("price", "invalid price"))
}

fn stock(fields: &Map<String, Value>) -> Result<Option<i64>, ApiError> {
    let Some(raw) = present(fields, "stock").filter(|v| !blank(v)) else {
        return Ok(None);
    };
    integer(raw)
        .filter(|v| *v >= 0)
        .map(Some)
        .ok_or_else(|| ApiError::validation_failed("stock", "invalid stock"))
}

fn category(fields: &Map<String, Value>) -> Result<Option<CategoryRef>, ApiError> {
    let Some(raw) = present(fields, "categoryId").filter(|v| !blank(v)) else {
        return Ok(None);
    };
    if raw.as_str().map(str::trim) == Some(UNCATEGORIZED_LITERAL) {
        return Ok(Some(CategoryRef::Uncategorized));
    }
    integer(raw)
        .filter(|id| *id > 0)
        .map(|id| Some(CategoryRef::Id(id)))
        .ok_or_else(|| ApiError::validation_failed("categoryId", "invalid categoryId"))
}

fn integer(raw: &Value) -> Option<i64> {
    match raw {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}
