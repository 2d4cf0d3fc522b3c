// SPDX-License-Identifier: Apache-2.0

use crate::category::{Category, CategoryId};
use serde::{Deserialize, Serialize};

pub type ProductId = i64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock: i64,
    pub category_id: Option<CategoryId>,
    pub created_at: String,
    pub updated_at: String,
}

/// A product joined with its category. `category` is `None` for
/// uncategorized products and serializes as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub category: Option<Category>,
}
