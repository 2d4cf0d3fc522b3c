// SPDX-License-Identifier: Apache-2.0

use crate::category::CategoryId;
use serde::{Deserialize, Serialize};

/// Products priced strictly above this value are listed as expensive.
pub const EXPENSIVE_PRICE_THRESHOLD: f64 = 100.0;

/// Either "no category" or a concrete category id. Used both to select
/// products and to assign them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryRef {
    Uncategorized,
    Id(CategoryId),
}

impl CategoryRef {
    #[must_use]
    pub fn category_id(self) -> Option<CategoryId> {
        match self {
            Self::Uncategorized => None,
            Self::Id(id) => Some(id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockFilter {
    InStock,
    OutOfStock,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ProductOrder {
    #[default]
    IdAscending,
    PriceDescending,
}

/// Conjunction of optional predicates over the product table. An empty
/// filter selects every row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ProductFilter {
    pub category: Option<CategoryRef>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    /// Exclusive lower bound, used by the expensive-products shortcut.
    pub price_above: Option<f64>,
    pub stock: Option<StockFilter>,
    pub order: ProductOrder,
}

impl ProductFilter {
    #[must_use]
    pub fn by_category(category_id: CategoryId) -> Self {
        Self {
            category: Some(CategoryRef::Id(category_id)),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn out_of_stock() -> Self {
        Self {
            stock: Some(StockFilter::OutOfStock),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn expensive() -> Self {
        Self {
            price_above: Some(EXPENSIVE_PRICE_THRESHOLD),
            order: ProductOrder::PriceDescending,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_unfiltered(&self) -> bool {
        self.category.is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
            && self.price_above.is_none()
            && self.stock.is_none()
    }
}
