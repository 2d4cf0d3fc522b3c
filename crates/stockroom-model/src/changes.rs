// SPDX-License-Identifier: Apache-2.0

use crate::filter::CategoryRef;
use serde::{Deserialize, Serialize};

/// Validated input for a product insert. `None` fields are omitted from the
/// INSERT so the store defaults apply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i64>,
    pub category: Option<CategoryRef>,
}

impl NewProduct {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            price: None,
            stock: None,
            category: None,
        }
    }
}

/// Sparse product update; only `Some` fields are written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i64>,
    pub category: Option<CategoryRef>,
}

impl ProductChanges {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.stock.is_none()
            && self.category.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CategoryChanges {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl CategoryChanges {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_change_sets_are_detected() {
        assert!(ProductChanges::default().is_empty());
        assert!(CategoryChanges::default().is_empty());

        let detach = ProductChanges {
            category: Some(CategoryRef::Uncategorized),
            ..ProductChanges::default()
        };
        assert!(!detach.is_empty());
    }
}
