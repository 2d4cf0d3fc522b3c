// SPDX-License-Identifier: Apache-2.0

use std::fmt::{Display, Formatter};
use stockroom_model::{CategoryId, ProductId};

#[derive(Debug)]
#[non_exhaustive]
pub enum StoreError {
    ProductNotFound(ProductId),
    CategoryNotFound(CategoryId),
    CategoryNameTaken(String),
    /// Seeding refuses to mix fixture rows with existing data.
    NotEmpty,
    Sqlite(rusqlite::Error),
    /// The shared connection could not be reached (poisoned lock, failed
    /// blocking task).
    Unavailable(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ProductNotFound(id) => write!(f, "product {id} not found"),
            Self::CategoryNotFound(id) => write!(f, "category {id} not found"),
            Self::CategoryNameTaken(name) => write!(f, "category name already exists: {name}"),
            Self::NotEmpty => write!(f, "database already contains data"),
            Self::Sqlite(e) => write!(f, "sqlite: {e}"),
            Self::Unavailable(reason) => write!(f, "store unavailable: {reason}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Sqlite(e) => Some(e),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Sqlite(e)
    }
}
