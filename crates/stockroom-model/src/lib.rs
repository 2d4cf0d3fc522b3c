// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! Stockroom model SSOT.
//!
//! Rows as they come out of the store, the filters used to select them and
//! the typed change-sets used to write them. Parsing of loosely-typed request
//! input into these types lives in `stockroom-api`.

mod category;
mod changes;
mod filter;
mod product;

pub use category::{Category, CategoryDetail, CategoryId};
pub use changes::{CategoryChanges, NewCategory, NewProduct, ProductChanges};
pub use filter::{CategoryRef, ProductFilter, ProductOrder, StockFilter, EXPENSIVE_PRICE_THRESHOLD};
pub use product::{Product, ProductDetail, ProductId};

pub const CRATE_NAME: &str = "stockroom-model";
