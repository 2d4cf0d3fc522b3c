// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! SQLite-backed persistence for stockroom.
//!
//! Every operation is a plain function over a borrowed [`rusqlite::Connection`];
//! callers decide how the connection is shared. The server keeps a single
//! connection behind a mutex, the CLI opens one per invocation.

mod categories;
mod error;
mod products;
mod reset;
mod schema;
mod seed;

pub use categories::{
    create_category, delete_category, get_category, get_category_detail, list_categories,
    next_category_id, update_category, CategoryDeletion,
};
pub use error::StoreError;
pub use products::{
    build_product_sql, bulk_delete_products, create_product, delete_product, get_product,
    list_products, update_product,
};
pub use reset::{foreign_keys_enabled, reset_database, ForeignKeyChecksGuard, ResetReport};
pub use schema::{init_schema, open_database, open_in_memory, SCHEMA_VERSION};
pub use seed::{seed_demo_data, SeedReport};

pub const CRATE_NAME: &str = "stockroom-store";
