// SPDX-License-Identifier: Apache-2.0

use crate::schema::NOW_SQL;
use crate::StoreError;
use rusqlite::{params_from_iter, types::Value, Connection, OptionalExtension, Row};
use stockroom_model::{
    Category, CategoryRef, NewProduct, Product, ProductChanges, ProductDetail, ProductFilter,
    ProductId, ProductOrder, StockFilter,
};

const PRODUCT_DETAIL_COLUMNS: &str = "p.id, p.name, p.description, p.price, p.stock, p.category_id, p.created_at, p.updated_at, \
     c.id, c.name, c.description, c.created_at, c.updated_at";

/// Compiles a filter into one SELECT so that every predicate is applied by
/// the same statement.
#[must_use]
pub fn build_product_sql(filter: &ProductFilter) -> (String, Vec<Value>) {
    let mut sql = format!(
        "SELECT {PRODUCT_DETAIL_COLUMNS} FROM product p LEFT JOIN category c ON c.id = p.category_id"
    );
    let mut where_parts: Vec<&'static str> = Vec::new();
    let mut params: Vec<Value> = Vec::new();

    match filter.category {
        Some(CategoryRef::Uncategorized) => where_parts.push("p.category_id IS NULL"),
        Some(CategoryRef::Id(id)) => {
            where_parts.push("p.category_id = ?");
            params.push(Value::Integer(id));
        }
        None => {}
    }
    if let Some(min) = filter.min_price {
        where_parts.push("p.price >= ?");
        params.push(Value::Real(min));
    }
    if let Some(max) = filter.max_price {
        where_parts.push("p.price <= ?");
        params.push(Value::Real(max));
    }
    if let Some(floor) = filter.price_above {
        where_parts.push("p.price > ?");
        params.push(Value::Real(floor));
    }
    match filter.stock {
        Some(StockFilter::InStock) => where_parts.push("p.stock > 0"),
        Some(StockFilter::OutOfStock) => where_parts.push("p.stock = 0"),
        None => {}
    }

    if !where_parts.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&where_parts.join(" AND "));
    }
    match filter.order {
        ProductOrder::IdAscending => sql.push_str(" ORDER BY p.id ASC"),
        ProductOrder::PriceDescending => sql.push_str(" ORDER BY p.price DESC, p.id ASC"),
    }

    (sql, params)
}

pub fn list_products(
    conn: &Connection,
    filter: &ProductFilter,
) -> Result<Vec<ProductDetail>, StoreError> {
    let (sql, params) = build_product_sql(filter);
    let mut stmt = conn.prepare_cached(&sql)?;
    let rows = stmt
        .query_map(params_from_iter(params.iter()), product_detail_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn get_product(conn: &Connection, id: ProductId) -> Result<ProductDetail, StoreError> {
    let sql = format!(
        "SELECT {PRODUCT_DETAIL_COLUMNS} FROM product p LEFT JOIN category c ON c.id = p.category_id WHERE p.id = ?1"
    );
    conn.prepare_cached(&sql)?
        .query_row([id], product_detail_from_row)
        .optional()?
        .ok_or(StoreError::ProductNotFound(id))
}

/// Inserts only the supplied columns; omitted ones take the table defaults.
pub fn create_product(conn: &Connection, new: &NewProduct) -> Result<ProductDetail, StoreError> {
    let mut columns = vec!["name"];
    let mut values = vec![Value::Text(new.name.clone())];
    if let Some(description) = &new.description {
        columns.push("description");
        values.push(Value::Text(description.clone()));
    }
    if let Some(price) = new.price {
        columns.push("price");
        values.push(Value::Real(price));
    }
    if let Some(stock) = new.stock {
        columns.push("stock");
        values.push(Value::Integer(stock));
    }
    if let Some(category) = new.category {
        columns.push("category_id");
        values.push(category_value(category));
    }

    let placeholders = (1..=values.len())
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!(
        "INSERT INTO product ({}) VALUES ({placeholders})",
        columns.join(", ")
    );
    conn.execute(&sql, params_from_iter(values.iter()))?;
    get_product(conn, conn.last_insert_rowid())
}

pub fn update_product(
    conn: &Connection,
    id: ProductId,
    changes: &ProductChanges,
) -> Result<ProductDetail, StoreError> {
    let mut assignments = Vec::new();
    let mut values = Vec::new();
    if let Some(name) = &changes.name {
        assignments.push("name = ?");
        values.push(Value::Text(name.clone()));
    }
    if let Some(description) = &changes.description {
        assignments.push("description = ?");
        values.push(Value::Text(description.clone()));
    }
    if let Some(price) = changes.price {
        assignments.push("price = ?");
        values.push(Value::Real(price));
    }
    if let Some(stock) = changes.stock {
        assignments.push("stock = ?");
        values.push(Value::Integer(stock));
    }
    if let Some(category) = changes.category {
        assignments.push("category_id = ?");
        values.push(category_value(category));
    }
    if assignments.is_empty() {
        return get_product(conn, id);
    }

    values.push(Value::Integer(id));
    let sql = format!(
        "UPDATE product SET {}, updated_at = {NOW_SQL} WHERE id = ?",
        assignments.join(", ")
    );
    let updated = conn.execute(&sql, params_from_iter(values.iter()))?;
    if updated == 0 {
        return Err(StoreError::ProductNotFound(id));
    }
    get_product(conn, id)
}

pub fn delete_product(conn: &Connection, id: ProductId) -> Result<(), StoreError> {
    let deleted = conn.execute("DELETE FROM product WHERE id = ?1", [id])?;
    if deleted == 0 {
        return Err(StoreError::ProductNotFound(id));
    }
    Ok(())
}

/// Deletes every listed id in one statement and returns how many rows went
/// away; unknown ids simply do not count.
pub fn bulk_delete_products(conn: &Connection, ids: &[ProductId]) -> Result<usize, StoreError> {
    if ids.is_empty() {
        return Ok(0);
    }
    let placeholders = vec!["?"; ids.len()].join(", ");
    let sql = format!("DELETE FROM product WHERE id IN ({placeholders})");
    Ok(conn.execute(&sql, params_from_iter(ids.iter()))?)
}

fn category_value(category: CategoryRef) -> Value {
    match category.category_id() {
        Some(id) => Value::Integer(id),
        None => Value::Null,
    }
}

pub(crate) fn product_from_row(row: &Row<'_>) -> rusqlite::Result<Product> {
    Ok(Product {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        price: row.get(3)?,
        stock: row.get(4)?,
        category_id: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

fn product_detail_from_row(row: &Row<'_>) -> rusqlite::Result<ProductDetail> {
    let product = product_from_row(row)?;
    let category = match row.get::<_, Option<i64>>(8)? {
        Some(id) => Some(Category {
            id,
            name: row.get(9)?,
            description: row.get(10)?,
            created_at: row.get(11)?,
            updated_at: row.get(12)?,
        }),
        None => None,
    };
    Ok(ProductDetail { product, category })
}
