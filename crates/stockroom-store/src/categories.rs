// SPDX-License-Identifier: Apache-2.0

use crate::products::product_from_row;
use crate::schema::NOW_SQL;
use crate::StoreError;
use rusqlite::{params, params_from_iter, types::Value, Connection, OptionalExtension, Row};
use stockroom_model::{Category, CategoryChanges, CategoryDetail, CategoryId, NewCategory};

const CATEGORY_COLUMNS: &str = "id, name, description, created_at, updated_at";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryDeletion {
    pub category_id: CategoryId,
    /// Products whose `category_id` was cleared before the row went away.
    pub detached_products: usize,
}

/// Plain category rows; member products only come with [`get_category_detail`].
pub fn list_categories(conn: &Connection) -> Result<Vec<Category>, StoreError> {
    let mut stmt =
        conn.prepare_cached(&format!("SELECT {CATEGORY_COLUMNS} FROM category ORDER BY id ASC"))?;
    let categories = stmt
        .query_map([], category_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(categories)
}

pub fn get_category(conn: &Connection, id: CategoryId) -> Result<Category, StoreError> {
    find_category(conn, id)?.ok_or(StoreError::CategoryNotFound(id))
}

pub fn get_category_detail(
    conn: &Connection,
    id: CategoryId,
) -> Result<CategoryDetail, StoreError> {
    let category = get_category(conn, id)?;
    with_products(conn, category)
}

/// Smallest id strictly above every existing category id (1 on an empty
/// table). Ids are assigned by the application, not by the table sequence.
pub fn next_category_id(conn: &Connection) -> Result<CategoryId, StoreError> {
    Ok(conn.query_row("SELECT COALESCE(MAX(id), 0) + 1 FROM category", [], |row| {
        row.get(0)
    })?)
}

/// The name check and the id computation are separate statements, so two
/// concurrent writers on different connections can still race; the UNIQUE
/// and PRIMARY KEY constraints turn that race into a write error.
pub fn create_category(conn: &Connection, new: &NewCategory) -> Result<Category, StoreError> {
    if name_taken(conn, &new.name, None)? {
        return Err(StoreError::CategoryNameTaken(new.name.clone()));
    }
    let id = next_category_id(conn)?;
    conn.execute(
        "INSERT INTO category (id, name, description) VALUES (?1, ?2, ?3)",
        params![id, new.name, new.description],
    )?;
    get_category(conn, id)
}

pub fn update_category(
    conn: &Connection,
    id: CategoryId,
    changes: &CategoryChanges,
) -> Result<Category, StoreError> {
    get_category(conn, id)?;
    if let Some(name) = &changes.name {
        if name_taken(conn, name, Some(id))? {
            return Err(StoreError::CategoryNameTaken(name.clone()));
        }
    }

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
    if assignments.is_empty() {
        return get_category(conn, id);
    }
    values.push(Value::Integer(id));
    let sql = format!(
        "UPDATE category SET {}, updated_at = {NOW_SQL} WHERE id = ?",
        assignments.join(", ")
    );
    conn.execute(&sql, params_from_iter(values.iter()))?;
    get_category(conn, id)
}

/// Detaches the category's products and deletes the category as one unit:
/// either both happen or neither does.
pub fn delete_category(conn: &Connection, id: CategoryId) -> Result<CategoryDeletion, StoreError> {
    let tx = conn.unchecked_transaction()?;
    if find_category(&tx, id)?.is_none() {
        return Err(StoreError::CategoryNotFound(id));
    }
    let detached_products = tx.execute(
        &format!("UPDATE product SET category_id = NULL, updated_at = {NOW_SQL} WHERE category_id = ?1"),
        [id],
    )?;
    tx.execute("DELETE FROM category WHERE id = ?1", [id])?;
    tx.commit()?;
    tracing::info!(category_id = id, detached_products, "category deleted");
    Ok(CategoryDeletion {
        category_id: id,
        detached_products,
    })
}

fn find_category(conn: &Connection, id: CategoryId) -> Result<Option<Category>, StoreError> {
    Ok(conn
        .prepare_cached(&format!("SELECT {CATEGORY_COLUMNS} FROM category WHERE id = ?1"))?
        .query_row([id], category_from_row)
        .optional()?)
}

fn name_taken(
    conn: &Connection,
    name: &str,
    excluding: Option<CategoryId>,
) -> Result<bool, StoreError> {
    let found: Option<i64> = conn
        .query_row(
            "SELECT id FROM category WHERE name = ?1 AND (?2 IS NULL OR id <> ?2) LIMIT 1",
            params![name, excluding],
            |row| row.get(0),
        )
        .optional()?;
    Ok(found.is_some())
}

fn with_products(conn: &Connection, category: Category) -> Result<CategoryDetail, StoreError> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, name, description, price, stock, category_id, created_at, updated_at \
         FROM product WHERE category_id = ?1 ORDER BY id ASC",
    )?;
    let products = stmt
        .query_map([category.id], product_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(CategoryDetail { category, products })
}

fn category_from_row(row: &Row<'_>) -> rusqlite::Result<Category> {
    Ok(Category {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        created_at: row.get(3)?,
        updated_at: row.get(4)?,
    })
}
