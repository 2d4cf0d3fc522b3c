// SPDX-License-Identifier: Apache-2.0

use crate::StoreError;
use rusqlite::Connection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetReport {
    pub deleted_products: usize,
    pub deleted_categories: usize,
}

pub fn foreign_keys_enabled(conn: &Connection) -> Result<bool, StoreError> {
    let flag: i64 = conn.query_row("PRAGMA foreign_keys", [], |row| row.get(0))?;
    Ok(flag == 1)
}

/// Turns foreign-key enforcement off for as long as it lives. Enforcement is
/// switched back on by [`ForeignKeyChecksGuard::restore`] or, on any early
/// exit, by `Drop`.
pub struct ForeignKeyChecksGuard<'conn> {
    conn: &'conn Connection,
    restored: bool,
}

impl<'conn> ForeignKeyChecksGuard<'conn> {
    /// Must be called outside a transaction: SQLite ignores the pragma
    /// while one is open.
    pub fn disable(conn: &'conn Connection) -> Result<Self, StoreError> {
        conn.execute_batch("PRAGMA foreign_keys = OFF;")?;
        Ok(Self {
            conn,
            restored: false,
        })
    }

    pub fn restore(mut self) -> Result<(), StoreError> {
        self.restored = true;
        self.conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(())
    }
}

impl Drop for ForeignKeyChecksGuard<'_> {
    fn drop(&mut self) {
        if self.restored {
            return;
        }
        if let Err(err) = self.conn.execute_batch("PRAGMA foreign_keys = ON;") {
            tracing::error!(error = %err, "failed to re-enable foreign key checks");
        } else {
            tracing::warn!("foreign key checks re-enabled after aborted reset");
        }
    }
}

/// Empties both tables and restarts their id sequences at 1. Foreign-key
/// enforcement is on again when this returns, whether it succeeded or not.
pub fn reset_database(conn: &Connection) -> Result<ResetReport, StoreError> {
    let guard = ForeignKeyChecksGuard::disable(conn)?;

    let tx = conn.unchecked_transaction()?;
    let deleted_products = tx.execute("DELETE FROM product", [])?;
    let deleted_categories = tx.execute("DELETE FROM category", [])?;
    tx.execute(
        "DELETE FROM sqlite_sequence WHERE name IN ('product', 'category')",
        [],
    )?;
    tx.commit()?;

    guard.restore()?;
    tracing::info!(deleted_products, deleted_categories, "database reset");
    Ok(ResetReport {
        deleted_products,
        deleted_categories,
    })
}
