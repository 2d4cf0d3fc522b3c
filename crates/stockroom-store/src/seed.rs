// SPDX-License-Identifier: Apache-2.0

use crate::{create_category, create_product, StoreError};
use rusqlite::Connection;
use stockroom_model::{CategoryRef, NewCategory, NewProduct};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub categories: usize,
    pub products: usize,
}

const DEMO_CATEGORIES: [(&str, &str); 4] = [
    ("Snacks", "Snacks y aperitivos"),
    ("Bebidas", "Bebidas refrescantes"),
    ("Dulces", "Chocolates y golosinas"),
    ("Panadería", "Productos de panadería"),
];

// (name, description, price, stock, index into DEMO_CATEGORIES)
const DEMO_PRODUCTS: [(&str, &str, f64, i64, usize); 8] = [
    ("Papas Fritas", "Bolsa de papas fritas 200g", 2500.0, 100, 0),
    ("Gaseosa Cola", "Gaseosa de cola 2L", 2800.0, 50, 1),
    ("Chocolate", "Barra de chocolate con leche", 3000.0, 200, 2),
    ("Pan Integral", "Pan integral fresco", 1200.0, 80, 3),
    ("Galletas", "Galletas de vainilla", 850.0, 60, 0),
    ("Jugo de Naranja", "Jugo de naranja natural", 1500.0, 40, 1),
    ("Caramelos", "Bolsa de caramelos surtidos", 1600.0, 150, 2),
    ("Torta", "Torta de chocolate", 20000.0, 20, 3),
];

/// Loads the demo fixture in one transaction. Refuses to run against a
/// database that already holds categories or products.
pub fn seed_demo_data(conn: &Connection) -> Result<SeedReport, StoreError> {
    let existing: i64 = conn.query_row(
        "SELECT (SELECT COUNT(*) FROM category) + (SELECT COUNT(*) FROM product)",
        [],
        |row| row.get(0),
    )?;
    if existing > 0 {
        return Err(StoreError::NotEmpty);
    }

    let tx = conn.unchecked_transaction()?;
    let mut category_ids = Vec::with_capacity(DEMO_CATEGORIES.len());
    for (name, description) in DEMO_CATEGORIES {
        let category = create_category(
            &tx,
            &NewCategory {
                name: name.to_string(),
                description: Some(description.to_string()),
            },
        )?;
        category_ids.push(category.id);
    }
    for (name, description, price, stock, category) in DEMO_PRODUCTS {
        create_product(
            &tx,
            &NewProduct {
                name: name.to_string(),
                description: Some(description.to_string()),
                price: Some(price),
                stock: Some(stock),
                category: Some(CategoryRef::Id(category_ids[category])),
            },
        )?;
    }
    tx.commit()?;

    let report = SeedReport {
        categories: DEMO_CATEGORIES.len(),
        products: DEMO_PRODUCTS.len(),
    };
    tracing::info!(
        categories = report.categories,
        products = report.products,
        "demo data loaded"
    );
    Ok(report)
}
