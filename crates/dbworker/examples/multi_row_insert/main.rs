//! Example demonstrating multi-row writes: equal-length value sequences become a
//! single `INSERT ... VALUES (...), (...)` statement.
//!
//! Run with:
//!   cargo run --example multi_row_insert -p dbworker

use dbworker::qb::{self, SqlQb};
use dbworker::{Column, ColumnType, DbError, DbResult, DbWorker, named};
use tracing_subscriber::EnvFilter;

fn main() -> DbResult<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let dir = std::env::temp_dir().join("dbworker_multi_row_insert.db");
    let db = DbWorker::new(&dir, true);

    db.drop_table("products")?;
    db.create(
        "products",
        &[
            Column::builder("sku", ColumnType::Text).primary_key().build()?,
            Column::builder("name", ColumnType::Text).not_null().build()?,
            Column::new("price_cents", ColumnType::Integer)?,
        ],
    )?;

    let skus: Vec<String> = (1..=5).map(|i| format!("SKU-{i:03}")).collect();
    let names: Vec<String> = (1..=5).map(|i| format!("Product {i}")).collect();
    let prices: Vec<i64> = (1..=5).map(|i| i * 250).collect();

    // The statement the worker will run, without running it.
    let preview = qb::insert("products")
        .set("sku", skus.clone())
        .set("name", names.clone())
        .set("price_cents", prices.clone())
        .to_sql()?;
    println!("{preview}");

    let n = db.write(
        "products",
        named! { sku = skus, name = names, price_cents = prices },
    )?;
    println!("Inserted {n} products");

    let cheap = db.read_raw("products", ["sku", "price_cents"], (), ())?;
    for row in &cheap {
        println!("  {row:?}");
    }

    // Sequences must line up; nothing is executed otherwise.
    match db.write(
        "products",
        named! { sku = ["SKU-100", "SKU-101"], name = ["only one"] },
    ) {
        Err(DbError::RowCountMismatch {
            column,
            expected,
            found,
        }) => println!("rejected: column {column} has {found} values, expected {expected}"),
        other => println!("unexpected: {other:?}"),
    }

    // Duplicate keys abort the whole statement.
    let err = db
        .write("products", named! { sku = ["SKU-900", "SKU-001"], name = ["a", "b"] })
        .unwrap_err();
    println!("duplicate rejected: {err}");
    println!(
        "SKU-900 present: {}",
        !db.read("products", "sku", ("sku", "SKU-900"))?.is_null()
    );

    db.drop_table("products")?;
    Ok(())
}
