//! Basic usage example for dbworker
//!
//! Run with: cargo run --example basic -p dbworker
//!
//! Set DBWORKER_FILE in .env file or environment variable, otherwise
//! `dbworker_example.db` in the current directory is used:
//! DBWORKER_FILE=/tmp/dbworker_example.db
//!
//! RUST_LOG=dbworker.sql=debug shows every statement.

use dbworker::{Column, ColumnType, DbResult, DbWorker, Shaped, WorkerConfig, named};
use tracing_subscriber::EnvFilter;

fn main() -> DbResult<()> {
    // Load .env file
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = WorkerConfig::from_env()
        .unwrap_or_else(|_| WorkerConfig::new("dbworker_example.db"))
        .if_exists(true);
    let db = DbWorker::with_config(config);

    // Setup: start from an empty table
    db.drop_table("users")?;
    db.create(
        "users",
        &[
            Column::builder("id", ColumnType::Integer)
                .primary_key()
                .auto_increment()
                .build()?,
            Column::builder("username", ColumnType::Text)
                .not_null()
                .unique()
                .build()?,
            Column::new("email", ColumnType::Text)?,
        ],
    )?;

    // ============================================
    // Example 1: Insert
    // ============================================
    println!("=== Insert ===");

    let n = db.write(
        "users",
        named! { username = "alice", email = "alice@example.com" },
    )?;
    println!("Inserted {n} row(s)");
    db.write("users", ("username", "bob"))?;

    // ============================================
    // Example 2: Shaped reads
    // ============================================
    println!("\n=== Read ===");

    let email: Option<String> = db.read("users", "email", ("username", "alice"))?.scalar()?;
    println!("alice's email: {email:?}");

    match db.read("users", ["id", "username"], ("email", None::<String>))? {
        Shaped::Row(row) => println!("user without email: {row:?}"),
        other => println!("unexpected: {other:?}"),
    }

    let all = db.read("users", "username", ())?;
    println!("all usernames: {}", all.to_json()?);

    // ============================================
    // Example 3: Pattern match
    // ============================================
    println!("\n=== LIKE ===");

    let hits = db.read_raw("users", "*", (), ("username", "a%"))?;
    println!("usernames starting with 'a': {hits:?}");

    // ============================================
    // Example 4: Update / Delete
    // ============================================
    println!("\n=== Update / Delete ===");

    let n = db.update("users", ("email", "bob@example.com"), ("username", "bob"))?;
    println!("Updated {n} row(s)");

    let n = db.delete("users", ("username", "alice"))?;
    println!("Deleted {n} row(s)");

    // ============================================
    // Example 5: Raw SQL
    // ============================================
    println!("\n=== Raw ===");

    let rows = db.execute_raw("SELECT COUNT(*) FROM users")?;
    println!("remaining users: {:?}", rows[0][0]);

    db.drop_table("users")?;
    Ok(())
}
