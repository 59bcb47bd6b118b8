//! Statement builders, one per statement kind.
//!
//! Builders are pure: [`SqlQb::build`] normalizes the arguments and returns an
//! [`Sql`](crate::Sql) with every value bound, or an error before any
//! statement exists. Identifiers are validated; values never enter the text.
//!
//! # Usage
//!
//! ```ignore
//! use dbworker::qb::{self, SqlQb};
//!
//! let q = qb::select("users", ["id", "name"])
//!     .eq("status", "active")
//!     .like("name", "al%")
//!     .build()?;
//! assert_eq!(
//!     q.to_sql(),
//!     "SELECT id, name FROM users WHERE status = ?1 AND name LIKE ?2"
//! );
//!
//! let q = qb::insert("users")
//!     .set("name", vec!["alice", "bob"])
//!     .set("status", vec!["active", "idle"])
//!     .build()?;
//! assert_eq!(
//!     q.to_sql(),
//!     "INSERT INTO users (name, status) VALUES (?1, ?2), (?3, ?4)"
//! );
//! ```

mod create;
mod delete;
mod filter;
mod insert;
mod select;
mod traits;
mod update;

pub use create::{CreateTableQb, DropTableQb};
pub use delete::DeleteQb;
pub use insert::InsertQb;
pub use select::{Projection, SelectQb};
pub use traits::SqlQb;
pub use update::UpdateQb;

use crate::column::Column;

/// Create a CREATE TABLE builder.
pub fn create_table(table: &str, columns: &[Column]) -> CreateTableQb {
    CreateTableQb::new(table, columns)
}

/// Create a SELECT builder for the given table and projection.
pub fn select(table: &str, projection: impl Into<Projection>) -> SelectQb {
    SelectQb::new(table, projection)
}

/// Create an INSERT builder for the given table.
pub fn insert(table: &str) -> InsertQb {
    InsertQb::new(table)
}

/// Create an UPDATE builder for the given table.
pub fn update(table: &str) -> UpdateQb {
    UpdateQb::new(table)
}

/// Create a DELETE builder for the given table.
///
/// With no conditions the statement deletes every row.
pub fn delete(table: &str) -> DeleteQb {
    DeleteQb::new(table)
}

/// Create a DROP TABLE builder.
pub fn drop_table(table: &str) -> DropTableQb {
    DropTableQb::new(table)
}
