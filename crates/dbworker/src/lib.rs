//! # dbworker
//!
//! A small table-level convenience layer over an embedded SQLite database.
//!
//! ## Features
//!
//! - **Column descriptors**: typed column definitions with primary-key and auto-increment rules
//! - **Flexible conditions**: maps, pair lists, single pairs and `named!{}` fields all normalize to one ordered list
//! - **Bound values only**: every value is a `?N` parameter; identifiers are validated
//! - **Multi-row inserts**: equal-length value sequences become one `INSERT ... VALUES (...), (...)`
//! - **Shaped reads**: results collapse to a scalar, a row, a column or rows by arity
//! - **One chokepoint**: every statement runs through an [`Executor`], logged with `tracing`
//!
//! ## Quick start
//!
//! ```ignore
//! use dbworker::{Column, ColumnType, DbWorker, named};
//!
//! let db = DbWorker::new("app.db", true);
//! db.create("people", &[
//!     Column::builder("id", ColumnType::Integer).primary_key().auto_increment().build()?,
//!     Column::new("name", ColumnType::Text)?,
//!     Column::new("age", ColumnType::Integer)?,
//! ])?;
//!
//! // Two rows in one statement.
//! db.write("people", named! { name = ["ann", "bob"], age = [31_i64, 42] })?;
//!
//! let name = db.read("people", "name", ("age", 42_i64))?.scalar::<String>()?;
//! let names = db.read_like("people", "name", (), ("name", "a%"))?;
//! db.update("people", ("age", 43_i64), ("name", "bob"))?;
//! db.delete("people", ())?;
//! ```
//!
//! ## Statement builders (qb)
//!
//! The worker is a thin layer over the builders in [`qb`], which can be used
//! directly with any [`Executor`]:
//!
//! ```ignore
//! use dbworker::{FileExecutor, qb, qb::SqlQb};
//!
//! let exec = FileExecutor::new("app.db");
//! let rows = qb::select("people", ["id", "name"])
//!     .eq("age", 42_i64)
//!     .like("name", "b%")
//!     .run(&exec)?;
//! ```
//!
//! There are no cross-call transactions: each operation is its own
//! connection and transaction.

pub mod column;
pub mod config;
pub mod error;
pub mod executor;
pub mod ident;
pub mod monitor;
pub mod pairs;
pub mod qb;
pub mod shape;
pub mod sql;
pub mod value;
pub mod worker;

pub use column::{Column, ColumnBuilder, ColumnType};
pub use config::WorkerConfig;
pub use error::{DbError, DbResult};
pub use executor::{Executor, FileExecutor};
pub use ident::{Ident, IntoIdent};
pub use monitor::QueryType;
pub use pairs::{ConditionPair, DataPair, Pairs};
pub use shape::{RowSet, Shaped, shape};
pub use sql::{Sql, sql};
pub use value::{Cell, FromValue, Value};
pub use worker::DbWorker;

pub use qb::{
    CreateTableQb, DeleteQb, DropTableQb, InsertQb, Projection, SelectQb, SqlQb, UpdateQb,
};
