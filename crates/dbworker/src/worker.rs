//! The `DbWorker` façade.

use crate::column::Column;
use crate::config::WorkerConfig;
use crate::error::DbResult;
use crate::executor::{Executor, FileExecutor};
use crate::pairs::Pairs;
use crate::qb::{self, Projection, SqlQb};
use crate::shape::{RowSet, Shaped};
use crate::sql::Sql;
use crate::value::Value;
use std::path::Path;

/// Table-level create, read, write, update, delete and drop over one SQLite
/// file.
///
/// Each call builds one parameterized statement and runs it through the
/// worker's [`Executor`]; with the default [`FileExecutor`] that means one
/// connection and one transaction per call. Sequences of calls are not
/// atomic.
///
/// # Example
/// ```ignore
/// use dbworker::{Column, ColumnType, DbWorker, Shaped, Value, named};
///
/// let db = DbWorker::new("app.db", true);
/// db.create("users", &[
///     Column::builder("id", ColumnType::Integer).primary_key().auto_increment().build()?,
///     Column::new("name", ColumnType::Text)?,
/// ])?;
/// db.write("users", named! { name = "alice" })?;
/// assert_eq!(
///     db.read("users", "name", ("id", 1_i64))?,
///     Shaped::Scalar(Value::from("alice")),
/// );
/// ```
#[derive(Debug, Clone)]
pub struct DbWorker<E: Executor = FileExecutor> {
    config: WorkerConfig,
    executor: E,
}

impl DbWorker<FileExecutor> {
    /// A worker on `filename`. `if_exists` adds `IF NOT EXISTS` / `IF EXISTS`
    /// to CREATE and DROP.
    pub fn new(filename: impl AsRef<Path>, if_exists: bool) -> Self {
        Self::with_config(WorkerConfig::new(filename).if_exists(if_exists))
    }

    pub fn with_config(config: WorkerConfig) -> Self {
        let executor = FileExecutor::from_config(&config);
        Self { config, executor }
    }
}

impl<E: Executor> DbWorker<E> {
    /// A worker that runs every statement through `executor`.
    pub fn with_executor(config: WorkerConfig, executor: E) -> Self {
        Self { config, executor }
    }

    pub fn config(&self) -> &WorkerConfig {
        &self.config
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Create `table` from column descriptors, in order.
    pub fn create(&self, table: &str, columns: &[Column]) -> DbResult<()> {
        qb::create_table(table, columns)
            .if_not_exists(self.config.if_exists)
            .run(&self.executor)?;
        Ok(())
    }

    /// Read with equality conditions and shape the result.
    pub fn read(
        &self,
        table: &str,
        projection: impl Into<Projection>,
        conditions: impl Into<Pairs>,
    ) -> DbResult<Shaped> {
        Ok(qb::select(table, projection)
            .conditions(conditions)
            .run(&self.executor)?
            .shape())
    }

    /// Read with equality and LIKE conditions and shape the result.
    pub fn read_like(
        &self,
        table: &str,
        projection: impl Into<Projection>,
        conditions: impl Into<Pairs>,
        patterns: impl Into<Pairs>,
    ) -> DbResult<Shaped> {
        Ok(qb::select(table, projection)
            .conditions(conditions)
            .patterns(patterns)
            .run(&self.executor)?
            .shape())
    }

    /// Like [`read_like`](Self::read_like) but always returns rows of values.
    pub fn read_raw(
        &self,
        table: &str,
        projection: impl Into<Projection>,
        conditions: impl Into<Pairs>,
        patterns: impl Into<Pairs>,
    ) -> DbResult<Vec<Vec<Value>>> {
        Ok(qb::select(table, projection)
            .conditions(conditions)
            .patterns(patterns)
            .run(&self.executor)?
            .rows)
    }

    /// Insert one row, or several when the data values are sequences of
    /// equal length. Returns the number of rows inserted.
    pub fn write(&self, table: &str, data: impl Into<Pairs>) -> DbResult<u64> {
        Ok(qb::insert(table).data(data).run(&self.executor)?.changes)
    }

    /// Update rows matching `conditions` (all rows when empty). Returns the
    /// number of rows changed.
    pub fn update(
        &self,
        table: &str,
        data: impl Into<Pairs>,
        conditions: impl Into<Pairs>,
    ) -> DbResult<u64> {
        Ok(qb::update(table)
            .data(data)
            .conditions(conditions)
            .run(&self.executor)?
            .changes)
    }

    /// Delete rows matching `conditions` (all rows when empty). Returns the
    /// number of rows removed.
    pub fn delete(&self, table: &str, conditions: impl Into<Pairs>) -> DbResult<u64> {
        Ok(qb::delete(table)
            .conditions(conditions)
            .run(&self.executor)?
            .changes)
    }

    pub fn drop_table(&self, table: &str) -> DbResult<()> {
        qb::drop_table(table)
            .if_exists(self.config.if_exists)
            .run(&self.executor)?;
        Ok(())
    }

    /// Run literal SQL unmodified and return its rows.
    ///
    /// Nothing is validated or escaped.
    pub fn execute_raw(&self, sql: &str) -> DbResult<Vec<Vec<Value>>> {
        Ok(self.executor.run(&Sql::raw(sql, Vec::<Value>::new()))?.rows)
    }

    /// Run literal SQL with `params` bound to its `?` / `?N` placeholders.
    pub fn execute_raw_with<T: Into<Value>>(
        &self,
        sql: &str,
        params: impl IntoIterator<Item = T>,
    ) -> DbResult<Vec<Vec<Value>>> {
        Ok(self.executor.run(&Sql::raw(sql, params))?.rows)
    }

    /// Run an assembled statement and return everything it produced.
    pub fn run(&self, sql: &Sql) -> DbResult<RowSet> {
        self.executor.run(sql)
    }
}
