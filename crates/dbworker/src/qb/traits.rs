//! Trait definitions for statement builders.

use crate::error::DbResult;
use crate::executor::Executor;
use crate::shape::RowSet;
use crate::sql::Sql;

/// Base trait for all statement builders.
///
/// Building is pure: it normalizes the builder's arguments and assembles an
/// [`Sql`], or fails before anything reaches an executor.
pub trait SqlQb {
    /// Normalize arguments and assemble the statement.
    fn build(&self) -> DbResult<Sql>;

    /// Debug helper to get the rendered SQL string.
    fn to_sql(&self) -> DbResult<String> {
        Ok(self.build()?.to_sql())
    }

    /// Build and run the statement through `exec`.
    fn run<E: Executor + ?Sized>(&self, exec: &E) -> DbResult<RowSet> {
        let sql = self.build()?;
        exec.run(&sql)
    }
}
