//! INSERT builder with multi-row batching.

use crate::error::{DbError, DbResult};
use crate::ident::Ident;
use crate::pairs::{DataPair, Pairs};
use crate::qb::traits::SqlQb;
use crate::sql::Sql;
use crate::value::Cell;

/// INSERT builder.
///
/// Each data pair carries one value (one row) or a sequence (one value per
/// row). All columns must agree on the row count; a single value counts as a
/// sequence of length 1 and is never broadcast. Every row lands in one
/// statement:
///
/// ```text
/// INSERT INTO t (a, b) VALUES (?1, ?2), (?3, ?4)
/// ```
#[derive(Clone, Debug)]
pub struct InsertQb {
    table: String,
    data: Pairs,
}

impl InsertQb {
    /// Create a new INSERT builder.
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            data: Pairs::new(),
        }
    }

    /// Append data pairs.
    pub fn data(mut self, data: impl Into<Pairs>) -> Self {
        self.data = self.data.extend_named(data);
        self
    }

    /// Set a column to one value or a sequence of values.
    pub fn set(mut self, column: &str, value: impl Into<Cell>) -> Self {
        self.data.push(column, value);
        self
    }

    /// Number of rows the statement will insert.
    pub fn row_count(&self) -> DbResult<usize> {
        let data = self.data.normalize_data()?;
        aligned_row_count(&data)
    }
}

fn aligned_row_count(data: &[DataPair]) -> DbResult<usize> {
    let expected = data.first().map_or(0, |p| p.cell.len());
    for pair in data {
        let found = pair.cell.len();
        if found != expected {
            return Err(DbError::RowCountMismatch {
                column: pair.column.to_sql(),
                expected,
                found,
            });
        }
    }
    Ok(expected)
}

impl SqlQb for InsertQb {
    fn build(&self) -> DbResult<Sql> {
        let table = Ident::parse(&self.table)?;
        let data = self.data.normalize_data()?;
        let rows = aligned_row_count(&data)?;

        let mut sql = Sql::new("INSERT INTO ");
        sql.push_ident_ref(&table)
            .push(" (")
            .push_ident_list(data.iter().map(|p| &p.column))
            .push(") VALUES ");

        for row in 0..rows {
            if row > 0 {
                sql.push(", ");
            }
            sql.push("(");
            for (i, pair) in data.iter().enumerate() {
                if i > 0 {
                    sql.push(", ");
                }
                if let Some(value) = pair.cell.get(row) {
                    sql.push_bind(value.clone());
                }
            }
            sql.push(")");
        }
        Ok(sql)
    }
}
