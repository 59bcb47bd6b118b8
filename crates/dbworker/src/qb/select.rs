//! SELECT builder with equality and pattern conditions.

use crate::error::{DbError, DbResult};
use crate::ident::Ident;
use crate::pairs::Pairs;
use crate::qb::filter::push_where;
use crate::qb::traits::SqlQb;
use crate::sql::Sql;
use crate::value::{Cell, Value};

/// The column list of a SELECT.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Projection {
    /// `*`
    All,
    /// Named columns, in order.
    Columns(Vec<String>),
}

impl Projection {
    /// Number of requested columns, if known before execution.
    pub fn column_count(&self) -> Option<usize> {
        match self {
            Projection::All => None,
            Projection::Columns(cols) => Some(cols.len()),
        }
    }

    fn push_to(&self, sql: &mut Sql) -> DbResult<()> {
        match self {
            Projection::All => {
                sql.push("*");
            }
            Projection::Columns(cols) if cols.is_empty() => {
                return Err(DbError::shape("Projection needs at least one column"));
            }
            Projection::Columns(cols) => {
                let idents = cols
                    .iter()
                    .map(|c| Ident::parse(c))
                    .collect::<DbResult<Vec<_>>>()?;
                sql.push_ident_list(&idents);
            }
        }
        Ok(())
    }
}

impl From<&str> for Projection {
    fn from(col: &str) -> Self {
        if col.trim() == "*" {
            Projection::All
        } else {
            Projection::Columns(vec![col.to_string()])
        }
    }
}

impl From<String> for Projection {
    fn from(col: String) -> Self {
        Projection::from(col.as_str())
    }
}

impl From<Vec<String>> for Projection {
    fn from(cols: Vec<String>) -> Self {
        Projection::Columns(cols)
    }
}

impl<'a> From<Vec<&'a str>> for Projection {
    fn from(cols: Vec<&'a str>) -> Self {
        Projection::Columns(cols.into_iter().map(str::to_string).collect())
    }
}

impl<'a> From<&[&'a str]> for Projection {
    fn from(cols: &[&'a str]) -> Self {
        Projection::Columns(cols.iter().map(|c| c.to_string()).collect())
    }
}

impl<'a, const N: usize> From<[&'a str; N]> for Projection {
    fn from(cols: [&'a str; N]) -> Self {
        Projection::Columns(cols.iter().map(|c| c.to_string()).collect())
    }
}

/// SELECT builder.
///
/// Equality conditions render as `col = ?N` (or `col IS NULL`), pattern
/// conditions as `col LIKE ?N` using SQLite's `%` and `_` wildcards.
#[derive(Clone, Debug)]
pub struct SelectQb {
    table: String,
    projection: Projection,
    conditions: Pairs,
    patterns: Pairs,
}

impl SelectQb {
    /// Create a new SELECT builder.
    pub fn new(table: &str, projection: impl Into<Projection>) -> Self {
        Self {
            table: table.to_string(),
            projection: projection.into(),
            conditions: Pairs::new(),
            patterns: Pairs::new(),
        }
    }

    /// Append equality conditions.
    pub fn conditions(mut self, conditions: impl Into<Pairs>) -> Self {
        self.conditions = self.conditions.extend_named(conditions);
        self
    }

    /// Append pattern (LIKE) conditions.
    pub fn patterns(mut self, patterns: impl Into<Pairs>) -> Self {
        self.patterns = self.patterns.extend_named(patterns);
        self
    }

    /// Add WHERE: column = value
    pub fn eq(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.conditions.push(column, Cell::One(value.into()));
        self
    }

    /// Add WHERE: column IS NULL
    pub fn is_null(self, column: &str) -> Self {
        self.eq(column, Value::Null)
    }

    /// Add WHERE: column LIKE pattern
    pub fn like(mut self, column: &str, pattern: impl Into<Value>) -> Self {
        self.patterns.push(column, Cell::One(pattern.into()));
        self
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }
}

impl SqlQb for SelectQb {
    fn build(&self) -> DbResult<Sql> {
        let table = Ident::parse(&self.table)?;
        let equals = self.conditions.normalize_conditions()?;
        let patterns = self.patterns.normalize_conditions()?;

        let mut sql = Sql::new("SELECT ");
        self.projection.push_to(&mut sql)?;
        sql.push(" FROM ").push_ident_ref(&table);
        push_where(&mut sql, &equals, &patterns);
        Ok(sql)
    }
}
