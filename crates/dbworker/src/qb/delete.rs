//! DELETE builder.

use crate::error::DbResult;
use crate::ident::Ident;
use crate::pairs::Pairs;
use crate::qb::filter::push_where;
use crate::qb::traits::SqlQb;
use crate::sql::Sql;
use crate::value::{Cell, Value};

/// DELETE builder.
///
/// Without conditions the statement deletes every row.
#[derive(Clone, Debug)]
pub struct DeleteQb {
    table: String,
    conditions: Pairs,
}

impl DeleteQb {
    /// Create a new DELETE builder.
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            conditions: Pairs::new(),
        }
    }

    /// Append equality conditions.
    pub fn conditions(mut self, conditions: impl Into<Pairs>) -> Self {
        self.conditions = self.conditions.extend_named(conditions);
        self
    }

    /// Add WHERE: column = value
    pub fn eq(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.conditions.push(column, Cell::One(value.into()));
        self
    }
}

impl SqlQb for DeleteQb {
    fn build(&self) -> DbResult<Sql> {
        let table = Ident::parse(&self.table)?;
        let conditions = self.conditions.normalize_conditions()?;

        let mut sql = Sql::new("DELETE FROM ");
        sql.push_ident_ref(&table);
        push_where(&mut sql, &conditions, &[]);
        Ok(sql)
    }
}
