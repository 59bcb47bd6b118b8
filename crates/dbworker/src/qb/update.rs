//! UPDATE builder.

use crate::error::DbResult;
use crate::ident::Ident;
use crate::pairs::Pairs;
use crate::qb::filter::push_where;
use crate::qb::traits::SqlQb;
use crate::sql::Sql;
use crate::value::{Cell, Value};

/// UPDATE builder.
///
/// Without conditions the statement has no WHERE clause and updates every
/// row; that is intentional and not guarded.
#[derive(Clone, Debug)]
pub struct UpdateQb {
    table: String,
    data: Pairs,
    conditions: Pairs,
}

impl UpdateQb {
    /// Create a new UPDATE builder.
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            data: Pairs::new(),
            conditions: Pairs::new(),
        }
    }

    /// Append SET assignments.
    pub fn data(mut self, data: impl Into<Pairs>) -> Self {
        self.data = self.data.extend_named(data);
        self
    }

    /// Append equality conditions.
    pub fn conditions(mut self, conditions: impl Into<Pairs>) -> Self {
        self.conditions = self.conditions.extend_named(conditions);
        self
    }

    /// Add SET: column = value
    pub fn set(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.data.push(column, Cell::One(value.into()));
        self
    }

    /// Add WHERE: column = value
    pub fn eq(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.conditions.push(column, Cell::One(value.into()));
        self
    }
}

impl SqlQb for UpdateQb {
    fn build(&self) -> DbResult<Sql> {
        let table = Ident::parse(&self.table)?;
        let assignments = self.data.normalize_assignments()?;
        let conditions = self.conditions.normalize_conditions()?;

        let mut sql = Sql::new("UPDATE ");
        sql.push_ident_ref(&table).push(" SET ");
        for (i, assignment) in assignments.into_iter().enumerate() {
            if i > 0 {
                sql.push(", ");
            }
            sql.push_ident_ref(&assignment.column)
                .push(" = ")
                .push_bind(assignment.value);
        }
        push_where(&mut sql, &conditions, &[]);
        Ok(sql)
    }
}
