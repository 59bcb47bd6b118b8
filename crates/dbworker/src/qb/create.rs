//! CREATE TABLE builder.

use crate::column::Column;
use crate::error::{DbError, DbResult};
use crate::ident::Ident;
use crate::qb::traits::SqlQb;
use crate::sql::Sql;

/// CREATE TABLE builder over a list of [`Column`] descriptors.
#[derive(Clone, Debug)]
pub struct CreateTableQb {
    table: String,
    columns: Vec<Column>,
    if_not_exists: bool,
}

/// How the table's primary key is rendered.
#[derive(Debug, PartialEq)]
enum PrimaryKey<'a> {
    None,
    AutoIncrement(&'a Ident),
    Composite(Vec<&'a Ident>),
}

impl CreateTableQb {
    /// Create a new CREATE TABLE builder.
    pub fn new(table: &str, columns: &[Column]) -> Self {
        Self {
            table: table.to_string(),
            columns: columns.to_vec(),
            if_not_exists: false,
        }
    }

    /// Add `IF NOT EXISTS`.
    pub fn if_not_exists(mut self, enabled: bool) -> Self {
        self.if_not_exists = enabled;
        self
    }

    /// Append a column.
    pub fn column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    fn primary_key(&self) -> DbResult<PrimaryKey<'_>> {
        let primary: Vec<&Column> = self.columns.iter().filter(|c| c.is_primary()).collect();
        let auto: Vec<&Column> = primary
            .iter()
            .copied()
            .filter(|c| c.is_auto_increment())
            .collect();

        match (primary.len(), auto.len()) {
            (0, _) => Ok(PrimaryKey::None),
            (_, 1) => Ok(PrimaryKey::AutoIncrement(auto[0].name())),
            (_, 0) => Ok(PrimaryKey::Composite(
                primary.iter().map(|c| c.name()).collect(),
            )),
            (_, _) => Err(DbError::config(format!(
                "Table '{}': there must be at most one auto-increment primary key, found {}",
                self.table,
                auto.len()
            ))),
        }
    }
}

impl SqlQb for CreateTableQb {
    fn build(&self) -> DbResult<Sql> {
        let table = Ident::parse(&self.table)?;
        if self.columns.is_empty() {
            return Err(DbError::shape(format!(
                "Table '{table}' needs at least one column"
            )));
        }
        let primary_key = self.primary_key()?;

        let mut sql = Sql::new(if self.if_not_exists {
            "CREATE TABLE IF NOT EXISTS "
        } else {
            "CREATE TABLE "
        });
        sql.push_ident_ref(&table).push(" (");
        for (i, column) in self.columns.iter().enumerate() {
            if i > 0 {
                sql.push(", ");
            }
            sql.push(&column.definition_sql());
        }

        match primary_key {
            PrimaryKey::None => {}
            PrimaryKey::AutoIncrement(name) => {
                sql.push(", PRIMARY KEY(")
                    .push_ident_ref(name)
                    .push(" AUTOINCREMENT)");
            }
            PrimaryKey::Composite(names) => {
                sql.push(", PRIMARY KEY(")
                    .push_ident_list(names)
                    .push(")");
            }
        }
        sql.push(")");
        Ok(sql)
    }
}

/// DROP TABLE builder.
#[derive(Clone, Debug)]
pub struct DropTableQb {
    table: String,
    if_exists: bool,
}

impl DropTableQb {
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            if_exists: false,
        }
    }

    /// Add `IF EXISTS`.
    pub fn if_exists(mut self, enabled: bool) -> Self {
        self.if_exists = enabled;
        self
    }
}

impl SqlQb for DropTableQb {
    fn build(&self) -> DbResult<Sql> {
        let table = Ident::parse(&self.table)?;
        let mut sql = Sql::new(if self.if_exists {
            "DROP TABLE IF EXISTS "
        } else {
            "DROP TABLE "
        });
        sql.push_ident_ref(&table);
        Ok(sql)
    }
}
