//! Column descriptors for `CREATE TABLE`.
//!
//! A [`Column`] is validated once, in [`ColumnBuilder::build`], and is
//! immutable afterwards.
//!
//! ```ignore
//! use dbworker::{Column, ColumnType};
//!
//! let id = Column::builder("id", ColumnType::Integer)
//!     .primary_key()
//!     .auto_increment()
//!     .build()?;
//! let name = Column::new("name", ColumnType::Text)?;
//! ```

use crate::error::{DbError, DbResult};
use crate::ident::Ident;
use std::fmt;
use std::str::FromStr;

/// Declared column type. SQLite's five type affinities, nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Integer,
    Text,
    Blob,
    Real,
    Numeric,
}

impl ColumnType {
    pub fn as_sql(self) -> &'static str {
        match self {
            ColumnType::Integer => "INTEGER",
            ColumnType::Text => "TEXT",
            ColumnType::Blob => "BLOB",
            ColumnType::Real => "REAL",
            ColumnType::Numeric => "NUMERIC",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl FromStr for ColumnType {
    type Err = DbError;

    fn from_str(s: &str) -> DbResult<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "INTEGER" => Ok(ColumnType::Integer),
            "TEXT" => Ok(ColumnType::Text),
            "BLOB" => Ok(ColumnType::Blob),
            "REAL" => Ok(ColumnType::Real),
            "NUMERIC" => Ok(ColumnType::Numeric),
            other => Err(DbError::config(format!("Unknown column type '{other}'"))),
        }
    }
}

/// Immutable description of one table column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    name: Ident,
    column_type: ColumnType,
    not_null: bool,
    unique: bool,
    primary_key: bool,
    auto_increment: bool,
}

impl Column {
    /// A plain column with no constraints.
    pub fn new(name: &str, column_type: ColumnType) -> DbResult<Self> {
        Self::builder(name, column_type).build()
    }

    /// Start describing a column.
    pub fn builder(name: &str, column_type: ColumnType) -> ColumnBuilder {
        ColumnBuilder {
            name: name.to_string(),
            column_type: Ok(column_type),
            not_null: false,
            unique: false,
            primary_key: false,
            auto_increment: false,
        }
    }

    /// Start describing a column whose type is given by name (`"INTEGER"`, `"text"`, ...).
    ///
    /// An unrecognized type name surfaces as a configuration error from `build()`.
    pub fn builder_typed(name: &str, type_name: &str) -> ColumnBuilder {
        let mut builder = Self::builder(name, ColumnType::Integer);
        builder.column_type = type_name.parse();
        builder
    }

    pub fn name(&self) -> &Ident {
        &self.name
    }

    pub fn column_type(&self) -> ColumnType {
        self.column_type
    }

    pub fn is_not_null(&self) -> bool {
        self.not_null
    }

    pub fn is_unique(&self) -> bool {
        self.unique
    }

    pub fn is_primary(&self) -> bool {
        self.primary_key
    }

    pub fn is_auto_increment(&self) -> bool {
        self.auto_increment
    }

    /// The column-definition fragment: `name TYPE [NOT NULL] [UNIQUE]`.
    pub fn definition_sql(&self) -> String {
        let mut out = String::new();
        self.name.write_sql(&mut out);
        out.push(' ');
        out.push_str(self.column_type.as_sql());
        if self.not_null {
            out.push_str(" NOT NULL");
        }
        if self.unique {
            out.push_str(" UNIQUE");
        }
        out
    }
}

/// Builder for [`Column`]; validation happens in [`build`](ColumnBuilder::build).
#[derive(Debug)]
#[must_use]
pub struct ColumnBuilder {
    name: String,
    column_type: DbResult<ColumnType>,
    not_null: bool,
    unique: bool,
    primary_key: bool,
    auto_increment: bool,
}

impl ColumnBuilder {
    pub fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    pub fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    /// Validate and produce the descriptor.
    pub fn build(self) -> DbResult<Column> {
        let column_type = self.column_type?;
        let name = Ident::parse(&self.name)?;

        if self.auto_increment && !self.primary_key {
            return Err(DbError::config(format!(
                "Column '{name}': auto-increment requires a primary key"
            )));
        }
        if self.auto_increment && column_type != ColumnType::Integer {
            return Err(DbError::config(format!(
                "Column '{name}': auto-increment is only allowed on INTEGER, not {column_type}"
            )));
        }

        Ok(Column {
            name,
            column_type,
            not_null: self.not_null,
            unique: self.unique,
            primary_key: self.primary_key,
            auto_increment: self.auto_increment,
        })
    }
}
