use super::parts::SqlPart;
use crate::error::DbResult;
use crate::ident::{Ident, IntoIdent};
use crate::value::Value;

/// A parameter-safe SQL statement.
///
/// `Sql` stores SQL pieces and bound values separately and generates `?1, ?2, ...`
/// placeholders in the final SQL string.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct Sql {
    parts: Vec<SqlPart>,
    params: Vec<Value>,
}

impl Sql {
    /// Create a new builder with an initial SQL fragment.
    pub fn new(initial_sql: impl Into<String>) -> Self {
        Self {
            parts: vec![SqlPart::Raw(initial_sql.into())],
            params: Vec::new(),
        }
    }

    /// Wrap literal SQL that carries its own placeholders, with the values
    /// bound to them positionally. The text is not inspected.
    pub fn raw<T: Into<Value>>(text: impl Into<String>, params: impl IntoIterator<Item = T>) -> Self {
        Self {
            parts: vec![SqlPart::Raw(text.into())],
            params: params.into_iter().map(Into::into).collect(),
        }
    }

    /// Create an empty builder.
    pub fn empty() -> Self {
        Self {
            parts: Vec::new(),
            params: Vec::new(),
        }
    }

    /// Append raw SQL (no parameters).
    pub fn push(&mut self, sql: &str) -> &mut Self {
        if sql.is_empty() {
            return self;
        }

        match self.parts.last_mut() {
            Some(SqlPart::Raw(last)) => last.push_str(sql),
            _ => self.parts.push(SqlPart::Raw(sql.to_string())),
        }
        self
    }

    /// Append a placeholder and bind its value.
    pub fn push_bind(&mut self, value: impl Into<Value>) -> &mut Self {
        self.parts.push(SqlPart::Param);
        self.params.push(value.into());
        self
    }

    /// Append a comma-separated list of placeholders and bind all values.
    pub fn push_bind_list<T: Into<Value>>(
        &mut self,
        values: impl IntoIterator<Item = T>,
    ) -> &mut Self {
        for (i, v) in values.into_iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            self.push_bind(v);
        }
        self
    }

    /// Append another `Sql` fragment, consuming it.
    pub fn push_sql(&mut self, mut other: Sql) -> &mut Self {
        self.parts.append(&mut other.parts);
        self.params.append(&mut other.params);
        self
    }

    /// Append a SQL identifier, validating it first.
    pub fn push_ident<I: IntoIdent>(&mut self, ident: I) -> DbResult<&mut Self> {
        let ident = ident.into_ident()?;
        Ok(self.push_ident_ref(&ident))
    }

    /// Append a pre-validated [`Ident`].
    pub fn push_ident_ref(&mut self, ident: &Ident) -> &mut Self {
        match self.parts.last_mut() {
            Some(SqlPart::Raw(last)) => ident.write_sql(last),
            _ => {
                let mut s = String::new();
                ident.write_sql(&mut s);
                self.parts.push(SqlPart::Raw(s));
            }
        }
        self
    }

    /// Append identifiers separated by `", "`.
    pub fn push_ident_list<'a>(&mut self, idents: impl IntoIterator<Item = &'a Ident>) -> &mut Self {
        for (i, ident) in idents.into_iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            self.push_ident_ref(ident);
        }
        self
    }

    /// Bind a value and return `self` (consuming version of [`push_bind`](Sql::push_bind)).
    pub fn bind(mut self, value: impl Into<Value>) -> Self {
        self.push_bind(value);
        self
    }

    /// Render SQL with `?1, ?2, ...` placeholders.
    pub fn to_sql(&self) -> String {
        let cap = self
            .parts
            .iter()
            .map(|part| match part {
                SqlPart::Raw(s) => s.len(),
                SqlPart::Param => 4,
            })
            .sum();

        let mut out = String::with_capacity(cap);
        let mut idx: usize = 0;
        for part in &self.parts {
            match part {
                SqlPart::Raw(s) => out.push_str(s),
                SqlPart::Param => {
                    idx += 1;
                    out.push('?');
                    out.push_str(&idx.to_string());
                }
            }
        }
        out
    }

    /// Bound values, in placeholder order.
    pub fn params(&self) -> &[Value] {
        &self.params
    }

    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    /// Split into rendered text and bound values.
    pub fn into_parts(self) -> (String, Vec<Value>) {
        let sql = self.to_sql();
        (sql, self.params)
    }
}
