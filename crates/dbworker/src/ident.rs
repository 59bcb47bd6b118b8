//! SQL identifier validation.
//!
//! Identifiers cannot be bound as parameters, so every table and column name
//! that reaches a statement goes through [`Ident`] first.
//!
//! - Plain names match `[A-Za-z_][A-Za-z0-9_]*` and render as-is.
//! - `schema.table` / `table.column` dotted forms are accepted (at most three parts).
//! - [`Ident::quoted`] wraps any other name in double quotes, doubling embedded `"`.

use crate::error::{DbError, DbResult};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Plain(String),
    Quoted(String),
}

/// A validated SQL identifier (table, column, or `schema.table`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    segments: Vec<Segment>,
}

impl Ident {
    /// Parse a plain or dotted identifier.
    pub fn parse(s: &str) -> DbResult<Self> {
        if s.is_empty() {
            return Err(DbError::validation("Identifier cannot be empty"));
        }

        let mut segments = Vec::new();
        for part in s.split('.') {
            validate_plain(part, s)?;
            segments.push(Segment::Plain(part.to_string()));
        }
        if segments.len() > 3 {
            return Err(DbError::validation(format!(
                "Identifier '{s}' has more than three dotted parts"
            )));
        }
        Ok(Self { segments })
    }

    /// Create a single quoted identifier from an arbitrary name.
    ///
    /// Use this for names with spaces, keywords, or mixed punctuation.
    pub fn quoted(name: &str) -> DbResult<Self> {
        if name.is_empty() {
            return Err(DbError::validation("Empty quoted identifier"));
        }
        if name.contains('\0') {
            return Err(DbError::validation(
                "Identifier cannot contain NUL character",
            ));
        }
        Ok(Self {
            segments: vec![Segment::Quoted(name.to_string())],
        })
    }

    /// The unqualified (last) part of the identifier, unquoted.
    pub fn name(&self) -> &str {
        match self.segments.last() {
            Some(Segment::Plain(s)) | Some(Segment::Quoted(s)) => s,
            None => "",
        }
    }

    /// Render the identifier as SQL.
    pub fn to_sql(&self) -> String {
        let mut out = String::new();
        self.write_sql(&mut out);
        out
    }

    pub(crate) fn write_sql(&self, out: &mut String) {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                out.push('.');
            }
            match segment {
                Segment::Plain(s) => out.push_str(s),
                Segment::Quoted(s) => {
                    out.push('"');
                    out.push_str(&s.replace('"', "\"\""));
                    out.push('"');
                }
            }
        }
    }
}

fn validate_plain(part: &str, whole: &str) -> DbResult<()> {
    let mut chars = part.chars();
    match chars.next() {
        None => {
            return Err(DbError::validation(format!(
                "Empty segment in identifier '{whole}'"
            )));
        }
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {}
        Some(c) => {
            return Err(DbError::validation(format!(
                "Invalid identifier start character '{c}' in '{whole}'"
            )));
        }
    }
    if let Some(c) = chars.find(|c| !(*c == '_' || c.is_ascii_alphanumeric())) {
        return Err(DbError::validation(format!(
            "Invalid character '{c}' in identifier '{whole}'"
        )));
    }
    Ok(())
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}

/// Convert an input into an [`Ident`].
pub trait IntoIdent {
    fn into_ident(self) -> DbResult<Ident>;
}

impl IntoIdent for Ident {
    fn into_ident(self) -> DbResult<Ident> {
        Ok(self)
    }
}

impl IntoIdent for &Ident {
    fn into_ident(self) -> DbResult<Ident> {
        Ok(self.clone())
    }
}

impl IntoIdent for &str {
    fn into_ident(self) -> DbResult<Ident> {
        Ident::parse(self)
    }
}

impl IntoIdent for String {
    fn into_ident(self) -> DbResult<Ident> {
        Ident::parse(&self)
    }
}

impl IntoIdent for &String {
    fn into_ident(self) -> DbResult<Ident> {
        Ident::parse(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_and_dotted() {
        assert_eq!(Ident::parse("users").unwrap().to_sql(), "users");
        assert_eq!(Ident::parse("main.users").unwrap().to_sql(), "main.users");
        assert_eq!(Ident::parse("main.users").unwrap().name(), "users");
    }

    #[test]
    fn quoted_escapes_double_quote() {
        let ident = Ident::quoted(r#"odd "name""#).unwrap();
        assert_eq!(ident.to_sql(), r#""odd ""name""""#);
    }

    #[test]
    fn rejects_injection_attempts() {
        assert!(Ident::parse("users; DROP TABLE users").is_err());
        assert!(Ident::parse("name'--").is_err());
        assert!(Ident::parse("1users").is_err());
        assert!(Ident::parse("a..b").is_err());
        assert!(Ident::parse("a.").is_err());
        assert!(Ident::parse("").is_err());
        assert!(Ident::parse("a.b.c.d").is_err());
    }
}
