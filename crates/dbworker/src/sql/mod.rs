//! Parameter-safe SQL assembly.
//!
//! Every statement the worker runs is an [`Sql`]: text fragments plus bound
//! [`Value`](crate::Value)s. Placeholders (`?1, ?2, ...`) are numbered when
//! the text is rendered, so fragments can be composed freely.
//!
//! # Example
//!
//! ```ignore
//! use dbworker::sql;
//!
//! let mut q = sql("SELECT name FROM users WHERE id = ");
//! q.push_bind(1_i64);
//! assert_eq!(q.to_sql(), "SELECT name FROM users WHERE id = ?1");
//! ```

mod builder;
mod parts;

#[cfg(test)]
mod tests;

pub use builder::Sql;

/// Start building a SQL statement.
pub fn sql(initial_sql: impl Into<String>) -> Sql {
    Sql::new(initial_sql)
}

/// Strip leading whitespace, SQL comments (`--` and `/* */`), and parentheses
/// from a SQL string to find the first meaningful keyword.
pub(crate) fn strip_sql_prefix(sql: &str) -> &str {
    let mut s = sql;
    loop {
        let before = s;
        s = s.trim_start();
        if let Some(rest) = s.strip_prefix("--") {
            match rest.find('\n') {
                Some(pos) => {
                    s = &rest[pos + 1..];
                    continue;
                }
                None => return "",
            }
        }
        if let Some(rest) = s.strip_prefix("/*") {
            match rest.find("*/") {
                Some(pos) => {
                    s = &rest[pos + 2..];
                    continue;
                }
                None => return "",
            }
        }
        if let Some(rest) = s.strip_prefix('(') {
            s = rest;
            continue;
        }
        if s == before {
            break;
        }
    }
    s
}

pub(crate) fn starts_with_keyword(s: &str, keyword: &str) -> bool {
    match s.get(0..keyword.len()) {
        Some(prefix) => prefix.eq_ignore_ascii_case(keyword),
        None => false,
    }
}
