//! Statement classification and SQL logging at the executor chokepoint.
//!
//! With the `tracing` feature (on by default) every executed statement emits
//! one event on target `dbworker.sql`:
//!
//! - DEBUG for ordinary statements,
//! - WARN when the statement exceeded the slow query threshold,
//! - ERROR when the engine rejected it.
//!
//! Without the feature the logger compiles to nothing.

use crate::config::WorkerConfig;
use crate::sql::{starts_with_keyword, strip_sql_prefix};
use std::fmt;
use std::time::Duration;

/// Truncate a string to at most `max_bytes` bytes on a char boundary.
pub(crate) fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}

/// The kind of statement being executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryType {
    Select,
    Insert,
    Update,
    Delete,
    Create,
    Drop,
    /// Anything else (PRAGMA, raw statements, ...)
    Other,
}

impl QueryType {
    /// Detect the statement kind from its leading keyword.
    pub fn from_sql(sql: &str) -> Self {
        let trimmed = strip_sql_prefix(sql);
        [
            ("SELECT", QueryType::Select),
            ("INSERT", QueryType::Insert),
            ("UPDATE", QueryType::Update),
            ("DELETE", QueryType::Delete),
            ("CREATE", QueryType::Create),
            ("DROP", QueryType::Drop),
        ]
        .into_iter()
        .find(|(keyword, _)| starts_with_keyword(trimmed, keyword))
        .map_or(QueryType::Other, |(_, kind)| kind)
    }
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            QueryType::Select => "SELECT",
            QueryType::Insert => "INSERT",
            QueryType::Update => "UPDATE",
            QueryType::Delete => "DELETE",
            QueryType::Create => "CREATE",
            QueryType::Drop => "DROP",
            QueryType::Other => "OTHER",
        };
        f.write_str(s)
    }
}

/// What the executor reports about one finished statement.
#[derive(Debug, Clone)]
pub struct StatementEvent<'a> {
    pub sql: &'a str,
    pub param_count: usize,
    pub rows: usize,
    pub changes: u64,
    pub elapsed: Duration,
}

/// Emits statement events according to a [`WorkerConfig`].
#[derive(Debug, Clone)]
#[cfg_attr(not(feature = "tracing"), allow(dead_code))]
pub struct SqlLogger {
    enabled: bool,
    max_sql_length: Option<usize>,
    slow_query_threshold: Option<Duration>,
}

impl SqlLogger {
    pub fn from_config(config: &WorkerConfig) -> Self {
        Self {
            enabled: config.log_sql,
            max_sql_length: config.max_sql_length,
            slow_query_threshold: config.slow_query_threshold,
        }
    }

    /// A logger that never emits.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            max_sql_length: None,
            slow_query_threshold: None,
        }
    }

    pub fn is_slow(&self, elapsed: Duration) -> bool {
        self.slow_query_threshold.is_some_and(|t| elapsed >= t)
    }

    #[cfg(feature = "tracing")]
    fn truncate<'s>(&self, sql: &'s str) -> std::borrow::Cow<'s, str> {
        match self.max_sql_length {
            Some(max) if sql.len() > max => format!("{}...", truncate_sql_bytes(sql, max)).into(),
            _ => sql.into(),
        }
    }

    #[cfg(feature = "tracing")]
    pub fn statement(&self, event: &StatementEvent<'_>) {
        if !self.enabled && !self.is_slow(event.elapsed) {
            return;
        }
        let query_type = QueryType::from_sql(event.sql);
        let sql = self.truncate(event.sql);
        let elapsed_ms = event.elapsed.as_secs_f64() * 1000.0;
        if self.is_slow(event.elapsed) {
            tracing::warn!(
                target: "dbworker.sql",
                %query_type,
                param_count = event.param_count,
                rows = event.rows,
                changes = event.changes,
                elapsed_ms,
                sql = %sql,
                "slow statement",
            );
        } else {
            tracing::debug!(
                target: "dbworker.sql",
                %query_type,
                param_count = event.param_count,
                rows = event.rows,
                changes = event.changes,
                elapsed_ms,
                sql = %sql,
            );
        }
    }

    #[cfg(not(feature = "tracing"))]
    pub fn statement(&self, _event: &StatementEvent<'_>) {}

    #[cfg(feature = "tracing")]
    pub fn failure(&self, sql: &str, error: &dyn std::error::Error) {
        let query_type = QueryType::from_sql(sql);
        let sql = self.truncate(sql);
        tracing::error!(
            target: "dbworker.sql",
            %query_type,
            sql = %sql,
            error = %error,
            "statement failed",
        );
    }

    #[cfg(not(feature = "tracing"))]
    pub fn failure(&self, _sql: &str, _error: &dyn std::error::Error) {}
}
