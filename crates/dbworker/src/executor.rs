//! The single place statements reach the engine.
//!
//! [`FileExecutor`] opens a connection per statement, runs it inside a
//! transaction, collects every row, commits and closes. There is no pooling
//! and no state shared between calls.

use crate::config::WorkerConfig;
use crate::error::{DbError, DbResult};
use crate::monitor::{SqlLogger, StatementEvent};
use crate::shape::RowSet;
use crate::sql::Sql;
use crate::value::Value;
use rusqlite::{Connection, params_from_iter};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Runs assembled statements.
///
/// Every [`DbWorker`](crate::DbWorker) operation funnels through one
/// `Executor`, so substituting it intercepts all database access.
pub trait Executor {
    /// Execute `sql` with its bound values and return everything it produced.
    fn run(&self, sql: &Sql) -> DbResult<RowSet>;
}

impl<E: Executor + ?Sized> Executor for &E {
    fn run(&self, sql: &Sql) -> DbResult<RowSet> {
        (**self).run(sql)
    }
}

impl<E: Executor + ?Sized> Executor for Box<E> {
    fn run(&self, sql: &Sql) -> DbResult<RowSet> {
        (**self).run(sql)
    }
}

impl<E: Executor + ?Sized> Executor for Arc<E> {
    fn run(&self, sql: &Sql) -> DbResult<RowSet> {
        (**self).run(sql)
    }
}

/// Executor backed by a SQLite database file.
#[derive(Debug, Clone)]
pub struct FileExecutor {
    filename: PathBuf,
    busy_timeout: Option<Duration>,
    logger: SqlLogger,
}

impl FileExecutor {
    pub fn new(filename: impl AsRef<Path>) -> Self {
        Self::from_config(&WorkerConfig::new(filename))
    }

    pub fn from_config(config: &WorkerConfig) -> Self {
        Self {
            filename: config.filename.clone(),
            busy_timeout: config.busy_timeout,
            logger: SqlLogger::from_config(config),
        }
    }

    pub fn filename(&self) -> &Path {
        &self.filename
    }

    fn connect(&self) -> rusqlite::Result<Connection> {
        let conn = Connection::open(&self.filename)?;
        if let Some(timeout) = self.busy_timeout {
            conn.busy_timeout(timeout)?;
        }
        Ok(conn)
    }

    fn run_once(&self, sql: &str, params: &[Value]) -> rusqlite::Result<RowSet> {
        let mut conn = self.connect()?;
        let result = run_in_transaction(&mut conn, sql, params)?;
        conn.close().map_err(|(_, e)| e)?;
        Ok(result)
    }
}

impl Executor for FileExecutor {
    fn run(&self, sql: &Sql) -> DbResult<RowSet> {
        let text = sql.to_sql();
        let start = Instant::now();
        match self.run_once(&text, sql.params()) {
            Ok(result) => {
                self.logger.statement(&StatementEvent {
                    sql: &text,
                    param_count: sql.param_count(),
                    rows: result.len(),
                    changes: result.changes,
                    elapsed: start.elapsed(),
                });
                Ok(result)
            }
            Err(e) => {
                self.logger.failure(&text, &e);
                Err(DbError::from_engine(e))
            }
        }
    }
}

fn run_in_transaction(
    conn: &mut Connection,
    sql: &str,
    params: &[Value],
) -> rusqlite::Result<RowSet> {
    let tx = conn.transaction()?;
    let result = {
        let mut stmt = tx.prepare(sql)?;
        let columns: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(String::from)
            .collect();
        let width = columns.len();
        let readonly = stmt.readonly();

        let mut rows = Vec::new();
        let mut cursor = stmt.query(params_from_iter(params))?;
        while let Some(row) = cursor.next()? {
            let mut values = Vec::with_capacity(width);
            for i in 0..width {
                values.push(row.get::<_, Value>(i)?);
            }
            rows.push(values);
        }
        drop(cursor);

        let changes = if readonly { 0 } else { tx.changes() };
        RowSet {
            columns,
            rows,
            changes,
        }
    };
    tx.commit()?;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::sql;

    #[test]
    fn runs_statements_against_a_fresh_file() {
        let dir = tempfile::tempdir().unwrap();
        let exec = FileExecutor::new(dir.path().join("exec.db"));

        exec.run(&sql("CREATE TABLE t (a INTEGER, b TEXT)")).unwrap();
        let mut insert = sql("INSERT INTO t (a, b) VALUES (");
        insert.push_bind_list([Value::Integer(1), Value::from("x")]).push(")");
        let inserted = exec.run(&insert).unwrap();
        assert_eq!(inserted.changes, 1);
        assert!(inserted.is_empty());

        let read = exec.run(&sql("SELECT a, b FROM t")).unwrap();
        assert_eq!(read.columns, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(
            read.rows,
            vec![vec![Value::Integer(1), Value::Text("x".into())]]
        );
        assert_eq!(read.changes, 0);
    }

    #[test]
    fn engine_errors_are_returned() {
        let dir = tempfile::tempdir().unwrap();
        let exec = FileExecutor::new(dir.path().join("exec.db"));
        let err = exec.run(&sql("SELECT * FROM missing")).unwrap_err();
        assert!(matches!(err, DbError::Engine(_)));
    }

    #[test]
    fn works_through_shared_references() {
        let dir = tempfile::tempdir().unwrap();
        let exec: Arc<dyn Executor> = Arc::new(FileExecutor::new(dir.path().join("exec.db")));
        let one = exec.run(&sql("SELECT 1")).unwrap();
        assert_eq!(one.rows, vec![vec![Value::Integer(1)]]);
    }
}
