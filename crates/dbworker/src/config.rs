//! Worker configuration.

use crate::error::{DbError, DbResult};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration for [`DbWorker`](crate::DbWorker).
///
/// # Example
/// ```ignore
/// use dbworker::WorkerConfig;
/// use std::time::Duration;
///
/// let config = WorkerConfig::new("app.db")
///     .if_exists(true)
///     .busy_timeout(Duration::from_secs(2))
///     .slow_query_threshold(Duration::from_millis(50));
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawWorkerConfig")]
pub struct WorkerConfig {
    /// Database file; created on first use if absent.
    pub filename: PathBuf,
    /// Add `IF NOT EXISTS` / `IF EXISTS` to CREATE and DROP.
    pub if_exists: bool,
    /// How long a statement waits on a locked database before failing.
    pub busy_timeout: Option<Duration>,
    /// Statements slower than this are logged at WARN.
    pub slow_query_threshold: Option<Duration>,
    /// Whether to emit a `tracing` event per statement.
    pub log_sql: bool,
    /// Truncate logged SQL (in bytes). `None` means no truncation.
    pub max_sql_length: Option<usize>,
}

impl WorkerConfig {
    /// Defaults for the given database file.
    pub fn new(filename: impl AsRef<Path>) -> Self {
        Self {
            filename: filename.as_ref().to_path_buf(),
            if_exists: false,
            busy_timeout: None,
            slow_query_threshold: None,
            log_sql: true,
            max_sql_length: Some(200),
        }
    }

    /// Read configuration from the environment.
    ///
    /// - `DBWORKER_FILE` (required)
    /// - `DBWORKER_IF_EXISTS` (`true`/`false`/`1`/`0`)
    /// - `DBWORKER_BUSY_TIMEOUT_MS`
    /// - `DBWORKER_SLOW_QUERY_MS`
    pub fn from_env() -> DbResult<Self> {
        let filename = std::env::var("DBWORKER_FILE")
            .map_err(|_| DbError::config("DBWORKER_FILE is not set"))?;
        let mut config = Self::new(filename);

        if let Some(v) = env_opt("DBWORKER_IF_EXISTS") {
            config.if_exists = parse_bool("DBWORKER_IF_EXISTS", &v)?;
        }
        if let Some(v) = env_opt("DBWORKER_BUSY_TIMEOUT_MS") {
            config.busy_timeout = Some(parse_millis("DBWORKER_BUSY_TIMEOUT_MS", &v)?);
        }
        if let Some(v) = env_opt("DBWORKER_SLOW_QUERY_MS") {
            config.slow_query_threshold = Some(parse_millis("DBWORKER_SLOW_QUERY_MS", &v)?);
        }
        Ok(config)
    }

    /// Set the `IF [NOT] EXISTS` flag for CREATE and DROP.
    pub fn if_exists(mut self, enabled: bool) -> Self {
        self.if_exists = enabled;
        self
    }

    /// Set the busy timeout.
    pub fn busy_timeout(mut self, duration: Duration) -> Self {
        self.busy_timeout = Some(duration);
        self
    }

    /// Set slow query threshold.
    pub fn slow_query_threshold(mut self, duration: Duration) -> Self {
        self.slow_query_threshold = Some(duration);
        self
    }

    /// Enable or disable per-statement SQL logging.
    pub fn log_sql(mut self, enabled: bool) -> Self {
        self.log_sql = enabled;
        self
    }

    /// Set maximum SQL length to log.
    pub fn max_sql_length(mut self, len: usize) -> Self {
        self.max_sql_length = Some(len);
        self
    }

    /// Disable SQL truncation in logs.
    pub fn no_truncate(mut self) -> Self {
        self.max_sql_length = None;
        self
    }
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_bool(key: &str, v: &str) -> DbResult<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(DbError::config(format!("{key}: expected a boolean, got '{v}'"))),
    }
}

fn parse_millis(key: &str, v: &str) -> DbResult<Duration> {
    v.trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| DbError::config(format!("{key}: expected milliseconds, got '{v}'")))
}

/// Serialized form: durations in milliseconds.
#[derive(Deserialize)]
struct RawWorkerConfig {
    filename: PathBuf,
    #[serde(default)]
    if_exists: bool,
    #[serde(default)]
    busy_timeout_ms: Option<u64>,
    #[serde(default)]
    slow_query_ms: Option<u64>,
    #[serde(default = "default_log_sql")]
    log_sql: bool,
    #[serde(default = "default_max_sql_length")]
    max_sql_length: Option<usize>,
}

fn default_log_sql() -> bool {
    true
}

fn default_max_sql_length() -> Option<usize> {
    Some(200)
}

impl From<RawWorkerConfig> for WorkerConfig {
    fn from(raw: RawWorkerConfig) -> Self {
        Self {
            filename: raw.filename,
            if_exists: raw.if_exists,
            busy_timeout: raw.busy_timeout_ms.map(Duration::from_millis),
            slow_query_threshold: raw.slow_query_ms.map(Duration::from_millis),
            log_sql: raw.log_sql,
            max_sql_length: raw.max_sql_length,
        }
    }
}
