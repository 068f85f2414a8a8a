//! 数据库操作重试
//!
//! Only transient failures are retried: lost or exhausted connections, lock
//! contention and serialization conflicts. Anything else is returned on the
//! first attempt.

use std::future::Future;
use std::time::Duration;

use rand::RngExt;
use sea_orm::DbErr;
use sea_orm::error::RuntimeErr;
use tracing::{debug, warn};

use crate::config::DatabaseConfig;

/// Database error codes that signal lock contention rather than bad input.
const TRANSIENT_CODES: &[&str] = &[
    "1205", "1213", // MySQL: lock wait timeout, deadlock
    "40001", "40P01", // PostgreSQL: serialization failure, deadlock
    "5", "6", // SQLite: BUSY, LOCKED
];

const TRANSIENT_MESSAGES: &[&str] = &[
    "database is locked",
    "deadlock",
    "lock wait timeout",
    "serialization failure",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryConfig {
    /// Attempts after the first one.
    pub max_retries: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::from(&DatabaseConfig::default())
    }
}

impl From<&DatabaseConfig> for RetryConfig {
    fn from(config: &DatabaseConfig) -> Self {
        Self {
            max_retries: config.retry_count,
            base_delay_ms: config.retry_base_delay_ms,
            max_delay_ms: config.retry_max_delay_ms,
        }
    }
}

impl RetryConfig {
    /// Delay before retry number `retry` (1-based).
    ///
    /// Doubles from `base_delay_ms`, capped at `max_delay_ms`, plus up to 25%
    /// random jitter.
    pub fn backoff(&self, retry: u32) -> Duration {
        let doublings = retry.saturating_sub(1).min(32);
        let capped = self
            .base_delay_ms
            .saturating_mul(1u64 << doublings)
            .min(self.max_delay_ms);
        let jitter = rand::rng().random_range(0..=capped / 4);
        Duration::from_millis(capped + jitter)
    }
}

/// 判断错误是否值得重试
pub fn is_transient(err: &DbErr) -> bool {
    match err {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => true,
        DbErr::Exec(inner) | DbErr::Query(inner) => is_transient_runtime(inner),
        _ => false,
    }
}

fn is_transient_runtime(err: &RuntimeErr) -> bool {
    match err {
        RuntimeErr::SqlxError(sqlx_err) => {
            let code = sqlx_err
                .as_database_error()
                .and_then(|db_err| db_err.code().map(|c| c.into_owned()));
            match code {
                Some(code) => TRANSIENT_CODES.contains(&code.as_str()),
                None => mentions_lock_contention(&sqlx_err.to_string()),
            }
        }
        RuntimeErr::Internal(msg) => mentions_lock_contention(msg),
        #[allow(unreachable_patterns)]
        _ => false,
    }
}

fn mentions_lock_contention(message: &str) -> bool {
    let message = message.to_lowercase();
    TRANSIENT_MESSAGES.iter().any(|needle| message.contains(needle))
}

/// Run `operation`, retrying transient failures per `config`.
pub async fn with_retry<T, F, Fut>(
    operation_name: &str,
    config: RetryConfig,
    mut operation: F,
) -> Result<T, DbErr>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, DbErr>>,
{
    let mut retries = 0;
    loop {
        let err = match operation().await {
            Ok(value) => {
                if retries > 0 {
                    debug!("'{}' succeeded after {} retries", operation_name, retries);
                }
                return Ok(value);
            }
            Err(err) => err,
        };

        if retries >= config.max_retries || !is_transient(&err) {
            return Err(err);
        }

        retries += 1;
        let delay = config.backoff(retries);
        warn!(
            "'{}' failed ({}/{}), retrying in {:?}: {}",
            operation_name, retries, config.max_retries, delay, err
        );
        tokio::time::sleep(delay).await;
    }
}
