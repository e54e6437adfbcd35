//! Read-only message store backed by the Messages `chat.db`.
//!
//! Implements `MessageSource` from `smscode-core`. Rows are streamed one at
//! a time so a visitor that stops early never causes the rest of the result
//! set to be read.

use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use std::time::Duration;

use futures_util::TryStreamExt;
use smscode_core::repository::message::MessageSource;
use smscode_types::error::{ConfigError, StorageError};
use smscode_types::message::Message;
use sqlx::Row;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

/// SMS messages with a known sender and a body, newest first.
const RECENT_SMS_QUERY: &str = "\
    SELECT h.uncanonicalized_id, m.text, m.date \
    FROM message m \
    INNER JOIN handle h ON m.handle_id = h.rowid \
    WHERE m.service = 'SMS' \
      AND h.uncanonicalized_id IS NOT NULL \
      AND m.text IS NOT NULL \
    ORDER BY m.date DESC \
    LIMIT ?";

/// Location of the Messages database relative to the home directory.
const STORE_RELATIVE_PATH: &str = "Library/Messages/chat.db";

/// Read-only pool over the message database.
///
/// The pool connects lazily: opening never fails, and a missing or
/// unreadable database surfaces as [`StorageError::Open`] on first use.
#[derive(Clone)]
pub struct SqliteMessageStore {
    pool: SqlitePool,
    path: PathBuf,
}

impl SqliteMessageStore {
    /// Create a store for the database at `path`. Must be called inside a
    /// Tokio runtime.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let options = SqliteConnectOptions::new()
            .filename(&path)
            .read_only(true)
            .create_if_missing(false)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .acquire_timeout(Duration::from_secs(5))
            .connect_lazy_with(options);

        Self { pool, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MessageSource for SqliteMessageStore {
    async fn for_each_recent_message<F>(
        &self,
        limit: u32,
        mut visit: F,
    ) -> Result<(), StorageError>
    where
        F: FnMut(Message) -> ControlFlow<()> + Send,
    {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| StorageError::Open(e.to_string()))?;

        let mut rows = sqlx::query(RECENT_SMS_QUERY)
            .bind(i64::from(limit))
            .fetch(&mut *conn);

        while let Some(row) = rows
            .try_next()
            .await
            .map_err(|e| StorageError::Query(e.to_string()))?
        {
            let sender: String = row
                .try_get(0)
                .map_err(|e| StorageError::Decode(e.to_string()))?;
            let text: String = row
                .try_get(1)
                .map_err(|e| StorageError::Decode(e.to_string()))?;
            let date: i64 = row
                .try_get(2)
                .map_err(|e| StorageError::Decode(e.to_string()))?;

            if visit(Message::from_store(sender, text, date)).is_break() {
                break;
            }
        }

        Ok(())
    }
}

/// Default message database for the current user
/// (`~/Library/Messages/chat.db`).
pub fn default_store_path() -> Result<PathBuf, ConfigError> {
    dirs::home_dir()
        .map(|home| home.join(STORE_RELATIVE_PATH))
        .ok_or_else(|| ConfigError::StoreLocation("home directory not found".to_string()))
}
