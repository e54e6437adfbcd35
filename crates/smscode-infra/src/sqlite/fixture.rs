//! Throwaway message databases with the Messages schema, for tests.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{TimeZone, Utc};
use smscode_types::message::utc_to_store_time;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

/// The subset of the Messages schema the store reads.
const SCHEMA: &[&str] = &[
    "CREATE TABLE handle (ROWID INTEGER PRIMARY KEY AUTOINCREMENT, uncanonicalized_id TEXT)",
    "CREATE TABLE message (ROWID INTEGER PRIMARY KEY AUTOINCREMENT, text TEXT, date INTEGER, \
     service TEXT, handle_id INTEGER DEFAULT 0)",
];

/// Store-native timestamp for a UTC wall-clock time.
///
/// Panics on an invalid date; only meant for literal test inputs.
pub fn sms_time(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> i64 {
    let time = Utc
        .with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .expect("valid fixture date");
    utc_to_store_time(time)
}

/// A writable message database used to seed test data.
pub struct StoreFixture {
    pool: SqlitePool,
    path: PathBuf,
}

impl StoreFixture {
    /// Create a database at `path` with the Messages tables.
    pub async fn create(path: &Path) -> Result<Self, sqlx::Error> {
        let pool = Self::connect(path).await?;
        for statement in SCHEMA {
            sqlx::query(*statement).execute(&pool).await?;
        }
        Ok(Self {
            pool,
            path: path.to_path_buf(),
        })
    }

    /// Create a database at `path` with no tables.
    pub async fn create_empty(path: &Path) -> Result<Self, sqlx::Error> {
        let pool = Self::connect(path).await?;
        sqlx::query("CREATE TABLE unrelated (id INTEGER)")
            .execute(&pool)
            .await?;
        Ok(Self {
            pool,
            path: path.to_path_buf(),
        })
    }

    async fn connect(path: &Path) -> Result<SqlitePool, sqlx::Error> {
        let url = format!("sqlite://{}?mode=rwc", path.display());
        let options = SqliteConnectOptions::from_str(&url)?
            .journal_mode(SqliteJournalMode::Wal)
            .create_if_missing(true);
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Insert an SMS from `sender`.
    pub async fn insert_sms(&self, sender: &str, text: &str, date: i64) -> Result<(), sqlx::Error> {
        self.insert_raw(Some(sender), Some(text), date, "SMS").await
    }

    /// Insert a message row with full control over nullable columns and service.
    pub async fn insert_raw(
        &self,
        sender: Option<&str>,
        text: Option<&str>,
        date: i64,
        service: &str,
    ) -> Result<(), sqlx::Error> {
        let handle_id = sqlx::query("INSERT INTO handle (uncanonicalized_id) VALUES (?)")
            .bind(sender)
            .execute(&self.pool)
            .await?
            .last_insert_rowid();

        sqlx::query("INSERT INTO message (text, date, service, handle_id) VALUES (?, ?, ?, ?)")
            .bind(text)
            .bind(date)
            .bind(service)
            .bind(handle_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
