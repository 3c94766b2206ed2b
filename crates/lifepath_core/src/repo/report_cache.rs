//! Cache of generated portraits keyed by user, birth date and mode.
//!
//! # Invariants
//! - At most one row per `(user_id, date_str, mode)`; the first write wins.
//! - Dates are stored in canonical `DD.MM.YYYY` form.

use super::{RepoError, RepoResult};
use crate::dates::CanonicalDate;
use crate::db::migrations::{latest_version, schema_version};
use crate::db::DbError;
use crate::report::ReportMode;
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};

/// Cache lookup key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReportKey {
    pub user_id: i64,
    pub date: CanonicalDate,
    pub mode: ReportMode,
}

impl ReportKey {
    pub fn new(user_id: i64, date: CanonicalDate, mode: ReportMode) -> Self {
        Self {
            user_id,
            date,
            mode,
        }
    }
}

/// One stored portrait.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedReport {
    pub key: ReportKey,
    pub text: String,
    /// Insert time in epoch milliseconds.
    pub created_at: i64,
}

pub trait ReportCacheRepository {
    fn get_report(&self, key: &ReportKey) -> RepoResult<Option<String>>;
    /// Stores `text` unless the key already exists; returns whether a row
    /// was inserted.
    fn save_report(&self, key: &ReportKey, text: &str) -> RepoResult<bool>;
    /// All portraits of one user, oldest first.
    fn list_reports(&self, user_id: i64) -> RepoResult<Vec<CachedReport>>;
}

/// SQLite-backed report cache.
pub struct SqliteReportCache<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteReportCache<'conn> {
    /// Wraps a connection opened through `db::open_db*`.
    ///
    /// # Errors
    /// - `Db(UnsupportedSchemaVersion)` when the schema is not current.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let version = schema_version(conn)?;
        if version != latest_version() {
            return Err(RepoError::Db(DbError::UnsupportedSchemaVersion {
                db_version: version,
                latest_supported: latest_version(),
            }));
        }
        Ok(Self { conn })
    }
}

impl ReportCacheRepository for SqliteReportCache<'_> {
    fn get_report(&self, key: &ReportKey) -> RepoResult<Option<String>> {
        let text = self
            .conn
            .query_row(
                "SELECT report_text
                 FROM reports
                 WHERE user_id = ?1 AND date_str = ?2 AND mode = ?3;",
                params![key.user_id, key.date.to_string(), key.mode.as_str()],
                |row| row.get::<_, String>(0),
            )
            .optional()?;

        debug!(
            "event=cache_get module=repo status=ok mode={} hit={}",
            key.mode,
            text.is_some()
        );
        Ok(text)
    }

    fn save_report(&self, key: &ReportKey, text: &str) -> RepoResult<bool> {
        let inserted = self.conn.execute(
            "INSERT INTO reports (user_id, date_str, mode, report_text, created_at)
             VALUES (?1, ?2, ?3, ?4, (strftime('%s', 'now') * 1000))
             ON CONFLICT(user_id, date_str, mode) DO NOTHING;",
            params![key.user_id, key.date.to_string(), key.mode.as_str(), text],
        )?;

        debug!(
            "event=cache_save module=repo status=ok mode={} inserted={}",
            key.mode,
            inserted > 0
        );
        Ok(inserted > 0)
    }

    fn list_reports(&self, user_id: i64) -> RepoResult<Vec<CachedReport>> {
        let mut stmt = self.conn.prepare(
            "SELECT date_str, mode, report_text, created_at
             FROM reports
             WHERE user_id = ?1
             ORDER BY created_at ASC, id ASC;",
        )?;
        let mut rows = stmt.query([user_id])?;

        let mut reports = Vec::new();
        while let Some(row) = rows.next()? {
            let date_str: String = row.get("date_str")?;
            let mode_str: String = row.get("mode")?;
            let date = date_str
                .parse::<CanonicalDate>()
                .map_err(|err| RepoError::InvalidData(format!("date `{date_str}`: {err}")))?;
            let mode = mode_str
                .parse::<ReportMode>()
                .map_err(|err| RepoError::InvalidData(err.to_string()))?;
            reports.push(CachedReport {
                key: ReportKey::new(user_id, date, mode),
                text: row.get("report_text")?,
                created_at: row.get("created_at")?,
            });
        }
        Ok(reports)
    }
}
