//! DuckDB user store implementation

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use duckdb::{params, Connection};

use crate::domain::result::StoreError;
use crate::domain::UserRecord;
use crate::migrations::MIGRATIONS;
use crate::ports::{StoreResult, UserStore};
use crate::services::{MigrationResult, MigrationService};

/// Maximum number of retries when database file is locked
const MAX_RETRIES: u32 = 5;

/// Initial retry delay in milliseconds (doubles each retry: 50, 100, 200, 400ms)
const INITIAL_RETRY_DELAY_MS: u64 = 50;

/// Check if an error message indicates a file locking issue that should be retried
fn is_retryable_error(err_msg: &str) -> bool {
    let lower = err_msg.to_lowercase();
    // Windows
    lower.contains("being used by another process")
        || lower.contains("cannot access the file")
        // Unix/macOS
        || lower.contains("resource temporarily unavailable")
        || lower.contains("database is locked")
        || lower.contains("file is already open")
        || lower.contains("could not set lock on file")
}

/// Check if an error message is a primary key / unique violation
fn is_duplicate_key_error(err_msg: &str) -> bool {
    let lower = err_msg.to_lowercase();
    lower.contains("duplicate key") || lower.contains("violates primary key")
}

/// DuckDB-backed user store
pub struct DuckDbUserStore {
    conn: Mutex<Connection>,
    db_path: Option<PathBuf>,
}

impl DuckDbUserStore {
    /// Open (or create) the user database at `db_path`
    ///
    /// Retries with exponential backoff when the file is locked by another
    /// process (e.g. a second `ck` invocation).
    pub fn new(db_path: &Path) -> Result<Self> {
        let mut last_error = None;

        for attempt in 0..MAX_RETRIES {
            match Self::try_open_connection(db_path) {
                Ok(conn) => {
                    return Ok(Self {
                        conn: Mutex::new(conn),
                        db_path: Some(db_path.to_path_buf()),
                    });
                }
                Err(e) => {
                    let err_msg = e.to_string();
                    if is_retryable_error(&err_msg) && attempt < MAX_RETRIES - 1 {
                        let delay =
                            Duration::from_millis(INITIAL_RETRY_DELAY_MS * 2u64.pow(attempt));
                        eprintln!(
                            "[clipkart] Database busy, retrying in {}ms (attempt {}/{}): {}",
                            delay.as_millis(),
                            attempt + 1,
                            MAX_RETRIES,
                            err_msg
                        );
                        thread::sleep(delay);
                        last_error = Some(e);
                        continue;
                    }
                    return Err(e);
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| anyhow!("Failed to open database after {} retries", MAX_RETRIES)))
    }

    /// Open a private in-memory database
    pub fn in_memory() -> Result<Self> {
        let config = duckdb::Config::default().enable_autoload_extension(false)?;
        let conn = Connection::open_in_memory_with_flags(config)?;
        Ok(Self {
            conn: Mutex::new(conn),
            db_path: None,
        })
    }

    fn try_open_connection(db_path: &Path) -> Result<Connection> {
        // Extension autoloading off: nothing here needs extensions
        let config = duckdb::Config::default().enable_autoload_extension(false)?;
        Ok(Connection::open_with_flags(db_path, config)?)
    }

    /// Path of the database file (None when in memory)
    pub fn db_path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    /// Run pending migrations
    pub fn run_migrations(&self) -> Result<MigrationResult> {
        let conn = self.conn.lock().map_err(|e| anyhow!("Lock poisoned: {}", e))?;
        MigrationService::new(&conn, MIGRATIONS).run_pending()
    }

    /// Ensure database schema exists (runs pending migrations)
    pub fn ensure_schema(&self) -> Result<()> {
        self.run_migrations()?;
        Ok(())
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| StoreError::database(format!("Lock poisoned: {}", e)))
    }

    fn row_to_user(row: &duckdb::Row) -> duckdb::Result<UserRecord> {
        let created_str: String = row.get(3)?;
        let updated_str: String = row.get(4)?;
        Ok(UserRecord {
            email: row.get(0)?,
            password_hash: row.get(1)?,
            full_name: row.get(2)?,
            created_at: parse_timestamp(&created_str),
            updated_at: parse_timestamp(&updated_str),
        })
    }
}

impl UserStore for DuckDbUserStore {
    fn find_by_email(&self, email: &str) -> StoreResult<Option<UserRecord>> {
        let conn = self.lock()?;
        let result = conn.query_row(
            "SELECT email, password_hash, full_name, created_at, updated_at
             FROM users WHERE email = ?",
            [email],
            Self::row_to_user,
        );

        match result {
            Ok(user) => Ok(Some(user)),
            Err(duckdb::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(StoreError::database(e.to_string())),
        }
    }

    fn insert(&self, record: &UserRecord) -> StoreResult<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO users (email, password_hash, full_name, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?)",
            params![
                record.email,
                record.password_hash,
                record.full_name,
                record.created_at.to_rfc3339(),
                record.updated_at.to_rfc3339(),
            ],
        )
        .map_err(|e| {
            let msg = e.to_string();
            if is_duplicate_key_error(&msg) {
                StoreError::Duplicate(record.email.clone())
            } else {
                StoreError::database(msg)
            }
        })?;
        Ok(())
    }

    fn update_password(&self, email: &str, password_hash: &str) -> StoreResult<bool> {
        let conn = self.lock()?;
        let updated = conn
            .execute(
                "UPDATE users SET password_hash = ?, updated_at = ? WHERE email = ?",
                params![password_hash, Utc::now().to_rfc3339(), email],
            )
            .map_err(|e| StoreError::database(e.to_string()))?;
        Ok(updated > 0)
    }

    fn count(&self) -> StoreResult<usize> {
        let conn = self.lock()?;
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
            .map_err(|e| StoreError::database(e.to_string()))?;
        Ok(count.max(0) as usize)
    }
}

fn parse_timestamp(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> DuckDbUserStore {
        let store = DuckDbUserStore::in_memory().unwrap();
        store.ensure_schema().unwrap();
        store
    }

    #[test]
    fn test_insert_and_find() {
        let store = store();
        let record = UserRecord::new("asha@example.com", "hash-1", "Asha Rao");
        store.insert(&record).unwrap();

        let found = store.find_by_email("asha@example.com").unwrap().unwrap();
        assert_eq!(found.full_name, "Asha Rao");
        assert_eq!(found.password_hash, "hash-1");
        assert_eq!(found.created_at.timestamp(), record.created_at.timestamp());
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_email_lookup_is_exact() {
        let store = store();
        store
            .insert(&UserRecord::new("asha@example.com", "hash-1", "Asha Rao"))
            .unwrap();

        assert!(store.find_by_email("Asha@example.com").unwrap().is_none());
        assert!(store.find_by_email("asha@example.com ").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_email_rejected_by_constraint() {
        let store = store();
        store
            .insert(&UserRecord::new("asha@example.com", "hash-1", "Asha Rao"))
            .unwrap();

        let err = store
            .insert(&UserRecord::new("asha@example.com", "hash-2", "Someone Else"))
            .unwrap_err();
        assert_eq!(err, StoreError::Duplicate("asha@example.com".to_string()));
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_update_password() {
        let store = store();
        store
            .insert(&UserRecord::new("asha@example.com", "hash-1", "Asha Rao"))
            .unwrap();

        assert!(store.update_password("asha@example.com", "hash-2").unwrap());
        assert!(!store.update_password("nobody@example.com", "hash-3").unwrap());

        let found = store.find_by_email("asha@example.com").unwrap().unwrap();
        assert_eq!(found.password_hash, "hash-2");
        assert_eq!(found.full_name, "Asha Rao");
    }

    #[test]
    fn test_retryable_error_detection() {
        assert!(is_retryable_error("IO Error: Could not set lock on file"));
        assert!(is_retryable_error("The process cannot access the file"));
        assert!(!is_retryable_error("Catalog Error: Table does not exist"));
    }

    #[test]
    fn test_duplicate_key_detection() {
        assert!(is_duplicate_key_error(
            "Constraint Error: Duplicate key \"email: a@b.c\" violates primary key constraint"
        ));
        assert!(!is_duplicate_key_error("Binder Error: column not found"));
    }
}
