//! In-memory user store
//!
//! Non-durable [`UserStore`] for tests and throwaway sessions. Counts
//! lookups so callers can assert how often the store was consulted, and
//! can be switched into a failing mode to exercise store-outage paths.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use chrono::Utc;

use crate::domain::result::StoreError;
use crate::domain::UserRecord;
use crate::ports::{StoreResult, UserStore};

#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    records: Mutex<Vec<UserRecord>>,
    lookups: AtomicUsize,
    failing: AtomicBool,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `find_by_email` calls so far
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    /// Make every subsequent call fail with a database error
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Snapshot of all stored records, in insertion order
    pub fn records(&self) -> Vec<UserRecord> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }

    fn guard(&self) -> StoreResult<std::sync::MutexGuard<'_, Vec<UserRecord>>> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::database("store offline"));
        }
        self.records
            .lock()
            .map_err(|e| StoreError::database(format!("Lock poisoned: {}", e)))
    }
}

impl UserStore for InMemoryUserStore {
    fn find_by_email(&self, email: &str) -> StoreResult<Option<UserRecord>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        let records = self.guard()?;
        Ok(records.iter().find(|r| r.email == email).cloned())
    }

    fn insert(&self, record: &UserRecord) -> StoreResult<()> {
        let mut records = self.guard()?;
        if records.iter().any(|r| r.email == record.email) {
            return Err(StoreError::Duplicate(record.email.clone()));
        }
        records.push(record.clone());
        Ok(())
    }

    fn update_password(&self, email: &str, password_hash: &str) -> StoreResult<bool> {
        let mut records = self.guard()?;
        match records.iter_mut().find(|r| r.email == email) {
            Some(record) => {
                record.password_hash = password_hash.to_string();
                record.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn count(&self) -> StoreResult<usize> {
        Ok(self.guard()?.len())
    }
}
