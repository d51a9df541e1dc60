//! User store port - durable user records keyed by email

use crate::domain::result::StoreError;
use crate::domain::UserRecord;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Durable store of registered users
///
/// Lookups are exact, case-sensitive matches on email. Implementations must
/// enforce email uniqueness themselves and report a violating insert as
/// [`StoreError::Duplicate`].
pub trait UserStore: Send + Sync {
    /// Find the record with exactly this email
    fn find_by_email(&self, email: &str) -> StoreResult<Option<UserRecord>>;

    /// Insert a new record
    fn insert(&self, record: &UserRecord) -> StoreResult<()>;

    /// Overwrite the password hash of the record with this email
    ///
    /// Returns `false` when no record matched.
    fn update_password(&self, email: &str, password_hash: &str) -> StoreResult<bool>;

    /// Number of stored records
    fn count(&self) -> StoreResult<usize>;
}
