//! User domain models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered user as persisted by the user store
///
/// `email` is the unique key and is compared exactly (case-sensitive).
/// `password_hash` is an Argon2id PHC string, never the raw password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRecord {
    pub fn new(
        email: impl Into<String>,
        password_hash: impl Into<String>,
        full_name: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            email: email.into(),
            password_hash: password_hash.into(),
            full_name: full_name.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// The profile fields of the signed-in user, held for the process lifetime
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub email: String,
    pub full_name: String,
}

impl From<&UserRecord> for SessionUser {
    fn from(record: &UserRecord) -> Self {
        Self {
            email: record.email.clone(),
            full_name: record.full_name.clone(),
        }
    }
}

impl SessionUser {
    /// Name for greetings ("Hi Buddy!" when unknown)
    pub fn display_name(&self) -> &str {
        if self.full_name.is_empty() {
            "Buddy"
        } else {
            &self.full_name
        }
    }
}

/// Input of the create-account form
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub confirm_password: String,
}

impl RegistrationForm {
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        full_name: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            full_name: full_name.into(),
            confirm_password: confirm_password.into(),
        }
    }
}
