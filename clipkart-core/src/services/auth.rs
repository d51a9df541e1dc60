//! Auth service - registration, login and password reset
//!
//! Passwords are stored as Argon2id PHC strings. Emails and passwords are
//! compared exactly, with no trimming or case folding.

use std::sync::Arc;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};

use crate::domain::result::{AuthError, Error, Result, StoreError, ValidationError};
use crate::domain::{RegistrationForm, SessionUser, UserRecord};
use crate::ports::UserStore;
use crate::services::Session;

/// Default Argon2id cost parameters for stored passwords
const DEFAULT_TIME_COST: u32 = 2;
const DEFAULT_MEMORY_COST: u32 = 19456; // 19 MiB
const DEFAULT_PARALLELISM: u32 = 1;

/// Argon2id cost parameters used when hashing new passwords
///
/// Verification always uses the parameters recorded in the stored hash,
/// so changing these never locks out existing users.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashParams {
    pub time_cost: u32,
    pub memory_cost: u32,
    pub parallelism: u32,
}

impl Default for HashParams {
    fn default() -> Self {
        Self {
            time_cost: DEFAULT_TIME_COST,
            memory_cost: DEFAULT_MEMORY_COST,
            parallelism: DEFAULT_PARALLELISM,
        }
    }
}

/// Hash a password into a PHC string with a fresh random salt
pub fn hash_password(password: &str, params: &HashParams) -> Result<String> {
    let argon2_params = Params::new(
        params.memory_cost,
        params.time_cost,
        params.parallelism,
        None,
    )
    .map_err(|e| Error::Other(format!("Invalid argon2 params: {}", e)))?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, argon2_params);

    let salt = SaltString::generate(&mut OsRng);
    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| Error::Other(format!("Failed to hash password: {}", e)))
}

/// Check a password against a stored PHC string
///
/// A malformed stored hash never verifies.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

pub struct AuthService {
    store: Arc<dyn UserStore>,
    session: Arc<Session>,
    params: HashParams,
}

impl AuthService {
    pub fn new(store: Arc<dyn UserStore>, session: Arc<Session>) -> Self {
        Self::with_params(store, session, HashParams::default())
    }

    pub fn with_params(store: Arc<dyn UserStore>, session: Arc<Session>, params: HashParams) -> Self {
        Self {
            store,
            session,
            params,
        }
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Sign in with email and password
    ///
    /// Empty fields are rejected without touching the store. Otherwise the
    /// store is consulted once; an unknown email and a wrong password are
    /// indistinguishable (`Unknown user!`). The session only changes on
    /// success.
    pub fn login(&self, email: &str, password: &str) -> Result<SessionUser> {
        if email.is_empty() || password.is_empty() {
            return Err(ValidationError::MissingCredentials.into());
        }

        let record = self.store.find_by_email(email).map_err(AuthError::from)?;
        match record {
            Some(record) if verify_password(password, &record.password_hash) => {
                let user = SessionUser::from(&record);
                self.session.sign_in(user.clone());
                Ok(user)
            }
            _ => Err(AuthError::UnknownUser.into()),
        }
    }

    /// Create an account
    ///
    /// Does not sign the new user in.
    pub fn register(&self, form: &RegistrationForm) -> Result<SessionUser> {
        if form.email.is_empty() || form.password.is_empty() || form.full_name.is_empty() {
            return Err(ValidationError::MissingFields.into());
        }
        if form.password != form.confirm_password {
            return Err(ValidationError::PasswordMismatch.into());
        }
        if self
            .store
            .find_by_email(&form.email)
            .map_err(AuthError::from)?
            .is_some()
        {
            return Err(ValidationError::DuplicateEmail.into());
        }

        let password_hash = hash_password(&form.password, &self.params)?;
        let record = UserRecord::new(&form.email, password_hash, &form.full_name);

        match self.store.insert(&record) {
            Ok(()) => Ok(SessionUser::from(&record)),
            // Lost a race with a concurrent registration
            Err(StoreError::Duplicate(_)) => Err(ValidationError::DuplicateEmail.into()),
            Err(e) => Err(AuthError::from(e).into()),
        }
    }

    /// Overwrite the password of an existing account
    pub fn reset_password(&self, email: &str, new_password: &str) -> Result<()> {
        if email.is_empty() || new_password.is_empty() {
            return Err(ValidationError::MissingCredentials.into());
        }

        let password_hash = hash_password(new_password, &self.params)?;
        let updated = self
            .store
            .update_password(email, &password_hash)
            .map_err(AuthError::from)?;

        if updated {
            Ok(())
        } else {
            Err(AuthError::UnknownUser.into())
        }
    }

    pub fn logout(&self) {
        self.session.clear();
    }

    /// Sign out of the account
    ///
    /// The stored record is kept; only the session is cleared.
    pub fn delete_account(&self) {
        self.session.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryUserStore;
    use crate::services::SessionState;

    /// Cheap parameters so tests don't spend seconds hashing
    const TEST_PARAMS: HashParams = HashParams {
        time_cost: 1,
        memory_cost: 1024,
        parallelism: 1,
    };

    fn setup() -> (Arc<InMemoryUserStore>, Arc<Session>, AuthService) {
        let store = Arc::new(InMemoryUserStore::new());
        let session = Arc::new(Session::new());
        let auth = AuthService::with_params(store.clone(), session.clone(), TEST_PARAMS);
        (store, session, auth)
    }

    fn register_asha(auth: &AuthService) {
        auth.register(&RegistrationForm::new(
            "asha@example.com",
            "s3cret",
            "Asha Rao",
            "s3cret",
        ))
        .unwrap();
    }

    #[test]
    fn test_hash_roundtrip() {
        let hash = hash_password("s3cret", &TEST_PARAMS).unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(!hash.contains("s3cret"));
        assert!(verify_password("s3cret", &hash));
        assert!(!verify_password("S3cret", &hash));
        assert!(!verify_password("s3cret", "s3cret"));
    }

    #[test]
    fn test_register_then_login() {
        let (store, session, auth) = setup();
        register_asha(&auth);

        // Registration alone does not sign in
        assert_eq!(session.state(), SessionState::LoggedOut);
        assert_ne!(store.records()[0].password_hash, "s3cret");

        let user = auth.login("asha@example.com", "s3cret").unwrap();
        assert_eq!(user.full_name, "Asha Rao");
        assert_eq!(session.current_user(), Some(user));
    }

    #[test]
    fn test_login_with_empty_field_skips_store() {
        let (store, session, auth) = setup();

        for (email, password) in [("", "pw"), ("a@x.com", ""), ("", "")] {
            let err = auth.login(email, password).unwrap_err();
            assert!(matches!(
                err,
                Error::Validation(ValidationError::MissingCredentials)
            ));
        }
        assert_eq!(store.lookup_count(), 0);
        assert!(!session.is_logged_in());
    }

    #[test]
    fn test_login_failures_are_unknown_user() {
        let (store, session, auth) = setup();
        register_asha(&auth);
        let lookups_before = store.lookup_count();

        let err = auth.login("asha@example.com", "wrong").unwrap_err();
        assert!(matches!(err, Error::Auth(AuthError::UnknownUser)));
        assert_eq!(store.lookup_count(), lookups_before + 1);

        let err = auth.login("ASHA@example.com", "s3cret").unwrap_err();
        assert_eq!(err.to_string(), "Unknown user!");
        assert!(!session.is_logged_in());
    }

    #[test]
    fn test_failed_login_keeps_existing_session() {
        let (_, session, auth) = setup();
        register_asha(&auth);
        let user = auth.login("asha@example.com", "s3cret").unwrap();

        assert!(auth.login("asha@example.com", "nope").is_err());
        assert_eq!(session.current_user(), Some(user));
    }

    #[test]
    fn test_register_validation_order() {
        let (store, _, auth) = setup();
        register_asha(&auth);

        let err = auth
            .register(&RegistrationForm::new("asha@example.com", "", "Asha", "x"))
            .unwrap_err();
        assert!(matches!(err, Error::Validation(ValidationError::MissingFields)));

        let err = auth
            .register(&RegistrationForm::new("asha@example.com", "a", "Asha", "b"))
            .unwrap_err();
        assert!(matches!(err, Error::Validation(ValidationError::PasswordMismatch)));

        let err = auth
            .register(&RegistrationForm::new("asha@example.com", "a", "Asha", "a"))
            .unwrap_err();
        assert!(matches!(err, Error::Validation(ValidationError::DuplicateEmail)));

        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_store_outage_is_reported() {
        let (store, session, auth) = setup();
        store.set_failing(true);

        let err = auth.login("asha@example.com", "s3cret").unwrap_err();
        assert!(matches!(err, Error::Auth(AuthError::StoreUnavailable(_))));
        assert!(!session.is_logged_in());
    }

    #[test]
    fn test_reset_password() {
        let (store, _, auth) = setup();
        register_asha(&auth);
        auth.register(&RegistrationForm::new("ravi@example.com", "pw", "Ravi", "pw"))
            .unwrap();
        let ravi_before = store.records()[1].clone();

        auth.reset_password("asha@example.com", "n3w").unwrap();
        assert!(auth.login("asha@example.com", "s3cret").is_err());
        assert!(auth.login("asha@example.com", "n3w").is_ok());

        // Other records untouched
        assert_eq!(store.records()[1], ravi_before);
        assert_eq!(store.records()[0].full_name, "Asha Rao");
    }

    #[test]
    fn test_reset_password_errors() {
        let (store, _, auth) = setup();

        let err = auth.reset_password("", "x").unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::MissingCredentials)
        ));

        let err = auth.reset_password("nobody@example.com", "x").unwrap_err();
        assert!(matches!(err, Error::Auth(AuthError::UnknownUser)));
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_logout_and_delete_account_only_clear_session() {
        let (store, session, auth) = setup();
        register_asha(&auth);

        auth.login("asha@example.com", "s3cret").unwrap();
        auth.logout();
        assert_eq!(session.state(), SessionState::LoggedOut);

        auth.login("asha@example.com", "s3cret").unwrap();
        auth.delete_account();
        assert!(!session.is_logged_in());
        assert_eq!(store.count().unwrap(), 1);
    }
}
