//! Integration tests for clipkart-core services
//!
//! Auth flows run against a real DuckDB user store in a temp directory.
//! The catalog comes from the offline demo source, so no network is needed.
//!
//! Run with: cargo test --test integration_tests -- --nocapture

use std::sync::Arc;
use tempfile::TempDir;

use rust_decimal::Decimal;

use clipkart_core::adapters::demo::{generate_demo_products, DemoCatalog};
use clipkart_core::adapters::duckdb::DuckDbUserStore;
use clipkart_core::domain::result::{AuthError, Error, ValidationError};
use clipkart_core::domain::{PaymentMethod, RegistrationForm};
use clipkart_core::ports::UserStore;
use clipkart_core::services::{
    AuthService, CartStore, CatalogService, CatalogState, CheckoutService, HashParams, Session,
    SessionState,
};

// ============================================================================
// Test Helpers
// ============================================================================

/// Cheap hashing so the suite stays fast
const TEST_PARAMS: HashParams = HashParams {
    time_cost: 1,
    memory_cost: 1024,
    parallelism: 1,
};

fn create_test_store(temp_dir: &TempDir) -> Arc<DuckDbUserStore> {
    let db_path = temp_dir.path().join("users.duckdb");
    let store = DuckDbUserStore::new(&db_path).expect("Failed to open user store");
    store.ensure_schema().expect("Failed to initialize schema");
    Arc::new(store)
}

fn create_auth(store: &Arc<DuckDbUserStore>) -> (AuthService, Arc<Session>) {
    let session = Arc::new(Session::new());
    let auth = AuthService::with_params(store.clone(), Arc::clone(&session), TEST_PARAMS);
    (auth, session)
}

fn form(email: &str, password: &str, name: &str) -> RegistrationForm {
    RegistrationForm::new(email, password, name, password)
}

// ============================================================================
// Authentication
// ============================================================================

#[test]
fn test_register_login_logout_flow() {
    let temp_dir = TempDir::new().unwrap();
    let store = create_test_store(&temp_dir);
    let (auth, session) = create_auth(&store);

    auth.register(&form("asha@example.com", "s3cret", "Asha Rao"))
        .unwrap();
    assert_eq!(session.state(), SessionState::LoggedOut);

    let user = auth.login("asha@example.com", "s3cret").unwrap();
    assert_eq!(user.email, "asha@example.com");
    assert_eq!(user.full_name, "Asha Rao");
    assert!(session.is_logged_in());

    auth.logout();
    assert_eq!(session.state(), SessionState::LoggedOut);
}

#[test]
fn test_password_is_not_stored_in_plaintext() {
    let temp_dir = TempDir::new().unwrap();
    let store = create_test_store(&temp_dir);
    let (auth, _) = create_auth(&store);

    auth.register(&form("asha@example.com", "s3cret", "Asha Rao"))
        .unwrap();

    let record = store.find_by_email("asha@example.com").unwrap().unwrap();
    assert_ne!(record.password_hash, "s3cret");
    assert!(record.password_hash.starts_with("$argon2id$"));
}

#[test]
fn test_duplicate_email_keeps_single_record() {
    let temp_dir = TempDir::new().unwrap();
    let store = create_test_store(&temp_dir);
    let (auth, _) = create_auth(&store);

    auth.register(&form("asha@example.com", "s3cret", "Asha Rao"))
        .unwrap();
    let err = auth
        .register(&form("asha@example.com", "other", "Impostor"))
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Validation(ValidationError::DuplicateEmail)
    ));
    assert_eq!(store.count().unwrap(), 1);

    // The original account still works with the original password
    assert!(auth.login("asha@example.com", "s3cret").is_ok());
    assert!(auth.login("asha@example.com", "other").is_err());
}

#[test]
fn test_unknown_user_and_wrong_password_look_the_same() {
    let temp_dir = TempDir::new().unwrap();
    let store = create_test_store(&temp_dir);
    let (auth, session) = create_auth(&store);

    auth.register(&form("asha@example.com", "s3cret", "Asha Rao"))
        .unwrap();

    let wrong_password = auth.login("asha@example.com", "nope").unwrap_err();
    let unknown = auth.login("nobody@example.com", "s3cret").unwrap_err();

    assert_eq!(wrong_password.to_string(), unknown.to_string());
    assert!(matches!(unknown, Error::Auth(AuthError::UnknownUser)));
    assert!(!session.is_logged_in());
}

#[test]
fn test_reset_password_changes_only_target_record() {
    let temp_dir = TempDir::new().unwrap();
    let store = create_test_store(&temp_dir);
    let (auth, _) = create_auth(&store);

    auth.register(&form("asha@example.com", "s3cret", "Asha Rao"))
        .unwrap();
    auth.register(&form("ravi@example.com", "hunter2", "Ravi Kumar"))
        .unwrap();
    let ravi_before = store.find_by_email("ravi@example.com").unwrap().unwrap();
    let asha_before = store.find_by_email("asha@example.com").unwrap().unwrap();

    auth.reset_password("asha@example.com", "n3w-pass").unwrap();

    let asha_after = store.find_by_email("asha@example.com").unwrap().unwrap();
    assert_ne!(asha_after.password_hash, asha_before.password_hash);
    assert_eq!(asha_after.full_name, asha_before.full_name);
    assert_eq!(
        asha_after.created_at.timestamp(),
        asha_before.created_at.timestamp()
    );

    let ravi_after = store.find_by_email("ravi@example.com").unwrap().unwrap();
    assert_eq!(ravi_after.password_hash, ravi_before.password_hash);

    assert!(auth.login("asha@example.com", "n3w-pass").is_ok());
    assert!(auth.login("ravi@example.com", "hunter2").is_ok());
}

#[test]
fn test_reset_password_for_unknown_email() {
    let temp_dir = TempDir::new().unwrap();
    let store = create_test_store(&temp_dir);
    let (auth, _) = create_auth(&store);

    let err = auth
        .reset_password("nobody@example.com", "whatever")
        .unwrap_err();
    assert!(matches!(err, Error::Auth(AuthError::UnknownUser)));
    assert_eq!(store.count().unwrap(), 0);
}

#[test]
fn test_accounts_survive_reopen() {
    let temp_dir = TempDir::new().unwrap();
    {
        let store = create_test_store(&temp_dir);
        let (auth, _) = create_auth(&store);
        auth.register(&form("asha@example.com", "s3cret", "Asha Rao"))
            .unwrap();
    }

    let store = create_test_store(&temp_dir);
    let (auth, _) = create_auth(&store);
    assert!(auth.login("asha@example.com", "s3cret").is_ok());
}

#[test]
fn test_delete_account_keeps_record() {
    let temp_dir = TempDir::new().unwrap();
    let store = create_test_store(&temp_dir);
    let (auth, session) = create_auth(&store);

    auth.register(&form("asha@example.com", "s3cret", "Asha Rao"))
        .unwrap();
    auth.login("asha@example.com", "s3cret").unwrap();
    auth.delete_account();

    assert!(!session.is_logged_in());
    assert!(store.find_by_email("asha@example.com").unwrap().is_some());
}

// ============================================================================
// Catalog, cart and checkout
// ============================================================================

#[tokio::test]
async fn test_demo_catalog_pages_in_sixes() {
    let mut catalog = CatalogService::new(6);
    let first = catalog.load(&DemoCatalog::new()).await.unwrap();

    assert_eq!(catalog.state(), CatalogState::Ready);
    let mut pages = vec![first];
    loop {
        let appended = catalog.load_next_page();
        if appended == 0 {
            break;
        }
        pages.push(appended);
    }

    assert_eq!(pages, vec![6, 6, 2]);
    assert_eq!(catalog.displayed(), generate_demo_products().as_slice());
}

#[tokio::test]
async fn test_shopping_flow_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    let store = create_test_store(&temp_dir);
    let (auth, session) = create_auth(&store);

    auth.register(&form("asha@example.com", "s3cret", "Asha Rao"))
        .unwrap();
    auth.login("asha@example.com", "s3cret").unwrap();

    let mut catalog = CatalogService::new(6);
    catalog.load(&DemoCatalog::new()).await.unwrap();

    let cart = CartStore::new();
    let mut updates = cart.subscribe();
    let first = catalog.displayed()[0].clone();
    let second = catalog.displayed()[1].clone();
    cart.add(&first);
    cart.add(&second);
    cart.add(&first);
    assert_eq!(updates.borrow_and_update().len(), 2);

    let checkout = CheckoutService::new();
    let mut draft = checkout.draft(&cart);
    draft.set_quantity(second.id, 3).unwrap();
    draft.set_payment_method(PaymentMethod::PayPal);

    let order = checkout.confirm(draft, &session).unwrap();
    assert_eq!(order.total, first.price + second.price * Decimal::from(3));
    assert_eq!(
        order.customer.map(|c| c.email),
        Some("asha@example.com".to_string())
    );
    assert_eq!(cart.len(), 2);
}
