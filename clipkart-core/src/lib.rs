//! Clipkart Core - Business logic for the Clipkart shopping app
//!
//! This crate implements the core domain logic following hexagonal architecture:
//!
//! - **domain**: Core entities (Product, UserRecord, Location, orders, errors)
//! - **ports**: Trait definitions for external dependencies (CatalogSource, UserStore)
//! - **services**: Business logic (catalog paging, cart, session, auth, locator, checkout)
//! - **adapters**: Concrete implementations (Fake Store API, DuckDB, demo catalog)

pub mod adapters;
pub mod config;
pub mod domain;
pub mod log_migrations;
pub mod migrations;
pub mod ports;
pub mod services;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use adapters::demo::DemoCatalog;
use adapters::duckdb::DuckDbUserStore;
use adapters::fakestore::FakeStoreClient;
use config::Config;
use ports::CatalogSource;
use services::*;

// Re-export commonly used types at crate root
pub use domain::result::{AuthError, Error, FetchError, OperationResult, ValidationError};
pub use domain::{Location, OrderConfirmation, OrderDraft, PaymentMethod, Product, RegistrationForm, SessionUser};
pub use services::{EntryPoint, LogEntry, LogEvent, LoggingService};

/// File name of the user database inside the data directory
pub const USERS_DB_FILE: &str = "users.duckdb";

/// Main context for Clipkart operations
///
/// Owns the configuration, the user store and every service. The session
/// is shared between the context and the auth service.
pub struct ClipkartContext {
    pub config: Config,
    pub user_store: Arc<DuckDbUserStore>,
    pub session: Arc<Session>,
    pub auth_service: AuthService,
    pub catalog_service: CatalogService,
    pub cart: CartStore,
    pub locator: StoreLocator,
    pub checkout_service: CheckoutService,
}

impl ClipkartContext {
    /// Create a context rooted at `data_dir`
    ///
    /// Opens (and migrates) `users.duckdb`; this is the only step whose
    /// failure is fatal.
    pub fn new(data_dir: &Path) -> Result<Self> {
        let config = Config::load(data_dir)?;

        let db_path = data_dir.join(USERS_DB_FILE);
        let user_store = Arc::new(
            DuckDbUserStore::new(&db_path)
                .with_context(|| format!("Failed to open user store at {}", db_path.display()))?,
        );
        user_store.ensure_schema()?;

        let session = Arc::new(Session::new());
        let auth_service = AuthService::new(user_store.clone(), Arc::clone(&session));
        let catalog_service = CatalogService::new(config.page_size);

        Ok(Self {
            config,
            user_store,
            session,
            auth_service,
            catalog_service,
            cart: CartStore::new(),
            locator: StoreLocator::default(),
            checkout_service: CheckoutService::new(),
        })
    }

    /// The catalog source selected by configuration
    pub fn catalog_source(&self) -> std::result::Result<Arc<dyn CatalogSource>, FetchError> {
        if self.config.demo_mode {
            Ok(Arc::new(DemoCatalog::new()))
        } else {
            Ok(Arc::new(FakeStoreClient::with_url(&self.config.catalog_url)?))
        }
    }

    /// Fetch the catalog and display its first page
    pub async fn load_catalog(&mut self) -> std::result::Result<usize, FetchError> {
        let source = match self.catalog_source() {
            Ok(source) => source,
            Err(e) => {
                self.catalog_service.mark_unavailable();
                return Err(e);
            }
        };
        self.catalog_service.load(source.as_ref()).await
    }
}
