//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and port interactions. Each service
//! focuses on one screen or feature area of the app.

pub mod auth;
mod cart;
pub mod catalog;
mod checkout;
mod locator;
pub mod logging;
pub mod migration;
mod session;

pub use auth::{AuthService, HashParams};
pub use cart::CartStore;
pub use catalog::{CatalogService, CatalogState, DEFAULT_PAGE_SIZE};
pub use checkout::CheckoutService;
pub use locator::StoreLocator;
pub use logging::{EntryPoint, LogEntry, LogEvent, LoggingService};
pub use migration::{MigrationResult, MigrationService};
pub use session::{Session, SessionState};
