//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external dependencies. Services depend
//! only on these traits, not on concrete implementations.

mod catalog;
mod user_store;

pub use catalog::CatalogSource;
pub use user_store::{StoreResult, UserStore};
