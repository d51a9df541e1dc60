//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - Fake Store HTTP client for CatalogSource
//! - Offline demo catalog for CatalogSource
//! - DuckDB for UserStore
//! - In-memory UserStore for tests

pub mod demo;
pub mod duckdb;
pub mod fakestore;
pub mod memory;

#[cfg(test)]
pub mod fakestore_mock;
