//! Catalog source port
//!
//! Defines the interface for loading the product catalog from an external
//! source (the public catalog API, the offline demo catalog, test doubles).

use async_trait::async_trait;

use crate::domain::result::FetchError;
use crate::domain::Product;

/// Product catalog source
///
/// `fetch_all` is a single best-effort attempt: no retry and no caching.
/// Callers that lose interest in the result simply drop the future.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Source name (e.g., "fakestore", "demo")
    fn name(&self) -> &str;

    /// Fetch the complete product list
    async fn fetch_all(&self) -> Result<Vec<Product>, FetchError>;
}
