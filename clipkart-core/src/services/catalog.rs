//! Catalog service - loads the product list and pages it into view
//!
//! The full list is fetched once; the displayed sequence grows one page at
//! a time as the front-end scrolls to its last item.

use serde::Serialize;

use crate::domain::result::FetchError;
use crate::domain::Product;
use crate::ports::CatalogSource;

/// Default number of products per page
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// Lifecycle of the catalog load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogState {
    Loading,
    Ready,
    /// The fetch failed; the front-end shows its offline notice
    Unavailable,
}

/// Pagination controller over an immutable product list
#[derive(Debug)]
pub struct CatalogService {
    products: Vec<Product>,
    displayed: Vec<Product>,
    page_size: usize,
    current_page: usize,
    /// In-flight guard of the scroll-triggered page load. `load_next_page`
    /// takes `&mut self`, so outside that call it is always false.
    busy: bool,
    state: CatalogState,
}

impl Default for CatalogService {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl CatalogService {
    /// Create an empty catalog; a page size of 0 is treated as 1
    pub fn new(page_size: usize) -> Self {
        Self {
            products: Vec::new(),
            displayed: Vec::new(),
            page_size: page_size.max(1),
            current_page: 0,
            busy: false,
            state: CatalogState::Loading,
        }
    }

    /// Fetch the full list once and display the first page
    ///
    /// On failure the list stays empty and the state becomes `Unavailable`.
    pub async fn load(&mut self, source: &dyn CatalogSource) -> Result<usize, FetchError> {
        self.state = CatalogState::Loading;
        match source.fetch_all().await {
            Ok(products) => {
                self.set_products(products);
                Ok(self.load_next_page())
            }
            Err(e) => {
                self.mark_unavailable();
                Err(e)
            }
        }
    }

    /// Drop any loaded products and flag the catalog as offline
    pub fn mark_unavailable(&mut self) {
        self.set_products(Vec::new());
        self.state = CatalogState::Unavailable;
    }

    /// Replace the full list and reset the cursor
    ///
    /// The displayed sequence is emptied; call `load_next_page` to show
    /// the first page.
    pub fn set_products(&mut self, products: Vec<Product>) {
        self.products = products;
        self.displayed.clear();
        self.current_page = 0;
        self.busy = false;
        self.state = CatalogState::Ready;
    }

    /// Append the next page to the displayed sequence
    ///
    /// Returns the number of products appended (0 once exhausted).
    pub fn load_next_page(&mut self) -> usize {
        if self.busy {
            return 0;
        }
        let start = self.current_page * self.page_size;
        if start >= self.products.len() {
            return 0;
        }

        self.busy = true;
        let end = (start + self.page_size).min(self.products.len());
        self.displayed.extend_from_slice(&self.products[start..end]);
        self.current_page += 1;
        self.busy = false;

        end - start
    }

    /// Whether displaying `index` should trigger the next page
    pub fn should_load_more(&self, index: usize) -> bool {
        !self.displayed.is_empty() && index == self.displayed.len() - 1
    }

    pub fn has_more(&self) -> bool {
        self.current_page * self.page_size < self.products.len()
    }

    pub fn displayed(&self) -> &[Product] {
        &self.displayed
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn state(&self) -> CatalogState {
        self.state
    }

    /// Look up a loaded product by id
    pub fn find(&self, id: u32) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::demo::DemoCatalog;
    use async_trait::async_trait;
    use rust_decimal::Decimal;

    fn products(n: u32) -> Vec<Product> {
        (1..=n)
            .map(|id| Product::new(id, format!("Item {}", id), Decimal::new(1000, 2)))
            .collect()
    }

    struct OfflineCatalog;

    #[async_trait]
    impl CatalogSource for OfflineCatalog {
        fn name(&self) -> &str {
            "offline"
        }

        async fn fetch_all(&self) -> Result<Vec<Product>, FetchError> {
            Err(FetchError::Unreachable("connection refused".to_string()))
        }
    }

    #[test]
    fn test_pages_of_six_over_fourteen() {
        let mut catalog = CatalogService::new(6);
        catalog.set_products(products(14));

        assert_eq!(catalog.load_next_page(), 6);
        assert_eq!(catalog.load_next_page(), 6);
        assert_eq!(catalog.load_next_page(), 2);
        assert!(!catalog.has_more());
        assert_eq!(catalog.load_next_page(), 0);

        let ids: Vec<u32> = catalog.displayed().iter().map(|p| p.id).collect();
        assert_eq!(ids, (1..=14).collect::<Vec<_>>());
        assert_eq!(catalog.current_page(), 3);
    }

    #[test]
    fn test_paging_covers_any_list_in_order() {
        for n in 0..=25u32 {
            for page_size in 1..=8usize {
                let mut catalog = CatalogService::new(page_size);
                catalog.set_products(products(n));

                let pages = (n as usize).div_ceil(page_size);
                for page in 0..pages {
                    let expected = page_size.min(n as usize - page * page_size);
                    assert_eq!(catalog.load_next_page(), expected, "n={} p={}", n, page_size);
                }

                let ids: Vec<u32> = catalog.displayed().iter().map(|p| p.id).collect();
                assert_eq!(ids, (1..=n).collect::<Vec<_>>(), "n={} p={}", n, page_size);
                assert!(!catalog.has_more());

                // Exhausted: further calls change nothing
                assert_eq!(catalog.load_next_page(), 0);
                assert_eq!(catalog.load_next_page(), 0);
                assert_eq!(catalog.displayed().len(), n as usize);
                assert_eq!(catalog.current_page(), pages);
            }
        }
    }

    #[test]
    fn test_empty_list_displays_nothing() {
        let mut catalog = CatalogService::new(6);
        catalog.set_products(Vec::new());

        assert_eq!(catalog.load_next_page(), 0);
        assert!(catalog.displayed().is_empty());
        assert!(!catalog.should_load_more(0));
    }

    #[test]
    fn test_zero_page_size_is_clamped() {
        let mut catalog = CatalogService::new(0);
        catalog.set_products(products(2));
        assert_eq!(catalog.page_size(), 1);
        assert_eq!(catalog.load_next_page(), 1);
    }

    #[test]
    fn test_should_load_more_only_on_last_item() {
        let mut catalog = CatalogService::new(6);
        catalog.set_products(products(14));
        catalog.load_next_page();

        assert!(!catalog.should_load_more(0));
        assert!(!catalog.should_load_more(4));
        assert!(catalog.should_load_more(5));
        assert!(!catalog.should_load_more(6));
    }

    #[tokio::test]
    async fn test_load_shows_first_page() {
        let mut catalog = CatalogService::default();
        let shown = catalog.load(&DemoCatalog::new()).await.unwrap();

        assert_eq!(shown, DEFAULT_PAGE_SIZE);
        assert_eq!(catalog.state(), CatalogState::Ready);
        assert_eq!(catalog.products().len(), 14);
        assert!(catalog.find(14).is_some());
    }

    #[tokio::test]
    async fn test_failed_load_is_unavailable() {
        let mut catalog = CatalogService::default();
        let err = catalog.load(&OfflineCatalog).await.unwrap_err();

        assert!(matches!(err, FetchError::Unreachable(_)));
        assert_eq!(catalog.state(), CatalogState::Unavailable);
        assert!(catalog.displayed().is_empty());
        assert!(!catalog.has_more());
    }
}
