//! Fake Store API client
//!
//! Loads the product catalog from the public mock storefront API
//! (https://fakestoreapi.com). One GET per call, no retry, no caching.

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::domain::result::FetchError;
use crate::domain::Product;
use crate::ports::CatalogSource;

/// Default production endpoint
pub const FAKESTORE_PRODUCTS_URL: &str = "https://fakestoreapi.com/products";

/// Environment variable to override the catalog endpoint
pub const CATALOG_URL_ENV: &str = "CLIPKART_CATALOG_URL";

/// Validate a catalog endpoint
pub fn parse_catalog_url(url: &str) -> Result<Url, FetchError> {
    let parsed =
        Url::parse(url).map_err(|e| FetchError::InvalidUrl(format!("{}: {}", url, e)))?;

    match parsed.scheme() {
        "https" | "http" => Ok(parsed),
        scheme => Err(FetchError::InvalidUrl(format!(
            "{}: unsupported scheme '{}'",
            url, scheme
        ))),
    }
}

/// Fake Store API client
#[derive(Debug)]
pub struct FakeStoreClient {
    client: Client,
    url: Url,
}

impl FakeStoreClient {
    /// Create a client for a specific endpoint
    pub fn with_url(url: &str) -> Result<Self, FetchError> {
        let url = parse_catalog_url(url)?;

        // No timeout override: the client default applies
        let client = Client::builder()
            .user_agent(concat!("clipkart/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Unreachable(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, url })
    }

    /// Endpoint this client fetches from
    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Fetch and decode the full product list
    pub async fn get_products(&self) -> Result<Vec<Product>, FetchError> {
        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        self.check_response_status(&response)?;

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::InvalidResponse(format!("Failed to read body: {}", e)))?;

        serde_json::from_slice::<Vec<Product>>(&body)
            .map_err(|e| FetchError::InvalidResponse(format!("Failed to decode products: {}", e)))
    }

    /// Map request errors to the fetch taxonomy
    fn map_request_error(&self, error: reqwest::Error) -> FetchError {
        if error.is_builder() {
            FetchError::InvalidUrl(format!("{}: {}", self.url, error))
        } else {
            FetchError::Unreachable(error.to_string())
        }
    }

    /// Only a 200 counts as success
    fn check_response_status(&self, response: &reqwest::Response) -> Result<(), FetchError> {
        match response.status().as_u16() {
            200 => Ok(()),
            status => Err(FetchError::InvalidResponse(format!("HTTP {}", status))),
        }
    }
}

#[async_trait]
impl CatalogSource for FakeStoreClient {
    fn name(&self) -> &str {
        "fakestore"
    }

    async fn fetch_all(&self) -> Result<Vec<Product>, FetchError> {
        self.get_products().await
    }
}
