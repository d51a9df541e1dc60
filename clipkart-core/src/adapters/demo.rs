//! Demo catalog for offline use
//!
//! A fixed set of 14 products modelled on the public catalog, so the app
//! can be explored without network access (`ck demo on`).

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::result::FetchError;
use crate::domain::{Product, Rating};
use crate::ports::CatalogSource;

fn product(
    id: u32,
    title: &str,
    category: &str,
    price_cents: i64,
    rate: f64,
    count: u32,
) -> Product {
    Product {
        id,
        title: title.to_string(),
        description: format!("{} from the Clipkart demo catalog.", title),
        category: category.to_string(),
        image: format!("https://fakestoreapi.com/img/demo-{}.jpg", id),
        price: Decimal::new(price_cents, 2),
        rating: Rating { rate, count },
    }
}

/// Generate the demo product list
pub fn generate_demo_products() -> Vec<Product> {
    vec![
        product(1, "Foldsack No. 1 Backpack", "men's clothing", 10995, 3.9, 120),
        product(2, "Slim Fit Casual T-Shirt", "men's clothing", 2230, 4.1, 259),
        product(3, "Cotton Jacket", "men's clothing", 5599, 4.7, 500),
        product(4, "Casual Slim Fit Shirt", "men's clothing", 1599, 2.1, 430),
        product(5, "Gold & Silver Dragon Chain Bracelet", "jewelery", 69500, 4.6, 400),
        product(6, "Solid Gold Petite Micropave Ring", "jewelery", 16800, 3.9, 70),
        product(7, "White Gold Plated Princess Ring", "jewelery", 999, 3.0, 400),
        product(8, "Rose Gold Plated Tunnel Earrings", "jewelery", 1099, 1.9, 100),
        product(9, "2TB Portable External Hard Drive", "electronics", 6400, 3.3, 203),
        product(10, "1TB Internal SSD", "electronics", 10900, 2.9, 470),
        product(11, "256GB SATA III SSD", "electronics", 10900, 4.8, 319),
        product(12, "4TB Gaming Drive", "electronics", 11400, 4.8, 400),
        product(13, "21.5 inch Full HD IPS Monitor", "electronics", 59900, 2.9, 250),
        product(14, "49 inch Super Ultrawide Gaming Monitor", "electronics", 99999, 2.2, 140),
    ]
}

/// Offline catalog source
#[derive(Debug, Default)]
pub struct DemoCatalog;

impl DemoCatalog {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CatalogSource for DemoCatalog {
    fn name(&self) -> &str {
        "demo"
    }

    async fn fetch_all(&self) -> Result<Vec<Product>, FetchError> {
        Ok(generate_demo_products())
    }
}
