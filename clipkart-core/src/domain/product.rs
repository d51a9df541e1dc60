//! Product domain model

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// A catalog product as served by the catalog API
///
/// Products are immutable once fetched; the cart and the pagination
/// controller only ever hold clones of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub category: String,
    /// Image URL
    pub image: String,
    #[serde(deserialize_with = "deserialize_price")]
    pub price: Decimal,
    pub rating: Rating,
}

/// Average score and number of reviews
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub rate: f64,
    pub count: u32,
}

impl Product {
    pub fn new(id: u32, title: impl Into<String>, price: Decimal) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            category: String::new(),
            image: String::new(),
            price,
            rating: Rating { rate: 0.0, count: 0 },
        }
    }

    /// "MRP" shown struck through next to the price: price plus 10%,
    /// rounded to a whole currency unit
    pub fn list_price(&self) -> Decimal {
        (self.price * Decimal::new(110, 2))
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Same product identity (id only, not structural equality)
    pub fn same_item(&self, other: &Product) -> bool {
        self.id == other.id
    }
}

/// Deserialize a price that can be a JSON number or a numeric string
///
/// Numbers go through their textual form so `109.95` stays exactly `109.95`.
fn deserialize_price<'de, D>(deserializer: D) -> std::result::Result<Decimal, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    let value: JsonValue = Deserialize::deserialize(deserializer)?;
    match value {
        JsonValue::Number(n) => n
            .to_string()
            .parse::<Decimal>()
            .or_else(|_| Decimal::from_scientific(&n.to_string()))
            .map_err(|e| D::Error::custom(format!("invalid price: {}", e))),
        JsonValue::String(s) => s
            .trim()
            .parse::<Decimal>()
            .map_err(|e| D::Error::custom(format!("invalid price: {}", e))),
        _ => Err(D::Error::custom("expected number or string for price")),
    }
}
