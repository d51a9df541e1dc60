//! Checkout domain models

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::result::{Error, Result};
use super::{Product, SessionUser};

/// Allowed quantity per order line
pub const MIN_QUANTITY: u32 = 1;
pub const MAX_QUANTITY: u32 = 99;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    CreditCard,
    PayPal,
    CashOnDelivery,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] = [
        PaymentMethod::CreditCard,
        PaymentMethod::PayPal,
        PaymentMethod::CashOnDelivery,
    ];
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PaymentMethod::CreditCard => "Credit Card",
            PaymentMethod::PayPal => "PayPal",
            PaymentMethod::CashOnDelivery => "Cash on Delivery",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderLine {
    pub product: Product,
    pub quantity: u32,
}

impl OrderLine {
    pub fn subtotal(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

/// An order being filled in on the confirmation screen
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderDraft {
    pub lines: Vec<OrderLine>,
    pub payment_method: PaymentMethod,
    /// Shipping pin code, free text
    pub pin_code: String,
}

impl OrderDraft {
    /// One line per product, quantity 1
    pub fn new(products: impl IntoIterator<Item = Product>) -> Self {
        Self {
            lines: products
                .into_iter()
                .map(|product| OrderLine {
                    product,
                    quantity: MIN_QUANTITY,
                })
                .collect(),
            payment_method: PaymentMethod::default(),
            pin_code: String::new(),
        }
    }

    pub fn set_quantity(&mut self, product_id: u32, quantity: u32) -> Result<()> {
        if !(MIN_QUANTITY..=MAX_QUANTITY).contains(&quantity) {
            return Err(Error::invalid_input(format!(
                "Quantity must be between {} and {}",
                MIN_QUANTITY, MAX_QUANTITY
            )));
        }
        let line = self
            .lines
            .iter_mut()
            .find(|l| l.product.id == product_id)
            .ok_or_else(|| Error::invalid_input(format!("Product {} is not in this order", product_id)))?;
        line.quantity = quantity;
        Ok(())
    }

    pub fn set_payment_method(&mut self, method: PaymentMethod) {
        self.payment_method = method;
    }

    pub fn set_pin_code(&mut self, pin_code: impl Into<String>) {
        self.pin_code = pin_code.into();
    }

    pub fn total(&self) -> Decimal {
        self.lines.iter().map(OrderLine::subtotal).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// A placed order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderConfirmation {
    pub customer: Option<SessionUser>,
    pub lines: Vec<OrderLine>,
    pub payment_method: PaymentMethod,
    pub pin_code: String,
    pub total: Decimal,
    pub placed_at: DateTime<Utc>,
}
