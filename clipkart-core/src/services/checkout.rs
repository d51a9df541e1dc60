//! Checkout service - turns the cart into an order

use chrono::Utc;

use crate::domain::result::{Error, Result};
use crate::domain::{OrderConfirmation, OrderDraft};
use crate::services::{CartStore, Session};

#[derive(Debug, Default)]
pub struct CheckoutService;

impl CheckoutService {
    pub fn new() -> Self {
        Self
    }

    /// Draft an order with one line per cart item
    pub fn draft(&self, cart: &CartStore) -> OrderDraft {
        OrderDraft::new(cart.items())
    }

    /// Place the order for whoever is signed in
    ///
    /// The cart is left as is.
    pub fn confirm(&self, draft: OrderDraft, session: &Session) -> Result<OrderConfirmation> {
        if draft.is_empty() {
            return Err(Error::invalid_input("Your cart is empty"));
        }

        let total = draft.total();
        Ok(OrderConfirmation {
            customer: session.current_user(),
            lines: draft.lines,
            payment_method: draft.payment_method,
            pin_code: draft.pin_code,
            total,
            placed_at: Utc::now(),
        })
    }
}
