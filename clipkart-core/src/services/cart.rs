//! Cart store - the products the user has picked
//!
//! De-duplicated by product id, in insertion order. Every mutation that
//! changes the contents publishes the new contents to all subscribers
//! before it returns; no-op mutations publish nothing.

use rust_decimal::Decimal;
use tokio::sync::watch;

use crate::domain::Product;

pub struct CartStore {
    items: watch::Sender<Vec<Product>>,
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CartStore {
    pub fn new() -> Self {
        let (items, _) = watch::channel(Vec::new());
        Self { items }
    }

    /// Add a product unless one with the same id is already present
    pub fn add(&self, product: &Product) -> bool {
        self.items.send_if_modified(|items| {
            if items.iter().any(|p| p.same_item(product)) {
                return false;
            }
            items.push(product.clone());
            true
        })
    }

    /// Remove every entry with the product's id
    pub fn remove(&self, product: &Product) -> bool {
        self.items.send_if_modified(|items| {
            let before = items.len();
            items.retain(|p| !p.same_item(product));
            items.len() != before
        })
    }

    pub fn contains(&self, product: &Product) -> bool {
        self.items.borrow().iter().any(|p| p.same_item(product))
    }

    /// Add if absent, remove if present; returns whether it is now in the cart
    pub fn toggle(&self, product: &Product) -> bool {
        if self.remove(product) {
            false
        } else {
            self.add(product)
        }
    }

    /// Remove entries by position
    ///
    /// Offsets refer to the contents before the call. Duplicate and
    /// out-of-range offsets are ignored. Returns the number removed.
    pub fn remove_at(&self, offsets: &[usize]) -> usize {
        let mut removed = 0;
        self.items.send_if_modified(|items| {
            let mut index = 0;
            items.retain(|_| {
                let keep = !offsets.contains(&index);
                index += 1;
                keep
            });
            removed = index - items.len();
            removed > 0
        });
        removed
    }

    pub fn clear(&self) {
        self.items.send_if_modified(|items| {
            if items.is_empty() {
                return false;
            }
            items.clear();
            true
        });
    }

    /// Snapshot of the current contents
    pub fn items(&self) -> Vec<Product> {
        self.items.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    /// Sum of the item prices
    pub fn total(&self) -> Decimal {
        self.items.borrow().iter().map(|p| p.price).sum()
    }

    /// Receive the contents after each change
    pub fn subscribe(&self) -> watch::Receiver<Vec<Product>> {
        self.items.subscribe()
    }
}
