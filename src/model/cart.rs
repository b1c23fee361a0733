//! Per-user shopping cart.

use crate::model::ProductId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Requested quantity per product.
///
/// Lines are kept in ascending product-id order, which is also the order a checkout
/// visits them in. A line whose quantity has dropped to zero stays in the map but counts
/// as empty everywhere: [`Cart::is_empty`] ignores it and [`Cart::lines`] skips it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: BTreeMap<ProductId, u32>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `quantity` to the line for `product`, creating it if needed.
    ///
    /// No stock check happens here; over-ordering surfaces at checkout. Returns the new
    /// quantity of the line.
    pub fn add_item(&mut self, product: ProductId, quantity: u32) -> u32 {
        let line = self.items.entry(product).or_insert(0);
        *line = line.saturating_add(quantity);
        *line
    }

    /// Takes `quantity` off the line for `product`.
    ///
    /// Asking for more than the line holds (or for a product not in the cart) changes
    /// nothing and is not an error. Returns whether the removal was applied.
    pub fn remove_item(&mut self, product: ProductId, quantity: u32) -> bool {
        match self.items.get_mut(&product) {
            Some(current) if *current >= quantity => {
                *current -= quantity;
                true
            }
            _ => false,
        }
    }

    /// The live mapping, zero-quantity lines included.
    pub fn items(&self) -> &BTreeMap<ProductId, u32> {
        &self.items
    }

    /// Mutable access to the live mapping.
    pub fn items_mut(&mut self) -> &mut BTreeMap<ProductId, u32> {
        &mut self.items
    }

    pub fn quantity(&self, product: ProductId) -> u32 {
        self.items.get(&product).copied().unwrap_or(0)
    }

    /// Lines with a non-zero quantity, in product-id order.
    pub fn lines(&self) -> impl Iterator<Item = (ProductId, u32)> + '_ {
        self.items
            .iter()
            .filter(|(_, quantity)| **quantity > 0)
            .map(|(product, quantity)| (*product, *quantity))
    }

    pub fn is_empty(&self) -> bool {
        self.lines().next().is_none()
    }

    /// Adds every line of `other` to this cart.
    pub fn merge(&mut self, other: Cart) {
        for (product, quantity) in other.items {
            self.add_item(product, quantity);
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Empties the cart and returns what it held.
    pub fn take(&mut self) -> Cart {
        std::mem::take(self)
    }
}
