//! Cart operations on a [`User`](crate::model::User).

use crate::model::{Cart, ProductId};

#[derive(Debug, Clone)]
pub enum UserAction {
    /// Adds to the line for `product_id`. The product must exist in the catalog; stock
    /// is not checked.
    AddToCart { product_id: ProductId, quantity: u32 },
    /// Takes quantity off a line. Removing more than the line holds is a no-op.
    RemoveFromCart { product_id: ProductId, quantity: u32 },
    ViewCart,
    /// Empties the cart and returns its previous contents.
    Checkout,
    /// Merges lines back into the cart after a checkout could not complete.
    RestoreCart(Cart),
}

/// Results from UserActions - variants match 1:1 with UserAction
#[derive(Debug, Clone, PartialEq)]
pub enum UserActionResult {
    /// New quantity of the line.
    AddToCart(u32),
    /// Whether anything was removed.
    RemoveFromCart(bool),
    ViewCart(Cart),
    Checkout(Cart),
    RestoreCart(()),
}
