//! Custom actions for the Product actor.

/// Stock operations beyond plain CRUD.
#[derive(Debug, Clone)]
pub enum ProductAction {
    /// Reads the current stock level.
    CheckStock,
    /// Takes the given quantity out of stock.
    ///
    /// # Errors
    /// Fails with `InsufficientStock` if the quantity exceeds what is available.
    ReserveStock(u32),
}

/// Results from ProductActions - variants match 1:1 with ProductAction
#[derive(Debug, Clone, PartialEq)]
pub enum ProductActionResult {
    CheckStock(u32),
    /// Stock left after the reservation.
    ReserveStock(u32),
}
