use crate::model::{ProductId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use thiserror::Error;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

/// One product line of an order, priced when the order was placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    /// Whether stock was actually reserved for this line.
    pub fulfilled: bool,
}

/// A line subtotal or order total does not fit in a `Decimal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Order total overflows")]
pub struct TotalOverflow;

impl OrderLine {
    pub fn subtotal(&self) -> Result<Decimal, TotalOverflow> {
        self.unit_price
            .checked_mul(Decimal::from(self.quantity))
            .ok_or(TotalOverflow)
    }
}

/// Sum of the line subtotals.
pub fn checked_total(lines: &[OrderLine]) -> Result<Decimal, TotalOverflow> {
    lines.iter().try_fold(Decimal::ZERO, |total, line| {
        total.checked_add(line.subtotal()?).ok_or(TotalOverflow)
    })
}

/// An immutable record of a completed checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    /// The charged lines, in product-id order.
    pub lines: Vec<OrderLine>,
    /// Lines left out of the order because no stock could be reserved for them. Not
    /// part of the total.
    pub excluded: Vec<OrderLine>,
    pub total: Decimal,
}

impl Order {
    /// Builds an order from a snapshot of lines.
    ///
    /// The total is computed here, once, from the unit prices captured in `lines`. Later
    /// repricing in the catalog does not reach an existing order.
    ///
    /// # Errors
    /// `TotalOverflow` if the total is not representable.
    pub fn new(id: OrderId, user_id: UserId, lines: Vec<OrderLine>) -> Result<Self, TotalOverflow> {
        let total = checked_total(&lines)?;
        Ok(Self {
            id,
            user_id,
            lines,
            excluded: Vec::new(),
            total,
        })
    }

    /// Records lines that were dropped from the order. The total is unaffected.
    pub fn with_excluded(mut self, excluded: Vec<OrderLine>) -> Self {
        self.excluded = excluded;
        self
    }

    /// Lines for which no stock could be reserved, charged or not.
    pub fn unfulfilled(&self) -> impl Iterator<Item = &OrderLine> {
        self.lines
            .iter()
            .chain(&self.excluded)
            .filter(|line| !line.fulfilled)
    }

    /// Pairs the order with the buyer's name for display.
    pub fn receipt<'a>(&'a self, username: &'a str) -> OrderReceipt<'a> {
        OrderReceipt {
            order: self,
            username,
        }
    }
}

/// Payload for placing an order: the buyer whose cart gets checked out.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub user_id: UserId,
}

/// Human-readable summary of an order.
///
/// ```text
/// Order ID: 1
/// User: alice123
/// Total Amount: $2299.97
/// Ordered Items:
/// - Laptop x2
/// - Smartphone x1
/// ```
pub struct OrderReceipt<'a> {
    order: &'a Order,
    username: &'a str,
}

impl Display for OrderReceipt<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Order ID: {}", self.order.id.0)?;
        writeln!(f, "User: {}", self.username)?;
        writeln!(f, "Total Amount: ${}", self.order.total.round_dp(2))?;
        write!(f, "Ordered Items:")?;
        for line in &self.order.lines {
            write!(f, "\n- {} x{}", line.name, line.quantity)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: u32, name: &str, unit_price: Decimal, quantity: u32, fulfilled: bool) -> OrderLine {
        OrderLine {
            product_id: ProductId(id),
            name: name.to_string(),
            unit_price,
            quantity,
            fulfilled,
        }
    }

    #[test]
    fn test_total_is_sum_of_line_subtotals() {
        let order = Order::new(
            OrderId(1),
            UserId(1),
            vec![
                line(1, "Laptop", Decimal::new(89999, 2), 2, true),
                line(2, "Smartphone", Decimal::new(49999, 2), 1, true),
            ],
        )
        .unwrap();
        assert_eq!(order.total, Decimal::new(229997, 2));
        assert_eq!(order.unfulfilled().count(), 0);
    }

    #[test]
    fn test_unfulfilled_lines_still_count_towards_total() {
        let order = Order::new(
            OrderId(2),
            UserId(1),
            vec![line(3, "Cable", Decimal::new(1000, 2), 5, false)],
        )
        .unwrap();
        assert_eq!(order.total, Decimal::new(5000, 2));
        assert_eq!(order.unfulfilled().map(|l| l.name.as_str()).collect::<Vec<_>>(), ["Cable"]);
    }

    #[test]
    fn test_excluded_lines_are_reported_but_not_charged() {
        let order = Order::new(
            OrderId(4),
            UserId(1),
            vec![line(1, "Laptop", Decimal::new(89999, 2), 1, true)],
        )
        .unwrap()
        .with_excluded(vec![line(3, "Cable", Decimal::new(1000, 2), 5, false)]);

        assert_eq!(order.total, Decimal::new(89999, 2));
        assert_eq!(order.unfulfilled().count(), 1);
        assert!(!order.receipt("bob456").to_string().contains("Cable"));
    }

    #[test]
    fn test_empty_order_totals_zero() {
        let order = Order::new(OrderId(3), UserId(1), Vec::new()).unwrap();
        assert_eq!(order.total, Decimal::ZERO);
    }

    #[test]
    fn test_line_subtotal_overflow_is_an_error() {
        let gem = line(9, "Gem", Decimal::MAX, 2, true);
        assert_eq!(gem.subtotal(), Err(TotalOverflow));
        assert_eq!(
            Order::new(OrderId(5), UserId(1), vec![gem]),
            Err(TotalOverflow)
        );
    }

    #[test]
    fn test_total_overflow_across_lines_is_an_error() {
        let lines = vec![
            line(1, "Gem", Decimal::MAX, 1, true),
            line(2, "Pearl", Decimal::MAX, 1, true),
        ];
        assert_eq!(checked_total(&lines), Err(TotalOverflow));
        assert_eq!(checked_total(&lines[..1]), Ok(Decimal::MAX));
    }

    #[test]
    fn test_receipt_layout() {
        let order = Order::new(
            OrderId(1),
            UserId(1),
            vec![
                line(1, "Laptop", Decimal::new(89999, 2), 2, true),
                line(2, "Smartphone", Decimal::new(49999, 2), 1, true),
            ],
        )
        .unwrap();

        let expected = "Order ID: 1\n\
                        User: alice123\n\
                        Total Amount: $2299.97\n\
                        Ordered Items:\n\
                        - Laptop x2\n\
                        - Smartphone x1";
        assert_eq!(order.receipt("alice123").to_string(), expected);
    }
}
