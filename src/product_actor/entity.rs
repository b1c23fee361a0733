//! [`ActorEntity`] implementation for [`Product`].

use super::actions::{ProductAction, ProductActionResult};
use super::error::ProductError;
use crate::framework::ActorEntity;
use crate::model::{Product, ProductCreate, ProductId, ProductUpdate};
use async_trait::async_trait;
use rust_decimal::Decimal;

fn validate_price(price: Decimal) -> Result<(), ProductError> {
    if price < Decimal::ZERO {
        return Err(ProductError::InvalidPrice(price));
    }
    Ok(())
}

#[async_trait]
impl ActorEntity for Product {
    type Id = ProductId;
    type Create = ProductCreate;
    type Update = ProductUpdate;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;
    type Context = ();
    type Error = ProductError;

    fn from_create_params(id: ProductId, params: ProductCreate) -> Result<Self, Self::Error> {
        if params.name.trim().is_empty() {
            return Err(ProductError::ValidationError("name must not be empty".into()));
        }
        validate_price(params.price)?;
        Ok(Self::new(id, params.name, params.price, params.stock))
    }

    /// Reprices or restocks the product. Existing orders keep the price they were
    /// placed at.
    async fn on_update(&mut self, update: ProductUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(price) = update.price {
            validate_price(price)?;
            self.price = price;
        }
        if let Some(stock) = update.stock {
            self.stock = stock;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: ProductAction,
        _ctx: &(),
    ) -> Result<ProductActionResult, Self::Error> {
        match action {
            ProductAction::CheckStock => Ok(ProductActionResult::CheckStock(self.stock)),
            ProductAction::ReserveStock(quantity) => {
                if quantity > self.stock {
                    return Err(ProductError::InsufficientStock {
                        requested: quantity,
                        available: self.stock,
                    });
                }
                self.stock -= quantity;
                Ok(ProductActionResult::ReserveStock(self.stock))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn laptop() -> Product {
        Product::from_create_params(
            ProductId(1),
            ProductCreate::new("Laptop", Decimal::new(89999, 2), 10),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_reserve_stock_decrements() {
        let mut product = laptop();
        let result = product.handle_action(ProductAction::ReserveStock(2), &()).await;
        assert_eq!(result.unwrap(), ProductActionResult::ReserveStock(8));
        assert_eq!(product.stock, 8);
    }

    #[tokio::test]
    async fn test_reserve_entire_stock() {
        let mut product = laptop();
        product.handle_action(ProductAction::ReserveStock(10), &()).await.unwrap();
        assert_eq!(product.stock, 0);
    }

    #[tokio::test]
    async fn test_over_reservation_leaves_stock_untouched() {
        let mut product = laptop();
        let result = product.handle_action(ProductAction::ReserveStock(11), &()).await;
        assert_eq!(
            result.unwrap_err(),
            ProductError::InsufficientStock {
                requested: 11,
                available: 10
            }
        );
        assert_eq!(product.stock, 10);
    }

    #[test]
    fn test_create_rejects_negative_price_and_blank_name() {
        let negative = Product::from_create_params(
            ProductId(1),
            ProductCreate::new("Laptop", Decimal::new(-1, 0), 1),
        );
        assert!(matches!(negative, Err(ProductError::InvalidPrice(_))));

        let blank = Product::from_create_params(ProductId(1), ProductCreate::new("  ", Decimal::ONE, 1));
        assert!(matches!(blank, Err(ProductError::ValidationError(_))));

        let free = Product::from_create_params(ProductId(1), ProductCreate::new("Sticker", Decimal::ZERO, 1));
        assert!(free.is_ok());
    }

    #[tokio::test]
    async fn test_update_reprices_and_restocks() {
        let mut product = laptop();
        let update = ProductUpdate {
            price: Some(Decimal::new(79999, 2)),
            stock: Some(3),
        };
        product.on_update(update, &()).await.unwrap();
        assert_eq!(product.price, Decimal::new(79999, 2));
        assert_eq!(product.stock, 3);
    }
}
