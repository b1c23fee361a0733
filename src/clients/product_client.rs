//! # Product Client
//!
//! High-level API for the `Product` actor: catalog maintenance and the two stock
//! actions.

use crate::framework::{ActorClient, FrameworkError, ResourceClient};
use crate::model::{Product, ProductCreate, ProductId, ProductUpdate};
use crate::product_actor::{ProductAction, ProductActionResult, ProductError};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<ProductId, ProductError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Check the current stock level for a product.
    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: ProductId) -> Result<u32, ProductError> {
        debug!("Checking stock");
        match self
            .inner
            .perform_action(id, ProductAction::CheckStock)
            .await
            .map_err(Self::map_error)?
        {
            ProductActionResult::CheckStock(level) => Ok(level),
            other => Err(unexpected(other)),
        }
    }

    /// Reserve a specific amount of stock for a product.
    ///
    /// Returns the stock left afterwards, or `InsufficientStock` with the level
    /// untouched.
    #[instrument(skip(self))]
    pub async fn reserve_stock(&self, id: ProductId, quantity: u32) -> Result<u32, ProductError> {
        debug!("Reserving stock");
        match self
            .inner
            .perform_action(id, ProductAction::ReserveStock(quantity))
            .await
            .map_err(Self::map_error)?
        {
            ProductActionResult::ReserveStock(remaining) => Ok(remaining),
            other => Err(unexpected(other)),
        }
    }
}

fn unexpected(result: ProductActionResult) -> ProductError {
    ProductError::ActorCommunicationError(format!("unexpected action result: {result:?}"))
}

#[async_trait]
impl ActorClient<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &ResourceClient<Product> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => ProductError::NotFound(id),
            other => other
                .downcast_entity::<ProductError>()
                .unwrap_or_else(|e| ProductError::ActorCommunicationError(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{create_mock_client, expect_action};

    #[tokio::test]
    async fn test_check_stock_returns_correct_level() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let product_client = ProductClient::new(client);

        let check_task = tokio::spawn(async move { product_client.check_stock(ProductId(1)).await });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, ProductId(1));
        assert!(matches!(action, ProductAction::CheckStock));

        responder.send(Ok(ProductActionResult::CheckStock(42))).unwrap();

        assert_eq!(check_task.await.unwrap().unwrap(), 42);
    }

    #[tokio::test]
    async fn test_reserve_stock_success() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let product_client = ProductClient::new(client);

        let reserve_task =
            tokio::spawn(async move { product_client.reserve_stock(ProductId(1), 5).await });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, ProductId(1));
        match action {
            ProductAction::ReserveStock(amount) => assert_eq!(amount, 5),
            _ => panic!("Expected ReserveStock action"),
        }

        responder.send(Ok(ProductActionResult::ReserveStock(5))).unwrap();

        assert_eq!(reserve_task.await.unwrap().unwrap(), 5);
    }

    #[tokio::test]
    async fn test_reserve_stock_surfaces_typed_shortage() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let product_client = ProductClient::new(client);

        let reserve_task =
            tokio::spawn(async move { product_client.reserve_stock(ProductId(3), 5).await });

        let (_, _, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        let shortage = ProductError::InsufficientStock {
            requested: 5,
            available: 1,
        };
        responder
            .send(Err(FrameworkError::EntityError(Box::new(shortage.clone()))))
            .unwrap();

        assert_eq!(reserve_task.await.unwrap().unwrap_err(), shortage);
    }

    #[tokio::test]
    async fn test_missing_product_maps_to_not_found() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let product_client = ProductClient::new(client);

        let check_task = tokio::spawn(async move { product_client.check_stock(ProductId(9)).await });

        let (_, _, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        responder
            .send(Err(FrameworkError::NotFound(ProductId(9).to_string())))
            .unwrap();

        assert_eq!(
            check_task.await.unwrap().unwrap_err(),
            ProductError::NotFound("product_9".into())
        );
    }

    #[tokio::test]
    async fn test_closed_actor_is_a_communication_error() {
        let (client, receiver) = create_mock_client::<Product>(10);
        drop(receiver);

        let result = ProductClient::new(client).check_stock(ProductId(1)).await;
        assert!(matches!(result, Err(ProductError::ActorCommunicationError(_))));
    }
}
