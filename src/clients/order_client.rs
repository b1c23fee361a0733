use crate::framework::{ActorClient, FrameworkError, ResourceClient};
use crate::model::{Order, OrderCreate, UserId};
use crate::order_actor::OrderError;
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Order actor.
///
/// Placing an order is a create request; the checkout itself happens in the order
/// actor's `on_create` hook.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    /// Checks out the user's cart.
    ///
    /// # Errors
    /// `EmptyCart` and `NothingToFulfil` when no order came out of the checkout,
    /// `InvalidUser` for an unknown user.
    #[instrument(skip(self))]
    pub async fn place_order(&self, user_id: UserId) -> Result<Order, OrderError> {
        debug!("Sending request");
        let id = self
            .inner
            .create(OrderCreate { user_id })
            .await
            .map_err(Self::map_error)?;
        self.get(id)
            .await?
            .ok_or_else(|| OrderError::NotFound(id.to_string()))
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => OrderError::NotFound(id),
            other => other
                .downcast_entity::<OrderError>()
                .unwrap_or_else(|e| OrderError::ActorCommunicationError(e.to_string())),
        }
    }
}
