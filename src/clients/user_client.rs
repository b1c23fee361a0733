use crate::framework::{ActorClient, FrameworkError, ResourceClient};
use crate::model::{Cart, ProductId, User, UserCreate, UserId, UserUpdate};
use crate::user_actor::{UserAction, UserActionResult, UserError};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the User actor.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<User>,
}

impl UserClient {
    pub fn new(inner: ResourceClient<User>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_user(&self, params: UserCreate) -> Result<UserId, UserError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_user(&self, id: UserId, update: UserUpdate) -> Result<User, UserError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Adds `quantity` of a catalog product to the cart. Returns the line's new quantity.
    #[instrument(skip(self))]
    pub async fn add_to_cart(
        &self,
        id: UserId,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<u32, UserError> {
        match self
            .action(id, UserAction::AddToCart { product_id, quantity })
            .await?
        {
            UserActionResult::AddToCart(total) => Ok(total),
            other => Err(unexpected(other)),
        }
    }

    /// Returns `false` when the cart held less than `quantity`, in which case nothing
    /// changed.
    #[instrument(skip(self))]
    pub async fn remove_from_cart(
        &self,
        id: UserId,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<bool, UserError> {
        match self
            .action(id, UserAction::RemoveFromCart { product_id, quantity })
            .await?
        {
            UserActionResult::RemoveFromCart(removed) => Ok(removed),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn cart(&self, id: UserId) -> Result<Cart, UserError> {
        match self.action(id, UserAction::ViewCart).await? {
            UserActionResult::ViewCart(cart) => Ok(cart),
            other => Err(unexpected(other)),
        }
    }

    /// Empties the cart and returns what it held.
    #[instrument(skip(self))]
    pub async fn checkout_cart(&self, id: UserId) -> Result<Cart, UserError> {
        match self.action(id, UserAction::Checkout).await? {
            UserActionResult::Checkout(cart) => Ok(cart),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn restore_cart(&self, id: UserId, cart: Cart) -> Result<(), UserError> {
        match self.action(id, UserAction::RestoreCart(cart)).await? {
            UserActionResult::RestoreCart(()) => Ok(()),
            other => Err(unexpected(other)),
        }
    }

    async fn action(&self, id: UserId, action: UserAction) -> Result<UserActionResult, UserError> {
        debug!(?action, "Sending request");
        self.inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)
    }
}

fn unexpected(result: UserActionResult) -> UserError {
    UserError::ActorCommunicationError(format!("unexpected action result: {result:?}"))
}

#[async_trait]
impl ActorClient<User> for UserClient {
    type Error = UserError;

    fn inner(&self) -> &ResourceClient<User> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => UserError::NotFound(id),
            other => other
                .downcast_entity::<UserError>()
                .unwrap_or_else(|e| UserError::ActorCommunicationError(e.to_string())),
        }
    }
}
