//! [`ActorEntity`] implementation for [`User`].

use super::actions::{UserAction, UserActionResult};
use super::error::UserError;
use crate::clients::ProductClient;
use crate::framework::{ActorClient, ActorEntity};
use crate::model::{User, UserCreate, UserId, UserUpdate};
use async_trait::async_trait;
use tracing::debug;

fn validate_username(username: &str) -> Result<(), UserError> {
    if username.trim().is_empty() {
        return Err(UserError::ValidationError("username must not be empty".into()));
    }
    Ok(())
}

#[async_trait]
impl ActorEntity for User {
    type Id = UserId;
    type Create = UserCreate;
    type Update = UserUpdate;
    type Action = UserAction;
    type ActionResult = UserActionResult;
    type Context = ProductClient;
    type Error = UserError;

    fn from_create_params(id: UserId, params: UserCreate) -> Result<Self, Self::Error> {
        validate_username(&params.username)?;
        Ok(Self::new(id, params.username, params.password))
    }

    async fn on_update(&mut self, update: UserUpdate, _ctx: &ProductClient) -> Result<(), Self::Error> {
        if let Some(username) = update.username {
            validate_username(&username)?;
            self.username = username;
        }
        if let Some(password) = update.password {
            self.password = password;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: UserAction,
        products: &ProductClient,
    ) -> Result<UserActionResult, Self::Error> {
        match action {
            UserAction::AddToCart {
                product_id,
                quantity,
            } => {
                let known = products
                    .get(product_id)
                    .await
                    .map_err(|e| UserError::ActorCommunicationError(e.to_string()))?;
                if known.is_none() {
                    return Err(UserError::UnknownProduct(product_id));
                }
                Ok(UserActionResult::AddToCart(self.cart.add_item(product_id, quantity)))
            }
            UserAction::RemoveFromCart {
                product_id,
                quantity,
            } => {
                let removed = self.cart.remove_item(product_id, quantity);
                if !removed {
                    debug!(user = %self.id, %product_id, quantity, "Nothing removed");
                }
                Ok(UserActionResult::RemoveFromCart(removed))
            }
            UserAction::ViewCart => Ok(UserActionResult::ViewCart(self.cart.clone())),
            UserAction::Checkout => Ok(UserActionResult::Checkout(self.cart.take())),
            UserAction::RestoreCart(cart) => {
                self.cart.merge(cart);
                Ok(UserActionResult::RestoreCart(()))
            }
        }
    }
}
