//! # User Actor
//!
//! Owns users and their carts. Carts live inside the [`User`] entity, so every cart
//! mutation goes through this actor and is applied in arrival order.
//!
//! The actor depends on the product catalog: [`UserAction::AddToCart`] refuses products
//! the catalog does not know. That dependency is injected at run time:
//!
//! ```rust,ignore
//! let (product_actor, product_client) = product_actor::new(32);
//! let (user_actor, user_client) = user_actor::new(32);
//! tokio::spawn(product_actor.run(()));
//! tokio::spawn(user_actor.run(product_client.clone()));
//! ```
//!
//! [`UserAction::Checkout`] hands the whole cart over and leaves an empty one behind in
//! the same step, which is what the order actor builds on.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::UserClient;
use crate::framework::ResourceActor;
use crate::model::User;

/// Creates a new User actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<User>, UserClient) {
    let (actor, client) = ResourceActor::new(buffer_size);
    (actor, UserClient::new(client))
}
