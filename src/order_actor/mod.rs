//! # Order Actor
//!
//! Turns a user's cart into an [`Order`]. Creating an order *is* the checkout: the
//! [`ActorEntity::on_create`](crate::framework::ActorEntity::on_create) hook of [`Order`]
//! takes the cart from the user actor, reserves stock line by line at the product actor,
//! and prices the result. See [`entity`] for the exact steps.
//!
//! The order actor is the only one with dependencies, which it receives as an
//! [`OrderContext`] when it starts:
//!
//! ```rust,ignore
//! let context = OrderContext::new(user_client.clone(), product_client.clone());
//! tokio::spawn(order_actor.run(context));
//! ```
//!
//! Because the actor runs its hooks one request at a time, checkouts are serialized: two
//! users checking out concurrently never interleave their reservations.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::{OrderClient, ProductClient, UserClient};
use crate::framework::ResourceActor;
use crate::lifecycle::FailedLinePolicy;
use crate::model::Order;

/// Dependencies of the order actor.
#[derive(Clone)]
pub struct OrderContext {
    pub users: UserClient,
    pub products: ProductClient,
    /// What happens to lines whose stock could not be reserved.
    pub failed_lines: FailedLinePolicy,
}

impl OrderContext {
    pub fn new(users: UserClient, products: ProductClient) -> Self {
        Self {
            users,
            products,
            failed_lines: FailedLinePolicy::default(),
        }
    }

    pub fn with_failed_lines(mut self, policy: FailedLinePolicy) -> Self {
        self.failed_lines = policy;
        self
    }
}

/// Creates a new Order actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Order>, OrderClient) {
    let (actor, client) = ResourceActor::new(buffer_size);
    (actor, OrderClient::new(client))
}
