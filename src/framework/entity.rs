//! # ActorEntity Trait
//!
//! The contract every resource (user, product, order) implements so that one generic
//! [`ResourceActor`](crate::framework::ResourceActor) can own and serve it.
//!
//! Associated types pin down the payloads per resource: a `User` actor only accepts a
//! `UserCreate`, a `Product` actor only a `ProductCreate`, and so on. Lifecycle hooks
//! receive the actor's `Context`, which is injected when the actor starts running rather
//! than when it is constructed. That is how the order actor gets hold of the user and
//! product clients without a construction-order problem.
//!
//! `on_create` and `on_delete` have default implementations that do nothing.

use async_trait::async_trait;
use std::fmt::{Debug, Display};

/// Trait that any resource entity must implement to be managed by a `ResourceActor`.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// Identifier of the entity. Generated by the actor from a `u32` counter, and
    /// ordered so that listings come back in creation order.
    type Id: Ord + Clone + Send + Sync + Display + Debug + From<u32>;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Resource-specific operations (e.g. `ReserveStock`).
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// Dependencies injected into every hook. Use `()` if none are needed.
    type Context: Send + Sync;

    /// One error enum per actor, shared by all of its operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the entity from its freshly assigned id and the create payload.
    /// Called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Called after construction and before the entity is stored. An error here
    /// rejects the create and the id is not consumed.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received.
    async fn on_update(
        &mut self,
        update: Self::Update,
        ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the entity is removed from the store.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Handle a resource-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
