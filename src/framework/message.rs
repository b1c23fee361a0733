//! # Generic Messages
//!
//! Requests exchanged between a [`ResourceClient`](crate::framework::ResourceClient) and
//! its [`ResourceActor`](crate::framework::ResourceActor).

use crate::framework::entity::ActorEntity;
use crate::framework::error::FrameworkError;
use tokio::sync::oneshot;

/// One-shot channel the actor answers on.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// A request to a resource actor.
///
/// The variants are the CRUD lifecycle of a resource plus `List` for reading the whole
/// collection and `Action` for resource-specific operations that do not fit CRUD
/// (reserving stock, checking out a cart). Payload types come from the entity's
/// associated types, so a product payload cannot be sent to the user actor.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}
