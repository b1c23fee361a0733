//! Generic actor runtime for resource management.
//!
//! - [`ActorEntity`] - trait a resource type implements to be served by an actor
//! - [`ResourceActor`] - the actor owning one resource collection
//! - [`ResourceClient`] - cloneable handle for sending it requests
//! - [`ActorClient`] - shared surface of the resource-specific clients
//! - [`FrameworkError`] - transport errors plus the boxed entity error
//!
//! See [`mock`] for testing one actor against scripted neighbours.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
