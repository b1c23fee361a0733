//! # Storefront
//!
//! A small shop built from resource-oriented actors on tokio: users with carts, a product
//! catalog with stock, and orders placed by checking a cart out.
//!
//! ## Layout
//!
//! - [`framework`]: the generic [`ResourceActor`](framework::ResourceActor) and the
//!   [`ActorEntity`](framework::ActorEntity) trait every resource implements.
//! - [`model`]: plain data ([`User`](model::User), [`Product`](model::Product),
//!   [`Cart`](model::Cart), [`Order`](model::Order)).
//! - [`user_actor`], [`product_actor`], [`order_actor`]: entity behaviour, actions and
//!   errors per resource. The checkout lives in the order actor.
//! - [`clients`]: typed handles for each actor.
//! - [`lifecycle`]: the [`Platform`](lifecycle::Platform) that starts, wires and stops the
//!   actors, plus configuration and tracing setup.
//!
//! ## Checkout semantics
//!
//! Placing an order reserves stock for every cart line it can. A line that runs short is
//! reported and, under the default [`FailedLinePolicy::Charge`](lifecycle::FailedLinePolicy),
//! still billed. Reserved stock is never released again. The cart ends up empty either
//! way.
//!
//! ## Testing
//!
//! See [`framework::mock`] for testing one actor against scripted neighbours.

pub mod clients;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod product_actor;
pub mod user_actor;
