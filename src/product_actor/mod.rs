//! # Product Actor
//!
//! Owns the catalog. Besides CRUD it serves the two stock actions the checkout relies on:
//! [`ProductAction::CheckStock`] reads the level, [`ProductAction::ReserveStock`]
//! decrements it or fails with [`ProductError::InsufficientStock`] leaving it untouched.
//!
//! Since the actor handles one request at a time, a reservation is check-and-decrement
//! in one step. Two checkouts racing for the last unit cannot both get it.
//!
//! ```rust
//! use storefront::clients::ProductClient;
//! use storefront::model::ProductCreate;
//! use storefront::product_actor;
//! use rust_decimal::Decimal;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = product_actor::new(32);
//!     tokio::spawn(actor.run(()));
//!
//!     let id = client
//!         .create_product(ProductCreate::new("Laptop", Decimal::new(89999, 2), 10))
//!         .await?;
//!     client.reserve_stock(id, 2).await?;
//!     assert_eq!(client.check_stock(id).await?, 8);
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::ProductClient;
use crate::framework::ResourceActor;
use crate::model::Product;

/// Creates a new Product actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Product>, ProductClient) {
    let (actor, client) = ResourceActor::new(buffer_size);
    (actor, ProductClient::new(client))
}
