//! Type-safe wrappers around [`ResourceClient`](crate::framework::ResourceClient).
//!
//! Each client turns the generic request/response traffic into named operations and
//! converts [`FrameworkError`](crate::framework::FrameworkError) back into the actor's own
//! error type, so callers can match on `ProductError::InsufficientStock` and the like.

pub mod order_client;
pub mod product_client;
pub mod user_client;

pub use order_client::*;
pub use product_client::*;
pub use user_client::*;
