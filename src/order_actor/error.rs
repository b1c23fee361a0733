//! Error types for the Order actor.

use crate::model::{OrderId, UserId};
use thiserror::Error;

/// Errors that can occur during order operations.
///
/// `EmptyCart` and `NothingToFulfil` are ordinary checkout outcomes rather than faults;
/// [`Platform::process_order`](crate::lifecycle::Platform::process_order) turns them into
/// a [`Checkout`](crate::lifecycle::Checkout) status.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The requested order was not found.
    #[error("Order not found: {0}")]
    NotFound(String),

    /// The user placing the order does not exist.
    #[error("Invalid user: {0}")]
    InvalidUser(String),

    #[error("Cart is empty for {0}")]
    EmptyCart(UserId),

    /// Every line was dropped, so there is nothing left to order.
    #[error("Nothing to fulfil for {user_id}")]
    NothingToFulfil { user_id: UserId, missing: Vec<String> },

    /// The order's total is too large to represent.
    #[error("Order total overflows for {user_id}")]
    TotalOverflow { user_id: UserId },

    /// Orders cannot be changed after they are placed.
    #[error("Order {0} is immutable")]
    Immutable(OrderId),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for OrderError {
    fn from(msg: String) -> Self {
        OrderError::ActorCommunicationError(msg)
    }
}
