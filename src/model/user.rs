use crate::model::Cart;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Type-safe identifier for Users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserId(pub u32);

impl From<u32> for UserId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "user_{}", self.0)
    }
}

/// A registered shopper and the cart they own.
///
/// The password is stored as given; nothing authenticates against it. It is kept out of
/// the `Debug` output so it never reaches the logs.
#[derive(Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub password: String,
    pub cart: Cart,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("cart", &self.cart)
            .finish()
    }
}

impl User {
    /// Creates a user with an empty cart.
    pub fn new(id: UserId, username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            password: password.into(),
            cart: Cart::new(),
        }
    }
}

/// Payload for registering a user.
#[derive(Clone)]
pub struct UserCreate {
    pub username: String,
    pub password: String,
}

impl UserCreate {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for UserCreate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserCreate")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Payload for updating an existing user.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct UserUpdate {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl fmt::Debug for UserUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserUpdate")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_output_hides_password() {
        let user = User::new(UserId(1), "alice123", "password1");
        let rendered = format!("{user:?}");
        assert!(rendered.contains("alice123"));
        assert!(!rendered.contains("password1"));

        let update = UserUpdate {
            password: Some("hunter2".into()),
            ..Default::default()
        };
        assert!(!format!("{update:?}").contains("hunter2"));
    }
}
