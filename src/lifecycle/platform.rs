use crate::clients::{OrderClient, ProductClient, UserClient};
use crate::framework::ActorClient;
use crate::lifecycle::PlatformConfig;
use crate::model::{Order, ProductCreate, ProductId, UserCreate, UserId};
use crate::order_actor::{self, OrderContext, OrderError};
use crate::product_actor::{self, ProductError};
use crate::user_actor::{self, UserError};
use rust_decimal::Decimal;
use std::fmt::Write;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Failures that are not business outcomes: unknown users, rejected catalog data,
/// actors that stopped answering.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error(transparent)]
    User(#[from] UserError),
    #[error(transparent)]
    Product(#[from] ProductError),
    #[error(transparent)]
    Order(#[from] OrderError),
    #[error("Actor task failed: {0}")]
    ActorTask(String),
}

/// Outcome of [`Platform::process_order`].
#[derive(Debug, Clone, PartialEq)]
pub enum Checkout {
    /// An order was created. Some of its lines may lack reserved stock.
    Placed(Order),
    /// The cart had nothing in it. No order was created.
    EmptyCart,
    /// Every line was left out for lack of stock. No order was created, the cart was
    /// still cleared.
    NothingFulfilled { missing: Vec<String> },
}

impl Checkout {
    /// The message shown to the shopper, one line per event.
    pub fn report(&self) -> String {
        let mut report = String::new();
        match self {
            Checkout::EmptyCart => report.push_str("Cart is empty."),
            Checkout::Placed(order) => {
                for line in order.unfulfilled() {
                    let _ = writeln!(report, "Not enough stock for: {}", line.name);
                }
                report.push_str("Order placed successfully.");
            }
            Checkout::NothingFulfilled { missing } => {
                for name in missing {
                    let _ = writeln!(report, "Not enough stock for: {name}");
                }
                report.push_str("Nothing left to order.");
            }
        }
        report
    }

    pub fn order(&self) -> Option<&Order> {
        match self {
            Checkout::Placed(order) => Some(order),
            _ => None,
        }
    }
}

/// The running storefront: users, catalog and orders, each behind its own actor.
///
/// ```rust
/// use storefront::lifecycle::{Checkout, Platform};
/// use rust_decimal::Decimal;
///
/// #[tokio::main]
/// async fn main() -> Result<(), storefront::lifecycle::PlatformError> {
///     let platform = Platform::new();
///     let alice = platform.add_user("alice123", "password1").await?;
///     let laptop = platform.add_product("Laptop", Decimal::new(89999, 2), 10).await?;
///
///     platform.users.add_to_cart(alice, laptop, 2).await?;
///     let checkout = platform.process_order(alice).await?;
///     assert!(matches!(checkout, Checkout::Placed(_)));
///
///     platform.shutdown().await
/// }
/// ```
pub struct Platform {
    pub users: UserClient,
    pub products: ProductClient,
    pub orders: OrderClient,
    handles: Vec<(&'static str, JoinHandle<()>)>,
}

impl Default for Platform {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform {
    /// Starts a platform with the default configuration. Must be called inside a tokio
    /// runtime.
    pub fn new() -> Self {
        Self::with_config(PlatformConfig::default())
    }

    pub fn with_config(config: PlatformConfig) -> Self {
        let buffer_size = config.buffer_size.get();
        let (product_actor, products) = product_actor::new(buffer_size);
        let (user_actor, users) = user_actor::new(buffer_size);
        let (order_actor, orders) = order_actor::new(buffer_size);

        let context = OrderContext::new(users.clone(), products.clone())
            .with_failed_lines(config.failed_lines);

        // Awaited in this order on shutdown: each actor only stops once the ones
        // holding its client have stopped.
        let handles = vec![
            ("order", tokio::spawn(order_actor.run(context))),
            ("user", tokio::spawn(user_actor.run(products.clone()))),
            ("product", tokio::spawn(product_actor.run(()))),
        ];

        info!(?config, "Platform started");
        Self {
            users,
            products,
            orders,
            handles,
        }
    }

    pub async fn add_user(&self, username: &str, password: &str) -> Result<UserId, PlatformError> {
        Ok(self
            .users
            .create_user(UserCreate::new(username, password))
            .await?)
    }

    pub async fn add_product(
        &self,
        name: &str,
        price: Decimal,
        stock: u32,
    ) -> Result<ProductId, PlatformError> {
        Ok(self
            .products
            .create_product(ProductCreate::new(name, price, stock))
            .await?)
    }

    /// Checks out the user's cart.
    ///
    /// An empty cart or a cart of which nothing could be supplied is a normal outcome
    /// reported through [`Checkout`], not an error.
    pub async fn process_order(&self, user_id: UserId) -> Result<Checkout, PlatformError> {
        match self.orders.place_order(user_id).await {
            Ok(order) => Ok(Checkout::Placed(order)),
            Err(OrderError::EmptyCart(_)) => Ok(Checkout::EmptyCart),
            Err(OrderError::NothingToFulfil { missing, .. }) => {
                Ok(Checkout::NothingFulfilled { missing })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Every order placed so far, oldest first.
    pub async fn orders(&self) -> Result<Vec<Order>, PlatformError> {
        Ok(self.orders.list().await?)
    }

    /// Renders the order summary with the buyer's current username.
    pub async fn receipt(&self, order: &Order) -> Result<String, PlatformError> {
        let user = self
            .users
            .get(order.user_id)
            .await?
            .ok_or_else(|| UserError::NotFound(order.user_id.to_string()))?;
        Ok(order.receipt(&user.username).to_string())
    }

    /// Drops every client and waits for the actors to drain their queues and stop.
    pub async fn shutdown(self) -> Result<(), PlatformError> {
        info!("Shutting down platform");
        drop(self.orders);
        drop(self.users);
        drop(self.products);

        let mut failed = Vec::new();
        for (name, handle) in self.handles {
            if let Err(e) = handle.await {
                error!(actor = name, error = %e, "Actor task failed");
                failed.push(format!("{name}: {e}"));
            }
        }

        if failed.is_empty() {
            info!("Platform stopped");
            Ok(())
        } else {
            Err(PlatformError::ActorTask(failed.join(", ")))
        }
    }
}
