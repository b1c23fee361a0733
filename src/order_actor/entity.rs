//! [`ActorEntity`] implementation for [`Order`].
//!
//! Placing an order runs these steps inside `on_create`:
//!
//! 1. Check out the user's cart. The user actor hands over the lines and empties the
//!    cart in one step.
//! 2. Stop with [`OrderError::EmptyCart`] if no line has a quantity.
//! 3. Snapshot every line in product-id order: the product's name and current price. A
//!    product that has left the catalog is dropped.
//! 4. Stop with [`OrderError::TotalOverflow`] if the snapshot cannot be priced. Nothing
//!    has been reserved yet and the cart is put back.
//! 5. Reserve each line's quantity. A line whose reservation fails with insufficient
//!    stock is kept and marked unfulfilled.
//! 6. Apply the [`FailedLinePolicy`]: `Charge` bills unfulfilled lines, `Exclude` moves
//!    them out of the order.
//! 7. Stop with [`OrderError::NothingToFulfil`] if no line is left.
//! 8. Price the order from the snapshot.
//!
//! Reserved stock is never given back. If talking to another actor fails midway, the
//! lines not reserved yet are put back in the cart before the error is returned; lines
//! already reserved are not, so retrying the checkout never reserves them twice. The cart
//! is *not* restored for the business outcomes in steps 2 and 7.

use super::error::OrderError;
use super::OrderContext;
use crate::clients::ProductClient;
use crate::framework::{ActorClient, ActorEntity};
use crate::lifecycle::FailedLinePolicy;
use crate::model::{checked_total, Cart, Order, OrderCreate, OrderId, OrderLine, UserId};
use crate::product_actor::ProductError;
use crate::user_actor::UserError;
use async_trait::async_trait;
use tracing::{info, warn};

fn communication(e: impl std::fmt::Display) -> OrderError {
    OrderError::ActorCommunicationError(e.to_string())
}

/// Name and current price of every line of `cart`, nothing reserved yet.
async fn snapshot_lines(cart: &Cart, products: &ProductClient) -> Result<Vec<OrderLine>, OrderError> {
    let mut lines = Vec::new();

    for (product_id, quantity) in cart.lines() {
        let Some(product) = products.get(product_id).await.map_err(communication)? else {
            warn!(%product_id, "Product no longer in catalog, dropping line");
            continue;
        };
        lines.push(OrderLine {
            product_id,
            name: product.name,
            unit_price: product.price,
            quantity,
            fulfilled: false,
        });
    }

    Ok(lines)
}

/// Reserves stock for each line and marks the ones that got it.
///
/// On a transport failure the error comes back with the part of `cart` that holds no
/// reservation.
async fn reserve_lines(
    lines: Vec<OrderLine>,
    cart: Cart,
    products: &ProductClient,
) -> Result<Vec<OrderLine>, (OrderError, Cart)> {
    let mut unreserved = cart;
    let mut reserved = Vec::with_capacity(lines.len());

    for mut line in lines {
        match products.reserve_stock(line.product_id, line.quantity).await {
            Ok(_) => {
                line.fulfilled = true;
                unreserved.items_mut().remove(&line.product_id);
            }
            Err(ProductError::InsufficientStock {
                requested,
                available,
            }) => {
                warn!(product = %line.name, requested, available, "Not enough stock");
            }
            Err(ProductError::NotFound(_)) => {
                warn!(product_id = %line.product_id, "Product no longer in catalog, dropping line");
                unreserved.items_mut().remove(&line.product_id);
                continue;
            }
            Err(e) => return Err((communication(e), unreserved)),
        }
        reserved.push(line);
    }

    Ok(reserved)
}

async fn restore(ctx: &OrderContext, user_id: UserId, cart: Cart) {
    if cart.is_empty() {
        return;
    }
    if let Err(e) = ctx.users.restore_cart(user_id, cart).await {
        warn!(user = %user_id, error = %e, "Failed to restore cart");
    }
}

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = ();
    type Action = ();
    type ActionResult = ();
    type Context = OrderContext;
    type Error = OrderError;

    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, Self::Error> {
        Order::new(id, params.user_id, Vec::new()).map_err(|_| OrderError::TotalOverflow {
            user_id: params.user_id,
        })
    }

    async fn on_create(&mut self, ctx: &OrderContext) -> Result<(), Self::Error> {
        let user_id = self.user_id;

        let cart = ctx
            .users
            .checkout_cart(user_id)
            .await
            .map_err(|e| match e {
                UserError::NotFound(id) => OrderError::InvalidUser(id),
                other => communication(other),
            })?;

        if cart.is_empty() {
            info!(user = %user_id, "Cart is empty");
            return Err(OrderError::EmptyCart(user_id));
        }

        let lines = match snapshot_lines(&cart, &ctx.products).await {
            Ok(lines) => lines,
            Err(e) => {
                restore(ctx, user_id, cart).await;
                return Err(e);
            }
        };

        // Every policy charges a subset of these lines, so pricing all of them up front
        // rules out an overflow after stock has moved.
        if checked_total(&lines).is_err() {
            warn!(user = %user_id, "Order total overflows, checkout refused");
            restore(ctx, user_id, cart).await;
            return Err(OrderError::TotalOverflow { user_id });
        }

        let lines = match reserve_lines(lines, cart, &ctx.products).await {
            Ok(lines) => lines,
            Err((e, unreserved)) => {
                restore(ctx, user_id, unreserved).await;
                return Err(e);
            }
        };

        let (charged, excluded): (Vec<_>, Vec<_>) = match ctx.failed_lines {
            FailedLinePolicy::Charge => (lines, Vec::new()),
            FailedLinePolicy::Exclude => lines.into_iter().partition(|line| line.fulfilled),
        };

        if charged.is_empty() {
            let missing = excluded.into_iter().map(|line| line.name).collect();
            return Err(OrderError::NothingToFulfil { user_id, missing });
        }

        let order = Order::new(self.id, user_id, charged)
            .map_err(|_| OrderError::TotalOverflow { user_id })?;
        *self = order.with_excluded(excluded);
        info!(order = %self.id, user = %user_id, total = %self.total, "Order placed");
        Ok(())
    }

    async fn on_update(&mut self, _update: (), _ctx: &OrderContext) -> Result<(), Self::Error> {
        Err(OrderError::Immutable(self.id))
    }

    async fn handle_action(&mut self, _action: (), _ctx: &OrderContext) -> Result<(), Self::Error> {
        Ok(())
    }
}
