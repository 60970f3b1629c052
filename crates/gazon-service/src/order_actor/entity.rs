//! Entity trait implementation for the Order domain type.
//!
//! Orders depend on the user and product stores (`Context = (UserClient,
//! ProductClient)`): checkout validates the customer and reserves stock, and
//! expiry returns that stock. Orders are indexed by [`OrderStatus`].

use super::actions::{Expiry, OrderAction, OrderActionResult};
use super::error::OrderError;
use crate::clients::{ProductClient, UserClient};
use crate::model::{Order, OrderCreate, OrderId, OrderStatus, ProductId, SelectedProduct};
use crate::product_actor::ProductError;
use async_trait::async_trait;
use gazon_actor::{ActorClient, ActorEntity};
use tracing::{info, warn};

impl Order {
    fn transition(&mut self, to: OrderStatus) -> Result<OrderStatus, OrderError> {
        if !self.status.can_become(to) {
            return Err(OrderError::InvalidTransition {
                from: self.status,
                to,
            });
        }
        self.status = to;
        Ok(to)
    }

    /// Returns every line not yet returned. Progress is kept on the lines, so
    /// after a failure the order stays unpaid and the next call resumes where
    /// this one stopped.
    async fn expire(&mut self, products: &ProductClient) -> Result<Expiry, OrderError> {
        let mut restocked: u64 = 0;
        let mut skipped = Vec::new();
        let mut failure = None;

        for item in self.items.iter_mut().filter(|item| !item.returned) {
            match products.restock(item.product_id, item.quantity).await {
                Ok(_) => restocked += u64::from(item.quantity),
                Err(ProductError::NotFound(_)) => {
                    warn!(order_id = %self.id, product_id = %item.product_id, "Product missing, restock skipped");
                    skipped.push(item.product_id);
                }
                Err(e) => {
                    failure = Some(e);
                    break;
                }
            }
            item.returned = true;
        }

        if let Some(e) = failure {
            let pending: Vec<ProductId> = self
                .items
                .iter()
                .filter(|item| !item.returned)
                .map(|item| item.product_id)
                .collect();
            warn!(order_id = %self.id, restocked, pending = pending.len(), error = %e, "Restock interrupted");
            return Err(OrderError::RestockFailed {
                order: self.id,
                reason: e.to_string(),
                restocked,
                pending,
            });
        }

        self.status = OrderStatus::Overdue;
        info!(order_id = %self.id, restocked, skipped = skipped.len(), "Order expired");
        Ok(Expiry::Expired { restocked, skipped })
    }
}

/// Returns reserved units after a failed checkout.
async fn release(products: &ProductClient, items: &[&SelectedProduct]) {
    for item in items {
        if let Err(e) = products.restock(item.product_id, item.quantity).await {
            warn!(product_id = %item.product_id, error = %e, "Could not release reservation");
        }
    }
}

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = ();
    type Action = OrderAction;
    type ActionResult = OrderActionResult;
    type Context = (UserClient, ProductClient);
    type Tag = OrderStatus;
    type Error = OrderError;

    /// Creates a new, unpaid Order from checkout parameters.
    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, Self::Error> {
        if let Some(item) = params.items.iter().find(|item| item.quantity == 0) {
            return Err(OrderError::ValidationError(format!(
                "quantity for {} must be positive",
                item.product_id
            )));
        }
        Ok(Self::new(id, params.user_id, params.items, params.created_at))
    }

    fn tag(&self) -> OrderStatus {
        self.status
    }

    /// Checkout: validates the customer, then reserves every line item.
    ///
    /// If a reservation fails, the ones already made are released and the order is
    /// not stored.
    async fn on_create(&mut self, ctx: &Self::Context) -> Result<(), Self::Error> {
        let (users, products) = ctx;

        match users.get(self.user_id).await? {
            Some(user) if user.active => {}
            Some(_) => {
                return Err(OrderError::InvalidUser(format!(
                    "{} is deactivated",
                    self.user_id
                )))
            }
            None => {
                return Err(OrderError::InvalidUser(format!(
                    "{} does not exist",
                    self.user_id
                )))
            }
        }

        let mut reserved: Vec<&SelectedProduct> = Vec::new();
        for item in &self.items {
            if let Err(e) = products.reserve_stock(item.product_id, item.quantity).await {
                warn!(order_id = %self.id, product_id = %item.product_id, error = %e, "Reservation failed");
                release(products, &reserved).await;
                return Err(e.into());
            }
            reserved.push(item);
        }
        Ok(())
    }

    /// Orders are changed through actions only.
    async fn on_update(&mut self, _update: (), _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// An unpaid order still holds stock, so it cannot be removed.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        if self.status == OrderStatus::NotPaid {
            return Err(OrderError::StillReserved(self.id));
        }
        Ok(())
    }

    /// Handles custom actions for the Order entity.
    ///
    /// # Actions
    /// - `Pay`, `StartProgress`, `Deliver`: status transitions
    /// - `ExpireIfUnpaid`: re-checks the deadline, returns stock and marks the
    ///   order overdue. Each line is returned at most once; after a failed
    ///   restock the order stays unpaid and cannot be paid, and the next call
    ///   returns only the remaining lines.
    async fn handle_action(
        &mut self,
        action: OrderAction,
        ctx: &Self::Context,
    ) -> Result<OrderActionResult, Self::Error> {
        match action {
            OrderAction::Pay if self.expiry_started() => Err(OrderError::Expiring(self.id)),
            OrderAction::Pay => self.transition(OrderStatus::Paid).map(OrderActionResult::Pay),
            OrderAction::StartProgress => self
                .transition(OrderStatus::InProgress)
                .map(OrderActionResult::StartProgress),
            OrderAction::Deliver => self
                .transition(OrderStatus::Delivered)
                .map(OrderActionResult::Deliver),
            OrderAction::ExpireIfUnpaid { now, grace } => {
                if !self.is_payment_overdue(now, grace) {
                    return Ok(OrderActionResult::ExpireIfUnpaid(Expiry::NotDue));
                }
                let (_, products) = ctx;
                self.expire(products)
                    .await
                    .map(OrderActionResult::ExpireIfUnpaid)
            }
        }
    }
}
