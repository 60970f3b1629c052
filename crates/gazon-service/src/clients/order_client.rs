//! # Order Client
//!
//! Provides a high‑level API for interacting with the `Order` actor.
//! Checkout orchestration (user validation, stock reservation) happens in the
//! Order actor's `on_create` hook; this client only shapes requests and replies.
use crate::model::{Order, OrderCreate, OrderId, OrderStatus, SelectedProduct, UserId};
use crate::order_actor::{Expiry, OrderAction, OrderActionResult, OrderError};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use gazon_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, info, instrument};

/// Client for interacting with the Order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }
}

impl From<ResourceClient<Order>> for OrderClient {
    fn from(inner: ResourceClient<Order>) -> Self {
        Self::new(inner)
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        OrderError::from_framework(e)
    }
}

fn unexpected(result: OrderActionResult) -> OrderError {
    OrderError::ActorCommunicationError(format!("unexpected action result: {result:?}"))
}

impl OrderClient {
    /// Places an order with an explicit checkout time.
    #[instrument(skip(self))]
    pub async fn create_order(&self, params: OrderCreate) -> Result<OrderId, OrderError> {
        info!("Sending create_order to actor");
        self.inner
            .create(params)
            .await
            .map_err(OrderError::from_framework)
    }

    /// Places an order checked out now.
    pub async fn checkout(
        &self,
        user_id: UserId,
        items: Vec<SelectedProduct>,
    ) -> Result<OrderId, OrderError> {
        self.create_order(OrderCreate {
            user_id,
            items,
            created_at: Utc::now(),
        })
        .await
    }

    async fn step(&self, id: OrderId, action: OrderAction) -> Result<OrderStatus, OrderError> {
        match self
            .inner
            .perform_action(id, action)
            .await
            .map_err(OrderError::from_framework)?
        {
            OrderActionResult::Pay(status)
            | OrderActionResult::StartProgress(status)
            | OrderActionResult::Deliver(status) => Ok(status),
            other => Err(unexpected(other)),
        }
    }

    /// Confirms payment.
    #[instrument(skip(self))]
    pub async fn pay(&self, id: OrderId) -> Result<OrderStatus, OrderError> {
        debug!("Sending request");
        self.step(id, OrderAction::Pay).await
    }

    #[instrument(skip(self))]
    pub async fn start_progress(&self, id: OrderId) -> Result<OrderStatus, OrderError> {
        debug!("Sending request");
        self.step(id, OrderAction::StartProgress).await
    }

    #[instrument(skip(self))]
    pub async fn deliver(&self, id: OrderId) -> Result<OrderStatus, OrderError> {
        debug!("Sending request");
        self.step(id, OrderAction::Deliver).await
    }

    /// Marks the order overdue and returns its stock, if it is still unpaid and
    /// more than `grace` old at `now`.
    #[instrument(skip(self))]
    pub async fn expire_if_unpaid(
        &self,
        id: OrderId,
        now: DateTime<Utc>,
        grace: Duration,
    ) -> Result<Expiry, OrderError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(id, OrderAction::ExpireIfUnpaid { now, grace })
            .await
            .map_err(OrderError::from_framework)?
        {
            OrderActionResult::ExpireIfUnpaid(expiry) => Ok(expiry),
            other => Err(unexpected(other)),
        }
    }

    /// Every order still awaiting payment, in id order.
    #[instrument(skip(self))]
    pub async fn find_not_paid(&self) -> Result<Vec<Order>, OrderError> {
        self.find_by_tag(OrderStatus::NotPaid).await
    }

    #[instrument(skip(self))]
    pub async fn orders_for_user(&self, user_id: UserId) -> Result<Vec<Order>, OrderError> {
        self.inner
            .filter(move |order: &Order| order.user_id == user_id)
            .await
            .map_err(OrderError::from_framework)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gazon_actor::mock::{create_mock_client, expect_action, expect_find_by_tag};

    #[tokio::test]
    async fn test_find_not_paid_queries_the_status_index() {
        let (client, mut receiver) = create_mock_client::<Order>(10);
        let order_client = OrderClient::new(client);

        let task = tokio::spawn(async move { order_client.find_not_paid().await });

        let (tag, responder) = expect_find_by_tag(&mut receiver)
            .await
            .expect("Expected FindByTag request");
        assert_eq!(tag, OrderStatus::NotPaid);
        responder
            .send(Ok(vec![Order::new(OrderId(1), UserId(1), vec![], Utc::now())]))
            .unwrap();

        let orders = task.await.unwrap().unwrap();
        assert_eq!(orders.len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_transition_survives_the_round_trip() {
        let (client, mut receiver) = create_mock_client::<Order>(10);
        let order_client = OrderClient::new(client);

        let task = tokio::spawn(async move { order_client.pay(OrderId(3)).await });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, OrderId(3));
        assert!(matches!(action, OrderAction::Pay));
        responder
            .send(Err(FrameworkError::EntityError(Box::new(
                OrderError::InvalidTransition {
                    from: OrderStatus::Overdue,
                    to: OrderStatus::Paid,
                },
            ))))
            .unwrap();

        assert_eq!(
            task.await.unwrap(),
            Err(OrderError::InvalidTransition {
                from: OrderStatus::Overdue,
                to: OrderStatus::Paid
            })
        );
    }
}
