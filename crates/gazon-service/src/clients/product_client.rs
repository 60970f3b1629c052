//! # Product Client
//!
//! Provides a high‑level API for interacting with the `Product` actor.
//! It wraps a `ResourceClient<Product>` and exposes domain‑specific methods.
use crate::model::{Product, ProductCreate, ProductId, ProductStatus, ProductUpdate};
use crate::product_actor::{ProductAction, ProductActionResult, ProductError};
use async_trait::async_trait;
use gazon_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }
}

impl From<ResourceClient<Product>> for ProductClient {
    fn from(inner: ResourceClient<Product>) -> Self {
        Self::new(inner)
    }
}

#[async_trait]
impl ActorClient<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &ResourceClient<Product> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        ProductError::from_framework(e)
    }
}

fn unexpected(result: ProductActionResult) -> ProductError {
    ProductError::ActorCommunicationError(format!("unexpected action result: {result:?}"))
}

impl ProductClient {
    #[instrument(skip(self))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<ProductId, ProductError> {
        debug!("Sending request");
        self.inner
            .create(params)
            .await
            .map_err(ProductError::from_framework)
    }

    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner
            .update(id, update)
            .await
            .map_err(ProductError::from_framework)
    }

    /// Soft delete: the product stays in the store with status `Deleted`.
    #[instrument(skip(self))]
    pub async fn deactivate(&self, id: ProductId) -> Result<Product, ProductError> {
        let update = ProductUpdate {
            status: Some(ProductStatus::Deleted),
            ..Default::default()
        };
        self.update_product(id, update).await
    }

    /// Check the current stock level for a product.
    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: ProductId) -> Result<u32, ProductError> {
        debug!("Checking stock");
        match self
            .inner
            .perform_action(id, ProductAction::CheckStock)
            .await
            .map_err(ProductError::from_framework)?
        {
            ProductActionResult::CheckStock(level) => Ok(level),
            other => Err(unexpected(other)),
        }
    }

    /// Reserve `quantity` units. Returns the stock left.
    #[instrument(skip(self))]
    pub async fn reserve_stock(&self, id: ProductId, quantity: u32) -> Result<u32, ProductError> {
        debug!("Reserving stock");
        match self
            .inner
            .perform_action(id, ProductAction::ReserveStock(quantity))
            .await
            .map_err(ProductError::from_framework)?
        {
            ProductActionResult::ReserveStock(left) => Ok(left),
            other => Err(unexpected(other)),
        }
    }

    /// Return `quantity` units to stock. Returns the new stock level.
    #[instrument(skip(self))]
    pub async fn restock(&self, id: ProductId, quantity: u32) -> Result<u32, ProductError> {
        debug!("Restocking");
        match self
            .inner
            .perform_action(id, ProductAction::Restock(quantity))
            .await
            .map_err(ProductError::from_framework)?
        {
            ProductActionResult::Restock(stock) => Ok(stock),
            other => Err(unexpected(other)),
        }
    }

    /// Products whose name contains `text`, ignoring case, in id order. Any status.
    #[instrument(skip(self))]
    pub async fn find_by_name_containing(&self, text: &str) -> Result<Vec<Product>, ProductError> {
        let needle = text.to_lowercase();
        self.inner
            .filter(move |product: &Product| product.name.to_lowercase().contains(&needle))
            .await
            .map_err(ProductError::from_framework)
    }

    /// The active catalog, in id order.
    #[instrument(skip(self))]
    pub async fn find_active(&self) -> Result<Vec<Product>, ProductError> {
        self.find_by_tag(ProductStatus::Active).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gazon_actor::mock::{create_mock_client, expect_action, MockClient};

    #[tokio::test]
    async fn test_check_stock_returns_correct_level() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let product_client = ProductClient::new(client);

        let check_task = tokio::spawn(async move { product_client.check_stock(ProductId(1)).await });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");

        assert_eq!(id, ProductId(1));
        assert!(matches!(action, ProductAction::CheckStock));

        responder
            .send(Ok(ProductActionResult::CheckStock(42)))
            .unwrap();

        let result = check_task.await.unwrap();
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_reserve_stock_insufficient_stock() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let product_client = ProductClient::new(client);

        let reserve_task =
            tokio::spawn(async move { product_client.reserve_stock(ProductId(1), 100).await });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");

        assert_eq!(id, ProductId(1));
        match action {
            ProductAction::ReserveStock(amount) => assert_eq!(amount, 100),
            _ => panic!("Expected ReserveStock action"),
        }

        // The actor boxes the entity's own error; the client must recover it.
        responder
            .send(Err(FrameworkError::EntityError(Box::new(
                ProductError::InsufficientStock {
                    requested: 100,
                    available: 7,
                },
            ))))
            .unwrap();

        let result = reserve_task.await.unwrap();
        assert_eq!(
            result,
            Err(ProductError::InsufficientStock {
                requested: 100,
                available: 7
            })
        );
    }

    #[tokio::test]
    async fn test_restock_distinguishes_missing_from_unreachable() {
        let mut mock = MockClient::<Product>::new();
        mock.expect_action(ProductId(5))
            .return_ok(ProductActionResult::Restock(12));
        mock.expect_action(ProductId(6))
            .return_err(FrameworkError::NotFound("product_6".into()));
        mock.expect_action(ProductId(7))
            .return_err(FrameworkError::ActorClosed);

        let client = ProductClient::new(mock.client());
        assert_eq!(client.restock(ProductId(5), 2).await, Ok(12));
        assert_eq!(
            client.restock(ProductId(6), 2).await,
            Err(ProductError::NotFound("product_6".into()))
        );
        assert!(matches!(
            client.restock(ProductId(7), 2).await,
            Err(ProductError::ActorCommunicationError(_))
        ));

        mock.verify();
    }

    #[tokio::test]
    async fn test_mismatched_result_is_an_error() {
        let mut mock = MockClient::<Product>::new();
        mock.expect_action(ProductId(1))
            .return_ok(ProductActionResult::CheckStock(3));

        let client = ProductClient::new(mock.client());
        assert!(matches!(
            client.restock(ProductId(1), 1).await,
            Err(ProductError::ActorCommunicationError(_))
        ));
    }
}
