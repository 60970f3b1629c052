//! Entity trait implementation for the Product domain type.
//!
//! Products are indexed by [`ProductStatus`], so the active catalog is a direct
//! lookup. Stock is only changed through [`ProductAction`]s.

use super::actions::{ProductAction, ProductActionResult};
use super::error::ProductError;
use crate::model::{Product, ProductCreate, ProductId, ProductStatus, ProductUpdate};
use async_trait::async_trait;
use gazon_actor::ActorEntity;

fn validate(name: &str, price: f64) -> Result<(), ProductError> {
    if name.trim().is_empty() {
        return Err(ProductError::ValidationError("name must not be empty".into()));
    }
    if !price.is_finite() || price < 0.0 {
        return Err(ProductError::ValidationError(format!("invalid price: {price}")));
    }
    Ok(())
}

#[async_trait]
impl ActorEntity for Product {
    type Id = ProductId;
    type Create = ProductCreate;
    type Update = ProductUpdate;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;
    type Context = ();
    type Tag = ProductStatus;
    type Error = ProductError;

    /// Creates a new, active Product from creation parameters.
    fn from_create_params(id: ProductId, params: ProductCreate) -> Result<Self, Self::Error> {
        validate(&params.name, params.price)?;
        Ok(Self::new(id, params.name, params.price, params.stock))
    }

    fn tag(&self) -> ProductStatus {
        self.status
    }

    /// Handles updates to the Product entity.
    ///
    /// # Fields Updated
    /// - `name`, `price`: validated before anything is written
    /// - `stock`: overwrites the stock level
    /// - `status`: catalog visibility (soft delete)
    async fn on_update(&mut self, update: ProductUpdate, _ctx: &()) -> Result<(), Self::Error> {
        let name = update.name.unwrap_or_else(|| self.name.clone());
        let price = update.price.unwrap_or(self.price);
        validate(&name, price)?;

        self.name = name;
        self.price = price;
        if let Some(stock) = update.stock {
            self.stock = stock;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        Ok(())
    }

    /// Handles custom actions for the Product entity.
    ///
    /// # Actions
    /// - `CheckStock`: returns the stock level
    /// - `ReserveStock`: decrements stock if the product is active and has enough
    /// - `Restock`: increments stock by exactly the quantity, or fails if that
    ///   would overflow
    async fn handle_action(
        &mut self,
        action: ProductAction,
        _ctx: &(),
    ) -> Result<ProductActionResult, Self::Error> {
        match action {
            ProductAction::CheckStock => Ok(ProductActionResult::CheckStock(self.stock)),
            ProductAction::ReserveStock(0) => Err(ProductError::InvalidQuantity(0)),
            ProductAction::ReserveStock(quantity) => {
                if !self.is_active() {
                    return Err(ProductError::Unavailable(self.status));
                }
                if quantity > self.stock {
                    return Err(ProductError::InsufficientStock {
                        requested: quantity,
                        available: self.stock,
                    });
                }
                self.stock -= quantity;
                Ok(ProductActionResult::ReserveStock(self.stock))
            }
            ProductAction::Restock(quantity) => {
                self.stock = self
                    .stock
                    .checked_add(quantity)
                    .ok_or(ProductError::StockOverflow {
                        stock: self.stock,
                        quantity,
                    })?;
                Ok(ProductActionResult::Restock(self.stock))
            }
        }
    }
}
