/// Represents a product in the catalog.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](gazon_actor::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](gazon_actor::ResourceActor).
///
/// See [`impl ActorEntity for Product`](#impl-ActorEntity-for-Product) for details on:
/// - Creation parameters ([`ProductCreate`](crate::model::ProductCreate))
/// - Update parameters ([`ProductUpdate`](crate::model::ProductUpdate))
/// - Custom actions ([`ProductAction`](crate::product_actor::actions::ProductAction))
use serde::{Deserialize, Serialize};

use std::fmt::Display;

/// Type-safe identifier for Products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProductId(pub u32);

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "product_{}", self.0)
    }
}

/// Catalog visibility. Products are never removed, only marked `Deleted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductStatus {
    Active,
    Inactive,
    Deleted,
}

impl Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ProductStatus::Active => "ACTIVE",
            ProductStatus::Inactive => "INACTIVE",
            ProductStatus::Deleted => "DELETED",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub stock: u32,
    pub status: ProductStatus,
}

impl Product {
    /// Creates a new, active Product.
    ///
    /// # Arguments
    /// * `id` - Unique identifier (typically set by the actor system)
    /// * `name` - Product name
    /// * `price` - Unit price
    /// * `stock` - Units available for sale
    pub fn new(id: ProductId, name: impl Into<String>, price: f64, stock: u32) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            stock,
            status: ProductStatus::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == ProductStatus::Active
    }
}

/// Payload for creating a new product.
#[derive(Debug, Clone)]
pub struct ProductCreate {
    pub name: String,
    pub price: f64,
    pub stock: u32,
}

/// Payload for updating an existing product. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<u32>,
    pub status: Option<ProductStatus>,
}

/// What search hands back to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductView {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub stock: u32,
}

impl From<Product> for ProductView {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
            stock: product.stock,
        }
    }
}
