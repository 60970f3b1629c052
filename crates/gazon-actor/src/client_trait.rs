//! # ActorClient Trait
//!
//! Shared surface for resource-specific clients: default `get`, `delete` and
//! `find_by_tag` built on the wrapped [`ResourceClient`], with framework errors
//! translated into the resource's own error type.
use crate::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit the standard store operations.
///
/// ```rust,ignore
/// #[derive(Clone)]
/// pub struct ProductClient {
///     inner: ResourceClient<Product>,
/// }
///
/// #[async_trait]
/// impl ActorClient<Product> for ProductClient {
///     type Error = ProductError;
///
///     fn inner(&self) -> &ResourceClient<Product> {
///         &self.inner
///     }
///
///     fn map_error(e: FrameworkError) -> Self::Error {
///         ProductError::from_framework(e)
///     }
/// }
///
/// // get(), delete() and find_by_tag() are now available on ProductClient.
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the specific resource error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Delete an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }

    /// Fetch every entity filed under `tag`.
    #[tracing::instrument(skip(self))]
    async fn find_by_tag(&self, tag: T::Tag) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().find_by_tag(tag).await.map_err(Self::map_error)
    }
}
