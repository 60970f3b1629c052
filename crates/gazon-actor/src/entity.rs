//! # ActorEntity Trait
//!
//! The `ActorEntity` trait is the contract every stored resource (User, Product, Order)
//! implements to be managed by the generic [`ResourceActor`](crate::ResourceActor).
//! It names the DTOs used to create and update the resource, its domain actions,
//! the dependencies injected at run time, and the secondary index key (`Tag`) the
//! store keeps current for direct lookups.
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::on_create`]
//! - [`ActorEntity::on_delete`]
//!
//! Both default to `Ok(())`.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any resource entity must implement to be managed by `ResourceActor`.
///
/// # Async & Context
/// Hooks are async so they can call other actors. The `Context` is injected into
/// every hook, which lets dependencies (other clients) be bound when the actor is
/// started instead of when it is constructed.
///
/// # Tags
/// `tag()` is the value the store indexes the entity under, e.g. the status of an
/// order. The store recomputes it after every mutation, so a lookup by tag never
/// has to scan the whole store.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this entity.
    /// Must be convertible from u32 for automatic ID generation, and ordered so
    /// query results come back in creation order.
    type Id: Eq + Ord + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Enum representing resource-specific operations (e.g., `ReserveStock`).
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// Secondary index key. Use `()` when the entity needs no index.
    type Tag: Eq + Hash + Clone + Send + Sync + Debug;

    /// The error type for this entity.
    ///
    /// One error enum per actor rather than one per message: callers match on a
    /// single `OrderError`, at the cost of some variants being unreachable from
    /// some actions.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the full Entity from the ID and Payload.
    /// This is called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// The key this entity is indexed under in its current state.
    fn tag(&self) -> Self::Tag;

    // --- Lifecycle Hooks (Async) ---

    /// Called after the entity is built and before it is stored.
    /// An error here discards the entity.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the entity is removed from the store.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handle a custom resource-specific action.
    ///
    /// Mutations made before an error is returned are kept.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
