//! # Store Actor
//!
//! `ResourceActor` owns the entities of one resource type and applies every request
//! to them sequentially. It is the only writer of its store, so a request is atomic
//! with respect to every other request on the same store without any locking.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages a collection of entities.
///
/// The actor owns the state (`store` and `by_tag`) and the receiving end of the
/// channel. Entities are kept in id order, and each id is also filed under the
/// entity's current [`tag`](ActorEntity::tag) so tag lookups are direct.
///
/// # Usage Pattern
///
/// 1. **Create**: `ResourceActor::new()` returns the actor and its client.
/// 2. **Wire**: pass dependencies (other clients) into `actor.run(context)`.
/// 3. **Run**: spawn the run loop in a background task.
///
/// ```rust,ignore
/// let (actor, client) = ResourceActor::<Product>::new(32);
/// tokio::spawn(actor.run(()));
/// let id = client.create(params).await?;
/// ```
///
/// # Operations
///
/// * **Create**: assigns the next id, builds the entity, runs `on_create`, stores and indexes it.
/// * **Get**: returns a clone of the entity, or `None`.
/// * **Update** / **Action**: runs the hook on the stored entity, then re-files it under its new tag.
/// * **Delete**: runs `on_delete`, then removes the entity and its index entry.
/// * **FindByTag**: reads the ids filed under the tag.
/// * **Filter**: evaluates a predicate against every entity.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: BTreeMap<T::Id, T>,
    by_tag: HashMap<T::Tag, BTreeSet<T::Id>>,
    next_id: u32,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the capacity of the request channel; callers wait for space
    /// once it is full.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: BTreeMap::new(),
            by_tag: HashMap::new(),
            next_id: 1,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs the actor's event loop, processing messages until every client is dropped.
    ///
    /// The `context` is handed to every entity hook.
    pub async fn run(mut self, context: T::Context) {
        // Extract just the type name (e.g., "Order" instead of "gazon_service::model::order::Order")
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let Some(following) = self.next_id.checked_add(1) else {
                        warn!(entity_type, next_id = self.next_id, "Id space exhausted");
                        let _ = respond_to.send(Err(FrameworkError::IdsExhausted));
                        continue;
                    };
                    let id = T::Id::from(self.next_id);
                    self.next_id = following;

                    match T::from_create_params(id.clone(), params) {
                        Ok(mut item) => {
                            if let Err(e) = item.on_create(&context).await {
                                warn!(entity_type, error = %e, "on_create failed");
                                let _ =
                                    respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                                continue;
                            }
                            file_under(&mut self.by_tag, item.tag(), &id);
                            self.store.insert(id.clone(), item);
                            info!(entity_type, %id, size = self.store.len(), "Created");
                            let _ = respond_to.send(Ok(id));
                        }
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        }
                    }
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let Some(item) = self.store.get_mut(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    let before = item.tag();
                    let result = item.on_update(update, &context).await;
                    retag(&mut self.by_tag, &id, before, item.tag());
                    match result {
                        Ok(()) => {
                            info!(entity_type, %id, "Updated");
                            let _ = respond_to.send(Ok(item.clone()));
                        }
                        Err(e) => {
                            warn!(entity_type, %id, error = %e, "Update failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        }
                    }
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let Some(item) = self.store.get(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    if let Err(e) = item.on_delete(&context).await {
                        warn!(entity_type, %id, error = %e, "on_delete failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    if let Some(item) = self.store.remove(&id) {
                        unfile(&mut self.by_tag, &item.tag(), &id);
                    }
                    info!(entity_type, %id, size = self.store.len(), "Deleted");
                    let _ = respond_to.send(Ok(()));
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let Some(item) = self.store.get_mut(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    let before = item.tag();
                    let result = item
                        .handle_action(action, &context)
                        .await
                        .map_err(|e| FrameworkError::EntityError(Box::new(e)));
                    retag(&mut self.by_tag, &id, before, item.tag());
                    match &result {
                        Ok(_) => info!(entity_type, %id, "Action ok"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::FindByTag { tag, respond_to } => {
                    let items: Vec<T> = self
                        .by_tag
                        .get(&tag)
                        .map(|ids| {
                            ids.iter()
                                .filter_map(|id| self.store.get(id).cloned())
                                .collect()
                        })
                        .unwrap_or_default();
                    debug!(entity_type, ?tag, found = items.len(), "FindByTag");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Filter {
                    predicate,
                    respond_to,
                } => {
                    let items: Vec<T> = self
                        .store
                        .values()
                        .filter(|item| predicate.matches(item))
                        .cloned()
                        .collect();
                    debug!(
                        entity_type,
                        scanned = self.store.len(),
                        found = items.len(),
                        "Filter"
                    );
                    let _ = respond_to.send(Ok(items));
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}

fn file_under<Tag, Id>(index: &mut HashMap<Tag, BTreeSet<Id>>, tag: Tag, id: &Id)
where
    Tag: Eq + std::hash::Hash,
    Id: Ord + Clone,
{
    index.entry(tag).or_default().insert(id.clone());
}

fn unfile<Tag, Id>(index: &mut HashMap<Tag, BTreeSet<Id>>, tag: &Tag, id: &Id)
where
    Tag: Eq + std::hash::Hash,
    Id: Ord,
{
    if let Some(ids) = index.get_mut(tag) {
        ids.remove(id);
        if ids.is_empty() {
            index.remove(tag);
        }
    }
}

fn retag<Tag, Id>(index: &mut HashMap<Tag, BTreeSet<Id>>, id: &Id, before: Tag, after: Tag)
where
    Tag: Eq + std::hash::Hash,
    Id: Ord + Clone,
{
    if before != after {
        unfile(index, &before, id);
        file_under(index, after, id);
    }
}
