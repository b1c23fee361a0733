//! # Generic Actor Server
//!
//! `ResourceActor` owns the store for one resource type and serves requests one at a
//! time, which is what keeps stock levels and cart contents consistent without locks.

use crate::framework::client::ResourceClient;
use crate::framework::entity::ActorEntity;
use crate::framework::error::FrameworkError;
use crate::framework::message::ResourceRequest;
use std::collections::BTreeMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages a collection of entities.
///
/// The actor is the only owner of its `store`. Requests arrive over a bounded mpsc
/// channel and are handled strictly in arrival order, including any awaits inside the
/// entity hooks. While the order actor is busy checking out one cart, the next checkout
/// waits in the channel.
///
/// # Usage Pattern
///
/// 1. **Create**: `ResourceActor::new()` returns the actor and its client.
/// 2. **Wire**: pass dependencies (other clients) to `actor.run(context)`.
/// 3. **Run**: spawn the run loop on the tokio runtime.
///
/// ```rust
/// use storefront::framework::{ActorEntity, ResourceActor};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Tally { id: u32, count: u32 }
/// #[derive(Debug)] struct TallyCreate;
/// #[derive(Debug)] enum TallyAction { Bump }
/// #[derive(Debug, thiserror::Error)] #[error("tally error")] struct TallyError;
///
/// #[async_trait]
/// impl ActorEntity for Tally {
///     type Id = u32;
///     type Create = TallyCreate;
///     type Update = ();
///     type Action = TallyAction;
///     type ActionResult = u32;
///     type Context = ();
///     type Error = TallyError;
///
///     fn from_create_params(id: u32, _: TallyCreate) -> Result<Self, Self::Error> {
///         Ok(Self { id, count: 0 })
///     }
///     async fn on_update(&mut self, _: (), _: &()) -> Result<(), Self::Error> { Ok(()) }
///     async fn handle_action(&mut self, _: TallyAction, _: &()) -> Result<u32, Self::Error> {
///         self.count += 1;
///         Ok(self.count)
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = ResourceActor::<Tally>::new(10);
///     tokio::spawn(actor.run(()));
///
///     let id = client.create(TallyCreate).await.unwrap();
///     assert_eq!(client.perform_action(id, TallyAction::Bump).await.unwrap(), 1);
/// }
/// ```
///
/// # Id assignment
///
/// Ids come from a `u32` counter starting at 1. The counter only advances when a create
/// succeeds, so the ids of stored entities are gap-free and strictly increasing in
/// creation order.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: BTreeMap<T::Id, T>,
    next_id: u32,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the capacity of the request channel, at least 1. When it is
    /// full, client calls wait for room.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size.max(1));
        let actor = Self {
            receiver,
            store: BTreeMap::new(),
            next_id: 1,
        };
        (actor, ResourceClient::new(sender))
    }

    /// Runs the event loop until every client has been dropped.
    ///
    /// `context` is handed to every entity hook.
    pub async fn run(mut self, context: T::Context) {
        // "Order" rather than "storefront::model::order::Order"
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = T::Id::from(self.next_id);

                    let mut item = match T::from_create_params(id.clone(), params) {
                        Ok(item) => item,
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                    };
                    if let Err(e) = item.on_create(&context).await {
                        warn!(entity_type, error = %e, "on_create failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }

                    self.next_id += 1;
                    self.store.insert(id.clone(), item);
                    info!(entity_type, %id, size = self.store.len(), "Created");
                    let _ = respond_to.send(Ok(id));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    debug!(entity_type, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { respond_to } => {
                    debug!(entity_type, size = self.store.len(), "List");
                    let _ = respond_to.send(Ok(self.store.values().cloned().collect()));
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
                    // Hooks mutate in place, so validate against a scratch copy and
                    // only commit when the hook accepts the update.
                    let mut updated = item.clone();
                    match updated.on_update(update, &context).await {
                        Ok(()) => {
                            *item = updated.clone();
                            info!(entity_type, %id, "Updated");
                            let _ = respond_to.send(Ok(updated));
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
                    self.store.remove(&id);
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
                    let result = item
                        .handle_action(action, &context)
                        .await
                        .map_err(|e| FrameworkError::EntityError(Box::new(e)));
                    match &result {
                        Ok(_) => info!(entity_type, %id, "Action ok"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                    }
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Counter {
        id: u32,
        label: String,
        hits: u32,
    }

    #[derive(Debug)]
    struct CounterCreate {
        label: String,
    }

    #[derive(Debug)]
    struct CounterUpdate {
        label: String,
    }

    #[derive(Debug)]
    enum CounterAction {
        Hit,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("counter rejected: {0}")]
    struct CounterError(String);

    #[async_trait]
    impl ActorEntity for Counter {
        type Id = u32;
        type Create = CounterCreate;
        type Update = CounterUpdate;
        type Action = CounterAction;
        type ActionResult = u32;
        type Context = ();
        type Error = CounterError;

        fn from_create_params(id: u32, params: CounterCreate) -> Result<Self, Self::Error> {
            Ok(Self {
                id,
                label: params.label,
                hits: 0,
            })
        }

        async fn on_create(&mut self, _ctx: &()) -> Result<(), Self::Error> {
            if self.label.is_empty() {
                return Err(CounterError("empty label".into()));
            }
            Ok(())
        }

        async fn on_update(&mut self, update: CounterUpdate, _ctx: &()) -> Result<(), Self::Error> {
            self.label = update.label;
            if self.label.is_empty() {
                return Err(CounterError("empty label".into()));
            }
            Ok(())
        }

        async fn handle_action(&mut self, action: CounterAction, _ctx: &()) -> Result<u32, Self::Error> {
            match action {
                CounterAction::Hit => {
                    self.hits += 1;
                    Ok(self.hits)
                }
            }
        }
    }

    fn spawn_counter_actor() -> ResourceClient<Counter> {
        let (actor, client) = ResourceActor::<Counter>::new(10);
        tokio::spawn(actor.run(()));
        client
    }

    fn create(label: &str) -> CounterCreate {
        CounterCreate {
            label: label.to_string(),
        }
    }

    #[tokio::test]
    async fn test_resource_actor_crud_and_actions() {
        let client = spawn_counter_actor();

        let id = client.create(create("visits")).await.unwrap();
        assert_eq!(id, 1);

        assert_eq!(client.perform_action(id, CounterAction::Hit).await.unwrap(), 1);
        assert_eq!(client.perform_action(id, CounterAction::Hit).await.unwrap(), 2);

        let updated = client
            .update(id, CounterUpdate { label: "views".into() })
            .await
            .unwrap();
        assert_eq!(updated.label, "views");
        assert_eq!(updated.hits, 2);

        client.delete(id).await.unwrap();
        assert!(client.get(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_rejected_create_does_not_consume_an_id() {
        let client = spawn_counter_actor();

        assert_eq!(client.create(create("first")).await.unwrap(), 1);
        let rejected = client.create(create("")).await;
        assert!(matches!(rejected, Err(FrameworkError::EntityError(_))));
        assert_eq!(client.create(create("second")).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_rejected_update_leaves_entity_untouched() {
        let client = spawn_counter_actor();
        let id = client.create(create("visits")).await.unwrap();

        let result = client.update(id, CounterUpdate { label: String::new() }).await;
        assert!(result.is_err());

        let stored = client.get(id).await.unwrap().unwrap();
        assert_eq!(stored.label, "visits");
    }

    #[tokio::test]
    async fn test_list_returns_entities_in_creation_order() {
        let client = spawn_counter_actor();
        for label in ["a", "b", "c"] {
            client.create(create(label)).await.unwrap();
        }

        let labels: Vec<String> = client
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.label)
            .collect();
        assert_eq!(labels, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_zero_buffer_size_still_serves_requests() {
        let (actor, client) = ResourceActor::<Counter>::new(0);
        tokio::spawn(actor.run(()));

        let id = client.create(create("visits")).await.unwrap();
        assert_eq!(client.perform_action(id, CounterAction::Hit).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_missing_entity_reports_not_found() {
        let client = spawn_counter_actor();

        let result = client.perform_action(42, CounterAction::Hit).await;
        assert!(matches!(result, Err(FrameworkError::NotFound(id)) if id == "42"));
    }
}
