use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::{Debug, Display};
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument, warn};

use crate::storage::{StoreAdapter, StoreError, StoreKey};

// =============================================================================
// 1. THE ABSTRACTION (Traits with Hooks, Payloads, and Actions)
// =============================================================================

/// Trait that any persisted collection member must implement to be managed by
/// a [`ResourceActor`].
///
/// The whole collection is stored as one JSON array under [`Entity::STORE_KEY`],
/// in insertion order.
pub trait Entity: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    type Id: Eq + Clone + Send + Sync + Display + Debug;
    type CreatePayload: Send + Sync + Debug;
    type Patch: Send + Sync + Debug;

    // --- Custom Actions ---
    type Action: Send + Sync + Debug;
    type ActionResult: Send + Sync + Debug;

    /// Record holding the collection.
    const STORE_KEY: StoreKey;

    /// Get the ID of the entity
    fn id(&self) -> &Self::Id;

    /// Construct the full Entity from the ID and Payload
    fn from_create(id: Self::Id, payload: Self::CreatePayload) -> Result<Self, String>;

    // --- Lifecycle Hooks ---

    fn on_create(&mut self) -> Result<(), String> {
        Ok(())
    }
    fn on_update(&mut self, patch: Self::Patch) -> Result<(), String>;
    fn on_delete(&self) -> Result<(), String> {
        Ok(())
    }

    // --- Action Handler ---

    /// Handle a custom domain-specific action
    fn handle_action(&mut self, action: Self::Action) -> Result<Self::ActionResult, String>;
}

/// Patch or action type for collections that do not support the operation.
#[derive(Debug)]
pub enum Unsupported {}

/// Failures of the generic actor layer. Component clients convert these into
/// their own error types.
#[derive(Debug, Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped the response")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Rejected: {0}")]
    Rejected(String),
    #[error(transparent)]
    Storage(#[from] StoreError),
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    Create {
        payload: T::CreatePayload,
        respond_to: Response<T>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        patch: T::Patch,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<bool>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
    Clear {
        respond_to: Response<()>,
    },
    Shutdown,
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

/// Owns one persisted collection. Every request re-reads the collection from
/// the store, applies its change and writes the whole collection back, one
/// request at a time.
pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: StoreAdapter,
    next_id_fn: Box<dyn Fn(&T::CreatePayload) -> T::Id + Send + Sync>,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(
        buffer_size: usize,
        store: StoreAdapter,
        next_id_fn: impl Fn(&T::CreatePayload) -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store,
            next_id_fn: Box::new(next_id_fn),
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    #[instrument(name = "resource_actor", skip(self), fields(collection = %T::STORE_KEY))]
    pub async fn run(mut self) {
        info!("Actor starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { payload, respond_to } => {
                    let _ = respond_to.send(self.handle_create(payload).await);
                }
                ResourceRequest::Get { id, respond_to } => {
                    let _ = respond_to.send(Ok(self.handle_get(id).await));
                }
                ResourceRequest::List { respond_to } => {
                    let _ = respond_to.send(Ok(self.load().await));
                }
                ResourceRequest::Update { id, patch, respond_to } => {
                    let _ = respond_to.send(self.handle_update(id, patch).await);
                }
                ResourceRequest::Delete { id, respond_to } => {
                    let _ = respond_to.send(self.handle_delete(id).await);
                }
                ResourceRequest::Action { id, action, respond_to } => {
                    let _ = respond_to.send(self.handle_action(id, action).await);
                }
                ResourceRequest::Clear { respond_to } => {
                    let result = self.store.delete(T::STORE_KEY).await.map_err(FrameworkError::from);
                    if result.is_ok() {
                        info!("Collection cleared");
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Shutdown => {
                    info!("Actor shutting down");
                    break;
                }
            }
        }

        info!("Actor stopped");
    }

    async fn load(&self) -> Vec<T> {
        self.store.read(T::STORE_KEY, Vec::new()).await
    }

    async fn persist(&self, items: &[T]) -> Result<(), FrameworkError> {
        self.store.write(T::STORE_KEY, items).await?;
        Ok(())
    }

    #[instrument(skip(self, payload))]
    async fn handle_create(&self, payload: T::CreatePayload) -> Result<T, FrameworkError> {
        let id = (self.next_id_fn)(&payload);
        let mut item = T::from_create(id.clone(), payload).map_err(FrameworkError::Rejected)?;
        item.on_create().map_err(FrameworkError::Rejected)?;

        let mut items = self.load().await;
        match items.iter_mut().find(|existing| existing.id() == &id) {
            Some(existing) => {
                warn!(id = %id, "Replacing existing item with the same id");
                *existing = item.clone();
            }
            None => items.push(item.clone()),
        }
        self.persist(&items).await?;

        info!(id = %id, "Item created");
        Ok(item)
    }

    #[instrument(fields(id = %id), skip(self, id))]
    async fn handle_get(&self, id: T::Id) -> Option<T> {
        let item = self.load().await.into_iter().find(|item| item.id() == &id);
        if item.is_none() {
            debug!("Item not found");
        }
        item
    }

    #[instrument(fields(id = %id), skip(self, id))]
    async fn handle_update(&self, id: T::Id, patch: T::Patch) -> Result<T, FrameworkError> {
        let mut items = self.load().await;
        let Some(position) = items.iter().position(|item| item.id() == &id) else {
            debug!("Item not found for update");
            return Err(FrameworkError::NotFound(id.to_string()));
        };

        let mut updated = items[position].clone();
        updated.on_update(patch).map_err(FrameworkError::Rejected)?;
        items[position] = updated.clone();
        self.persist(&items).await?;

        info!("Item updated");
        Ok(updated)
    }

    #[instrument(fields(id = %id), skip(self, id))]
    async fn handle_delete(&self, id: T::Id) -> Result<bool, FrameworkError> {
        let mut items = self.load().await;
        let Some(position) = items.iter().position(|item| item.id() == &id) else {
            debug!("Nothing to delete");
            return Ok(false);
        };

        items[position].on_delete().map_err(FrameworkError::Rejected)?;
        items.remove(position);
        self.persist(&items).await?;

        info!("Item deleted");
        Ok(true)
    }

    #[instrument(fields(id = %id), skip(self, id))]
    async fn handle_action(&self, id: T::Id, action: T::Action) -> Result<T::ActionResult, FrameworkError> {
        let mut items = self.load().await;
        let Some(position) = items.iter().position(|item| item.id() == &id) else {
            debug!("Item not found for action");
            return Err(FrameworkError::NotFound(id.to_string()));
        };

        let mut updated = items[position].clone();
        let result = updated.handle_action(action).map_err(FrameworkError::Rejected)?;
        items[position] = updated;
        self.persist(&items).await?;

        debug!(result = ?result, "Action handled");
        Ok(result)
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

#[derive(Clone)]
pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: Entity> ResourceClient<T> {
    pub(crate) fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, payload: T::CreatePayload) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Create { payload, respond_to }).await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to }).await
    }

    pub async fn list(&self) -> Result<Vec<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::List { respond_to }).await
    }

    pub async fn update(&self, id: T::Id, patch: T::Patch) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Update { id, patch, respond_to }).await
    }

    pub async fn delete(&self, id: T::Id) -> Result<bool, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to }).await
    }

    pub async fn perform_action(&self, id: T::Id, action: T::Action) -> Result<T::ActionResult, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Action { id, action, respond_to }).await
    }

    pub async fn clear(&self) -> Result<(), FrameworkError> {
        self.request(|respond_to| ResourceRequest::Clear { respond_to }).await
    }

    /// Asks the actor to stop. Stopping an actor that is already gone is not an error.
    pub async fn shutdown(&self) {
        let _ = self.sender.send(ResourceRequest::Shutdown).await;
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    // --- Domain Definition ---

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct Topping {
        id: String,
        name: String,
        extra_cheese: bool,
    }

    #[derive(Debug)]
    struct ToppingCreate {
        name: String,
    }

    #[derive(Debug)]
    struct ToppingPatch {
        name: Option<String>,
    }

    #[derive(Debug)]
    enum ToppingAction {
        AddCheese,
    }

    impl Entity for Topping {
        type Id = String;
        type CreatePayload = ToppingCreate;
        type Patch = ToppingPatch;
        type Action = ToppingAction;
        type ActionResult = bool;

        const STORE_KEY: StoreKey = StoreKey::Menu;

        fn id(&self) -> &String {
            &self.id
        }

        fn from_create(id: String, payload: ToppingCreate) -> Result<Self, String> {
            if payload.name.is_empty() {
                return Err("name required".into());
            }
            Ok(Self {
                id,
                name: payload.name,
                extra_cheese: false,
            })
        }

        fn on_update(&mut self, patch: ToppingPatch) -> Result<(), String> {
            if let Some(name) = patch.name {
                self.name = name;
            }
            Ok(())
        }

        fn handle_action(&mut self, action: ToppingAction) -> Result<bool, String> {
            match action {
                ToppingAction::AddCheese => {
                    let changed = !self.extra_cheese;
                    self.extra_cheese = true;
                    Ok(changed)
                }
            }
        }
    }

    fn start(store: StoreAdapter) -> ResourceClient<Topping> {
        let counter = Arc::new(AtomicU64::new(1));
        let next_id = move |_: &ToppingCreate| format!("topping_{}", counter.fetch_add(1, Ordering::SeqCst));
        let (actor, client) = ResourceActor::new(10, store, next_id);
        tokio::spawn(actor.run());
        client
    }

    // --- Test ---

    #[tokio::test]
    async fn test_resource_actor_persists_every_change() {
        let store = StoreAdapter::in_memory();
        let client = start(store.clone());

        // 1. Create
        let olive = client.create(ToppingCreate { name: "Olive".into() }).await.unwrap();
        assert_eq!(olive.id, "topping_1");
        let stored: Vec<Topping> = store.read(StoreKey::Menu, Vec::new()).await;
        assert_eq!(stored, vec![olive.clone()]);

        // 2. Update
        let renamed = client
            .update(olive.id.clone(), ToppingPatch { name: Some("Black Olive".into()) })
            .await
            .unwrap();
        assert_eq!(renamed.name, "Black Olive");

        // 3. Action, twice
        assert!(client.perform_action(olive.id.clone(), ToppingAction::AddCheese).await.unwrap());
        assert!(!client.perform_action(olive.id.clone(), ToppingAction::AddCheese).await.unwrap());
        let fetched = client.get(olive.id.clone()).await.unwrap().unwrap();
        assert!(fetched.extra_cheese);

        // 4. Delete
        assert!(client.delete(olive.id.clone()).await.unwrap());
        assert!(!client.delete(olive.id).await.unwrap());
        assert!(client.list().await.unwrap().is_empty());

        client.shutdown().await;
    }

    #[tokio::test]
    async fn test_rejections_and_missing_ids() {
        let store = StoreAdapter::in_memory();
        let client = start(store.clone());

        let err = client.create(ToppingCreate { name: String::new() }).await.unwrap_err();
        assert!(matches!(err, FrameworkError::Rejected(_)));
        assert!(!store.is_present(StoreKey::Menu).await.unwrap());

        let err = client
            .update("topping_404".into(), ToppingPatch { name: None })
            .await
            .unwrap_err();
        assert!(matches!(err, FrameworkError::NotFound(id) if id == "topping_404"));
        assert_eq!(client.get("topping_404".into()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_sees_writes_from_other_sessions_and_clears() {
        let store = StoreAdapter::in_memory();
        let client = start(store.clone());

        let external = vec![Topping { id: "t9".into(), name: "Jalapeno".into(), extra_cheese: false }];
        store.write(StoreKey::Menu, &external).await.unwrap();
        assert_eq!(client.list().await.unwrap(), external);

        client.clear().await.unwrap();
        assert!(client.list().await.unwrap().is_empty());
        assert!(!store.is_present(StoreKey::Menu).await.unwrap());
    }

    #[tokio::test]
    async fn test_client_reports_closed_actor() {
        let client = start(StoreAdapter::in_memory());
        client.shutdown().await;
        // Give the actor a chance to exit.
        tokio::task::yield_now().await;
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        let err = client.list().await.unwrap_err();
        assert!(matches!(err, FrameworkError::ActorClosed | FrameworkError::ActorDropped));
    }
}
