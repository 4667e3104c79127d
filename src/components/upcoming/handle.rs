use super::actor::{CardActor, CardActorHandle};
use super::config::CardConfig;
use super::models::DisplayModel;
use super::query::EventQuery;
use crate::error::CardResult;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Handle for interacting with a running card
#[derive(Clone)]
pub struct CardHandle {
    actor_handle: CardActorHandle,
    _actor_task: Arc<JoinHandle<()>>,
}

impl CardHandle {
    /// Create a new CardHandle and spawn the actor
    pub fn new(config: CardConfig, query: Arc<dyn EventQuery>) -> Self {
        let (mut actor, handle) = CardActor::new(config, query);

        let actor_task = tokio::spawn(async move {
            actor.run().await;
        });

        Self {
            actor_handle: handle,
            _actor_task: Arc::new(actor_task),
        }
    }

    pub async fn set_config(&self, config: CardConfig) -> CardResult<()> {
        self.actor_handle.set_config(config).await
    }

    pub async fn refresh(&self) -> CardResult<()> {
        self.actor_handle.refresh().await
    }

    pub async fn display_model(&self) -> CardResult<DisplayModel> {
        self.actor_handle.display_model().await
    }

    pub fn subscribe(&self) -> watch::Receiver<DisplayModel> {
        self.actor_handle.subscribe()
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> CardResult<()> {
        self.actor_handle.shutdown().await
    }
}
