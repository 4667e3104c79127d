use super::config::CardConfig;
use super::models::{CalendarEvent, DisplayModel};
use super::query::{fetch_events, EventQuery};
use super::{LoadTicket, UpcomingCard};
use crate::error::{component_error, CardResult};
use chrono::Local;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info};

/// The card actor that owns one card instance and processes messages
pub struct CardActor {
    card: UpcomingCard,
    query: Arc<dyn EventQuery>,
    command_rx: mpsc::Receiver<CardCommand>,
    command_tx: mpsc::WeakSender<CardCommand>,
    model_tx: watch::Sender<DisplayModel>,
}

/// Commands that can be sent to the card actor
pub enum CardCommand {
    /// Configuration changed
    SetConfig(CardConfig),
    /// Host context changed
    Refresh,
    LoadFinished(LoadTicket, Vec<CalendarEvent>),
    GetDisplayModel(mpsc::Sender<DisplayModel>),
    Shutdown,
}

/// Handle for communicating with the card actor
#[derive(Clone)]
pub struct CardActorHandle {
    command_tx: mpsc::Sender<CardCommand>,
    model_rx: watch::Receiver<DisplayModel>,
}

impl CardActorHandle {
    /// Replace the configuration and reload
    pub async fn set_config(&self, config: CardConfig) -> CardResult<()> {
        self.send(CardCommand::SetConfig(config)).await
    }

    /// Reload with the current configuration
    pub async fn refresh(&self) -> CardResult<()> {
        self.send(CardCommand::Refresh).await
    }

    /// Display model computed for the current moment
    pub async fn display_model(&self) -> CardResult<DisplayModel> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.send(CardCommand::GetDisplayModel(response_tx)).await?;

        response_rx
            .recv()
            .await
            .ok_or_else(|| component_error("Response channel closed"))
    }

    /// Receiver that sees a new display model after every applied change
    pub fn subscribe(&self) -> watch::Receiver<DisplayModel> {
        self.model_rx.clone()
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> CardResult<()> {
        let _ = self.command_tx.send(CardCommand::Shutdown).await;
        Ok(())
    }

    async fn send(&self, command: CardCommand) -> CardResult<()> {
        self.command_tx
            .send(command)
            .await
            .map_err(|e| component_error(&format!("Actor mailbox error: {}", e)))
    }
}

impl CardActor {
    /// Create a new actor and return its handle
    pub fn new(config: CardConfig, query: Arc<dyn EventQuery>) -> (Self, CardActorHandle) {
        let (command_tx, command_rx) = mpsc::channel(32);

        let card = UpcomingCard::new(config);
        let (model_tx, model_rx) = watch::channel(card.display_model(&Local::now()));

        let actor = Self {
            card,
            query,
            command_rx,
            command_tx: command_tx.downgrade(),
            model_tx,
        };

        let handle = CardActorHandle {
            command_tx,
            model_rx,
        };

        (actor, handle)
    }

    /// Start the actor's processing loop, beginning with the initial load
    pub async fn run(&mut self) {
        info!("Calendar card actor started for '{}'", self.card.config().entity);

        self.start_load();

        while let Some(cmd) = self.command_rx.recv().await {
            match cmd {
                CardCommand::SetConfig(config) => {
                    info!("Card configuration changed, entity '{}'", config.entity);
                    self.card.set_config(config);
                    self.start_load();
                }
                CardCommand::Refresh => {
                    self.start_load();
                }
                CardCommand::LoadFinished(ticket, events) => {
                    if self.card.complete_load(&ticket, events, &Local) {
                        self.publish();
                    }
                }
                CardCommand::GetDisplayModel(response_tx) => {
                    let _ = response_tx.send(self.card.display_model(&Local::now())).await;
                }
                CardCommand::Shutdown => {
                    info!("Calendar card actor shutting down");
                    break;
                }
            }
        }

        info!("Calendar card actor shut down");
    }

    /// Start a fetch without blocking the mailbox
    fn start_load(&mut self) {
        let Some(ticket) = self.card.begin_load(&Local::now()) else {
            info!("No calendar entity configured, skipping fetch");
            self.publish();
            return;
        };

        debug!("Starting load {} for {}", ticket.token, ticket.entity);

        let query = Arc::clone(&self.query);
        let command_tx = self.command_tx.clone();
        tokio::spawn(async move {
            let events = fetch_events(query.as_ref(), &ticket.entity, &ticket.window).await;
            if let Some(command_tx) = command_tx.upgrade() {
                let _ = command_tx.send(CardCommand::LoadFinished(ticket, events)).await;
            }
        });
    }

    fn publish(&self) {
        self.model_tx.send_replace(self.card.display_model(&Local::now()));
    }
}
