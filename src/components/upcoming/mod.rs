mod actor;
pub mod config;
pub mod format;
mod handle;
pub mod models;
pub mod query;
pub mod select;
pub mod time;

pub use config::{CardConfig, DateFormat, Layout, RawCardConfig, TimeFormat};
pub use handle::CardHandle;
pub use models::{CalendarEvent, CardStatus, DisplayEvent, DisplayModel, EventTime};
pub use query::{fetch_events, EventQuery, HomeAssistantClient};
pub use time::Window;

use super::CardInfo;
use chrono::{DateTime, TimeZone};
use std::fmt::Display;
use tracing::{debug, info};

/// Rows the card asks for in a host grid
pub const CARD_SIZE: u32 = 3;

/// Registry entry of the upcoming events card
pub const CARD_INFO: CardInfo = CardInfo {
    card_type: "calendar-upcoming-card",
    name: "Calendar Upcoming Card",
    description: "Display upcoming calendar events with customizable options",
};

/// A load that was started and may still be applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub token: u64,
    pub entity: String,
    pub window: Window,
}

/// One card instance: its configuration snapshot and the selected events
///
/// Every started load gets a fresh token. Only the result of the most
/// recently started load is applied, older ones are discarded.
#[derive(Debug, Clone, Default)]
pub struct UpcomingCard {
    config: CardConfig,
    events: Vec<CalendarEvent>,
    latest_token: u64,
}

impl UpcomingCard {
    pub fn new(config: CardConfig) -> Self {
        Self {
            config,
            events: Vec::new(),
            latest_token: 0,
        }
    }

    pub fn config(&self) -> &CardConfig {
        &self.config
    }

    /// Currently selected events
    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn card_size(&self) -> u32 {
        CARD_SIZE
    }

    /// Replace the configuration; results of loads started before are dropped
    ///
    /// The current events stay until the next load is applied.
    pub fn set_config(&mut self, config: CardConfig) {
        self.config = config;
        self.latest_token += 1;
    }

    /// Start a load for the window around `now`
    ///
    /// Returns `None` when no entity is configured, in which case nothing
    /// should be fetched.
    pub fn begin_load<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) -> Option<LoadTicket> {
        self.latest_token += 1;

        if !self.config.is_configured() {
            self.events.clear();
            return None;
        }

        Some(LoadTicket {
            token: self.latest_token,
            entity: self.config.entity.clone(),
            window: time::compute_window(now, &self.config),
        })
    }

    /// Apply fetched events if the ticket belongs to the latest load
    ///
    /// Returns whether the events were applied.
    pub fn complete_load<Tz: TimeZone>(
        &mut self,
        ticket: &LoadTicket,
        events: Vec<CalendarEvent>,
        tz: &Tz,
    ) -> bool {
        if ticket.token != self.latest_token {
            debug!(
                "Discarding stale load {} for {} (latest is {})",
                ticket.token, ticket.entity, self.latest_token
            );
            return false;
        }

        let max_events = usize::try_from(self.config.max_events).unwrap_or(usize::MAX);
        self.events = select::select(events, max_events, tz);
        true
    }

    /// Fetch and apply in one go
    pub async fn load<Tz: TimeZone>(&mut self, query: &dyn EventQuery, now: &DateTime<Tz>) {
        let Some(ticket) = self.begin_load(now) else {
            info!("No calendar entity configured, skipping fetch");
            return;
        };

        let events = fetch_events(query, &ticket.entity, &ticket.window).await;
        self.complete_load(&ticket, events, &now.timezone());
    }

    pub fn display_model<Tz>(&self, now: &DateTime<Tz>) -> DisplayModel
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        format::display_model(&self.config, &self.events, now)
    }
}
