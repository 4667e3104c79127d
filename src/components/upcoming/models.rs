use super::config::Layout;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const UNCONFIGURED_MESSAGE: &str = "Please configure a calendar entity";
pub const NO_EVENTS_MESSAGE: &str = "No upcoming events";

/// Start or end of an event, either a precise instant or a whole day
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTime {
    #[serde(rename = "dateTime", default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl EventTime {
    pub fn at(date_time: impl Into<String>) -> Self {
        Self {
            date_time: Some(date_time.into()),
            date: None,
        }
    }

    pub fn all_day(date: impl Into<String>) -> Self {
        Self {
            date_time: None,
            date: Some(date.into()),
        }
    }

    /// Precise instant text, an empty string counts as absent
    pub fn date_time_str(&self) -> Option<&str> {
        self.date_time.as_deref().filter(|s| !s.is_empty())
    }

    /// Calendar date text, an empty string counts as absent
    pub fn date_str(&self) -> Option<&str> {
        self.date.as_deref().filter(|s| !s.is_empty())
    }
}

/// Calendar event as returned by the host, already expanded from recurrences
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    #[serde(default)]
    pub start: EventTime,
    #[serde(default)]
    pub end: EventTime,
    #[serde(default)]
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl CalendarEvent {
    /// All-day events carry no time of day on their start
    pub fn is_all_day(&self) -> bool {
        self.start.date_time_str().is_none()
    }
}

/// One event, ready for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayEvent {
    pub summary: String,
    pub location: Option<String>,
    pub is_past: bool,
    pub display_text: String,
}

/// Terminal state the presentation shell should show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CardStatus {
    /// No calendar entity configured, nothing was fetched
    Unconfigured,
    /// Configured, but the window holds no events
    NoEvents,
    Events,
}

impl CardStatus {
    /// Text shown instead of an event list, if any
    pub fn message(&self) -> Option<&'static str> {
        match self {
            CardStatus::Unconfigured => Some(UNCONFIGURED_MESSAGE),
            CardStatus::NoEvents => Some(NO_EVENTS_MESSAGE),
            CardStatus::Events => None,
        }
    }
}

/// Everything a rendering layer needs to draw the card
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayModel {
    pub title: Option<String>,
    pub layout: Layout,
    pub status: CardStatus,
    pub events: Vec<DisplayEvent>,
}

impl fmt::Display for DisplayEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.is_past { "(past) " } else { "" };
        write!(f, "{}{}", marker, self.summary)?;
        if !self.display_text.is_empty() {
            write!(f, " [{}]", self.display_text)?;
        }
        if let Some(location) = &self.location {
            write!(f, " @ {}", location)?;
        }
        Ok(())
    }
}

impl fmt::Display for DisplayModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(title) = &self.title {
            writeln!(f, "{}", title)?;
        }

        if let Some(message) = self.status.message() {
            return writeln!(f, "{}", message);
        }

        match self.layout {
            Layout::Vertical => {
                for event in &self.events {
                    writeln!(f, "• {}", event)?;
                }
                Ok(())
            }
            Layout::Horizontal => {
                let line = self
                    .events
                    .iter()
                    .map(|e| e.to_string())
                    .collect::<Vec<_>>()
                    .join(" | ");
                writeln!(f, "{}", line)
            }
        }
    }
}
