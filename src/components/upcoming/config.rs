use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_EVENTS: u32 = 5;
pub const DEFAULT_DAYS_AHEAD: u32 = 7;

/// How events are laid out by the presentation shell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    #[default]
    Vertical,
    Horizontal,
}

/// Clock used for event times
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeFormat {
    #[serde(rename = "12h")]
    TwelveHour,
    #[default]
    #[serde(rename = "24h")]
    TwentyFourHour,
}

/// Verbosity of date labels that are neither today nor tomorrow
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateFormat {
    #[default]
    Short,
    Long,
}

/// Card configuration as supplied by the host, every field optional but the entity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCardConfig {
    #[serde(default)]
    pub entity: String,
    pub title: Option<String>,
    pub max_events: Option<i64>,
    pub days_ahead: Option<i64>,
    pub show_past_hours: Option<i64>,
    pub show_past_today: Option<bool>,
    pub layout: Option<Layout>,
    pub show_time: Option<bool>,
    pub show_date: Option<bool>,
    pub show_location: Option<bool>,
    pub time_format: Option<TimeFormat>,
    pub date_format: Option<DateFormat>,
}

/// Resolved card configuration, one immutable snapshot per render cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardConfig {
    pub entity: String,
    pub title: Option<String>,
    pub max_events: u32,
    pub days_ahead: u32,
    pub show_past_hours: u32,
    pub show_past_today: bool,
    pub layout: Layout,
    pub show_time: bool,
    pub show_date: bool,
    pub show_location: bool,
    pub time_format: TimeFormat,
    pub date_format: DateFormat,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            entity: String::new(),
            title: None,
            max_events: DEFAULT_MAX_EVENTS,
            days_ahead: DEFAULT_DAYS_AHEAD,
            show_past_hours: 0,
            show_past_today: false,
            layout: Layout::Vertical,
            show_time: true,
            show_date: true,
            show_location: false,
            time_format: TimeFormat::TwentyFourHour,
            date_format: DateFormat::Short,
        }
    }
}

impl RawCardConfig {
    /// Merge the supplied fields over the defaults
    ///
    /// An explicit value always wins, `false` included. Counts that make no
    /// sense fall back: `max_events <= 0` becomes 5, a negative `days_ahead`
    /// becomes 7 and a negative `show_past_hours` becomes 0.
    pub fn resolve(self) -> CardConfig {
        let defaults = CardConfig::default();

        let max_events = match self.max_events {
            Some(n) if n > 0 => clamp_u32(n),
            _ => defaults.max_events,
        };
        let days_ahead = match self.days_ahead {
            Some(n) if n >= 0 => clamp_u32(n),
            _ => defaults.days_ahead,
        };
        let show_past_hours = match self.show_past_hours {
            Some(n) if n > 0 => clamp_u32(n),
            _ => defaults.show_past_hours,
        };

        CardConfig {
            entity: self.entity,
            title: self.title.filter(|t| !t.is_empty()),
            max_events,
            days_ahead,
            show_past_hours,
            show_past_today: self.show_past_today.unwrap_or(defaults.show_past_today),
            layout: self.layout.unwrap_or(defaults.layout),
            show_time: self.show_time.unwrap_or(defaults.show_time),
            show_date: self.show_date.unwrap_or(defaults.show_date),
            show_location: self.show_location.unwrap_or(defaults.show_location),
            time_format: self.time_format.unwrap_or(defaults.time_format),
            date_format: self.date_format.unwrap_or(defaults.date_format),
        }
    }
}

fn clamp_u32(n: i64) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

impl From<RawCardConfig> for CardConfig {
    fn from(raw: RawCardConfig) -> Self {
        raw.resolve()
    }
}

impl CardConfig {
    /// Configuration offered to a card editor for a freshly added card
    pub fn stub() -> Self {
        Self::default()
    }

    /// Whether a calendar entity has been chosen
    pub fn is_configured(&self) -> bool {
        !self.entity.is_empty()
    }
}
