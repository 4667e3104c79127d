use super::config::{CardConfig, DateFormat, TimeFormat};
use super::models::{CalendarEvent, CardStatus, DisplayEvent, DisplayModel};
use super::time::{effective_start, is_past};
use chrono::{DateTime, TimeZone};
use std::fmt::Display;

const DATE_TIME_SEPARATOR: &str = " - ";

/// Date label relative to `now`: "Today", "Tomorrow" or a weekday, month and day
///
/// Only calendar dates in `now`'s zone are compared, times of day are ignored.
pub fn format_date<Tz>(date: &DateTime<Tz>, now: &DateTime<Tz>, format: DateFormat) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let day = date.date_naive();
    let today = now.date_naive();

    if day == today {
        "Today".to_string()
    } else if today.succ_opt() == Some(day) {
        "Tomorrow".to_string()
    } else {
        match format {
            DateFormat::Long => date.format("%A, %B %-d").to_string(),
            DateFormat::Short => date.format("%a, %b %-d").to_string(),
        }
    }
}

pub fn format_time<Tz>(time: &DateTime<Tz>, format: TimeFormat) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match format {
        TimeFormat::TwelveHour => time.format("%-I:%M %p").to_string(),
        TimeFormat::TwentyFourHour => time.format("%H:%M").to_string(),
    }
}

/// Combined date and time label of an event's start
///
/// All-day events never get a time. The result is empty when both flags are
/// off, or when only the time is shown for an all-day event, and also when
/// the start cannot be resolved.
pub fn format_date_time<Tz>(event: &CalendarEvent, now: &DateTime<Tz>, config: &CardConfig) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let Some(start) = effective_start(event, &now.timezone()) else {
        return String::new();
    };

    let mut result = String::new();

    if config.show_date {
        result.push_str(&format_date(&start, now, config.date_format));
    }

    if config.show_time && !event.is_all_day() {
        if !result.is_empty() {
            result.push_str(DATE_TIME_SEPARATOR);
        }
        result.push_str(&format_time(&start, config.time_format));
    }

    result
}

/// Past flag and labels for a single event
pub fn present<Tz>(event: &CalendarEvent, now: &DateTime<Tz>, config: &CardConfig) -> DisplayEvent
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let location = if config.show_location {
        event.location.clone().filter(|l| !l.is_empty())
    } else {
        None
    };

    DisplayEvent {
        summary: event.summary.clone(),
        location,
        is_past: is_past(event, now),
        display_text: format_date_time(event, now, config),
    }
}

/// Build the display model for already selected events
pub fn display_model<Tz>(
    config: &CardConfig,
    events: &[CalendarEvent],
    now: &DateTime<Tz>,
) -> DisplayModel
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let (status, events) = if !config.is_configured() {
        (CardStatus::Unconfigured, Vec::new())
    } else if events.is_empty() {
        (CardStatus::NoEvents, Vec::new())
    } else {
        let events = events
            .iter()
            .map(|event| present(event, now, config))
            .collect();
        (CardStatus::Events, events)
    };

    DisplayModel {
        title: config.title.clone(),
        layout: config.layout,
        status,
        events,
    }
}
