use super::models::CalendarEvent;
use super::time::effective_start;
use chrono::{DateTime, TimeZone, Utc};

/// Sort events by effective start and keep the first `max_events`
///
/// The sort is stable, so events starting at the same instant keep their
/// input order. Events without a resolvable start sort after every valid
/// event, in input order among themselves.
pub fn select<Tz: TimeZone>(
    events: Vec<CalendarEvent>,
    max_events: usize,
    tz: &Tz,
) -> Vec<CalendarEvent> {
    let mut keyed: Vec<(SortKey, CalendarEvent)> = events
        .into_iter()
        .map(|event| (SortKey::of(&event, tz), event))
        .collect();

    keyed.sort_by(|a, b| a.0.cmp(&b.0));

    keyed
        .into_iter()
        .take(max_events)
        .map(|(_, event)| event)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum SortKey {
    Start(DateTime<Utc>),
    Malformed,
}

impl SortKey {
    fn of<Tz: TimeZone>(event: &CalendarEvent, tz: &Tz) -> Self {
        match effective_start(event, tz) {
            Some(start) => SortKey::Start(start.with_timezone(&Utc)),
            None => SortKey::Malformed,
        }
    }
}
