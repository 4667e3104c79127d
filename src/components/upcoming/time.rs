use super::config::CardConfig;
use super::models::{CalendarEvent, EventTime};
use chrono::{
    DateTime, Days, Duration, LocalResult, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc,
};

/// Naive date-time layouts accepted when an event carries no offset
const NAIVE_DATE_TIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];

/// The [start, end) range requested from the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Window {
    /// Start of the window in the format the host query expects
    pub fn start_iso(&self) -> String {
        to_iso(&self.start)
    }

    /// End of the window in the format the host query expects
    pub fn end_iso(&self) -> String {
        to_iso(&self.end)
    }
}

/// UTC, millisecond precision, `Z` suffix
pub fn to_iso(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Compute the window to request for the given moment
pub fn compute_window<Tz: TimeZone>(now: &DateTime<Tz>, config: &CardConfig) -> Window {
    // Calendar-day arithmetic keeps the wall-clock time across DST changes
    let end = now
        .clone()
        .checked_add_days(Days::new(u64::from(config.days_ahead)))
        .or_else(|| now.clone().checked_add_signed(Duration::days(i64::from(config.days_ahead))))
        .map(|end| end.with_timezone(&Utc))
        .unwrap_or(DateTime::<Utc>::MAX_UTC);

    let start = if config.show_past_today {
        start_of_day(&now.timezone(), now.date_naive())
            .unwrap_or_else(|| now.clone())
            .with_timezone(&Utc)
    } else if config.show_past_hours > 0 {
        now.clone()
            .checked_sub_signed(Duration::hours(i64::from(config.show_past_hours)))
            .map(|start| start.with_timezone(&Utc))
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    } else {
        now.with_timezone(&Utc)
    };

    Window { start, end }
}

/// Local midnight of a calendar date
///
/// Zones that skip midnight on a DST change start the day at the first
/// existing hour instead.
pub fn start_of_day<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> Option<DateTime<Tz>> {
    let midnight = date.and_hms_opt(0, 0, 0)?;
    match tz.from_local_datetime(&midnight) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => tz
            .from_local_datetime(&(midnight + Duration::hours(1)))
            .earliest(),
    }
}

/// Resolve a start or end marker to a concrete instant in `tz`
///
/// `dateTime` wins over `date`; an empty string counts as absent. Returns
/// `None` for a malformed marker.
pub fn resolve_instant<Tz: TimeZone>(time: &EventTime, tz: &Tz) -> Option<DateTime<Tz>> {
    if let Some(date_time) = time.date_time_str() {
        parse_date_time(date_time, tz)
    } else if let Some(date) = time.date_str() {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
        start_of_day(tz, date)
    } else {
        None
    }
}

fn parse_date_time<Tz: TimeZone>(value: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(tz));
    }

    NAIVE_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .and_then(|naive| tz.from_local_datetime(&naive).earliest())
}

/// Effective start instant of an event
pub fn effective_start<Tz: TimeZone>(event: &CalendarEvent, tz: &Tz) -> Option<DateTime<Tz>> {
    resolve_instant(&event.start, tz)
}

/// Effective end instant of an event
///
/// An all-day end marker resolves to the start of that day, not its end.
pub fn effective_end<Tz: TimeZone>(event: &CalendarEvent, tz: &Tz) -> Option<DateTime<Tz>> {
    resolve_instant(&event.end, tz)
}

/// An event is past strictly when its end precedes `now`
///
/// Events whose end cannot be resolved are never past.
pub fn is_past<Tz: TimeZone>(event: &CalendarEvent, now: &DateTime<Tz>) -> bool {
    effective_end(event, &now.timezone()).is_some_and(|end| end < *now)
}
