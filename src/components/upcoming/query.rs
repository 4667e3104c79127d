use super::models::CalendarEvent;
use super::time::Window;
use crate::error::{query_error, CardResult};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error};
use url::Url;

/// The host's calendar query capability
#[async_trait]
pub trait EventQuery: Send + Sync {
    /// Fetch the events of `entity_id` between two ISO 8601 instants
    async fn query_events(
        &self,
        entity_id: &str,
        start: &str,
        end: &str,
    ) -> CardResult<Vec<CalendarEvent>>;
}

/// Fetch the events of a window, degrading every failure to an empty list
pub async fn fetch_events(
    query: &dyn EventQuery,
    entity_id: &str,
    window: &Window,
) -> Vec<CalendarEvent> {
    let start = window.start_iso();
    let end = window.end_iso();

    match query.query_events(entity_id, &start, &end).await {
        Ok(events) => {
            debug!("Fetched {} events for {} ({} - {})", events.len(), entity_id, start, end);
            events
        }
        Err(e) => {
            error!("Error loading calendar events for {}: {}", entity_id, e);
            Vec::new()
        }
    }
}

/// Calendar queries against the Home Assistant REST API
#[derive(Debug, Clone)]
pub struct HomeAssistantClient {
    base_url: Url,
    token: String,
    client: Client,
}

impl HomeAssistantClient {
    pub fn new(base_url: &str, token: impl Into<String>) -> CardResult<Self> {
        // A trailing slash keeps any path prefix when joining
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            base_url,
            token: token.into(),
            client: Client::new(),
        })
    }

    /// URL of the calendar events endpoint for one entity and window
    pub fn events_url(&self, entity_id: &str, start: &str, end: &str) -> CardResult<Url> {
        let mut url = self.base_url.join(&format!("api/calendars/{}", entity_id))?;
        url.query_pairs_mut()
            .append_pair("start", start)
            .append_pair("end", end);
        Ok(url)
    }
}

#[async_trait]
impl EventQuery for HomeAssistantClient {
    async fn query_events(
        &self,
        entity_id: &str,
        start: &str,
        end: &str,
    ) -> CardResult<Vec<CalendarEvent>> {
        let url = self.events_url(entity_id, start, end)?;

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| query_error(&format!("Failed to fetch events: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(query_error(&format!(
                "Failed to fetch events: HTTP {} - {}",
                status, error_body
            )));
        }

        let events: Vec<CalendarEvent> = response
            .json()
            .await
            .map_err(|e| query_error(&format!("Failed to parse events response: {}", e)))?;

        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_url() {
        let client = HomeAssistantClient::new("http://homeassistant.local:8123", "token").unwrap();
        let url = client
            .events_url(
                "calendar.family",
                "2024-11-20T10:00:00.000Z",
                "2024-11-27T10:00:00.000Z",
            )
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://homeassistant.local:8123/api/calendars/calendar.family?start=2024-11-20T10%3A00%3A00.000Z&end=2024-11-27T10%3A00%3A00.000Z"
        );
    }

    #[test]
    fn test_events_url_keeps_path_prefix() {
        let client = HomeAssistantClient::new("https://example.org/ha", "token").unwrap();
        let url = client.events_url("calendar.x", "a", "b").unwrap();
        assert_eq!(url.path(), "/ha/api/calendars/calendar.x");
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(HomeAssistantClient::new("not a url", "token").is_err());
    }
}
