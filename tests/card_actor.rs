use async_trait::async_trait;
use calendar_upcoming::components::upcoming::{
    CalendarEvent, CardConfig, CardHandle, CardStatus, DisplayModel, EventQuery, EventTime,
};
use calendar_upcoming::error::{query_error, CardResult};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Notify};
use tokio::time::timeout;

const WAIT: Duration = Duration::from_secs(5);

fn event(summary: &str) -> CalendarEvent {
    CalendarEvent {
        start: EventTime::at("2099-01-01T09:00:00Z"),
        end: EventTime::at("2099-01-01T10:00:00Z"),
        summary: summary.to_string(),
        ..Default::default()
    }
}

fn configured() -> CardConfig {
    CardConfig {
        entity: "calendar.family".to_string(),
        ..Default::default()
    }
}

fn summaries(model: &DisplayModel) -> Vec<String> {
    model.events.iter().map(|e| e.summary.clone()).collect()
}

/// Counts calls and returns fixed events
#[derive(Default)]
struct CountingQuery {
    calls: AtomicUsize,
    events: Vec<CalendarEvent>,
}

#[async_trait]
impl EventQuery for CountingQuery {
    async fn query_events(&self, _: &str, _: &str, _: &str) -> CardResult<Vec<CalendarEvent>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.events.clone())
    }
}

/// Holds the first call until released, answers later calls at once
struct GatedQuery {
    calls: AtomicUsize,
    entered_tx: mpsc::UnboundedSender<usize>,
    release: Notify,
}

#[async_trait]
impl EventQuery for GatedQuery {
    async fn query_events(&self, _: &str, _: &str, _: &str) -> CardResult<Vec<CalendarEvent>> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        let _ = self.entered_tx.send(call);
        if call == 0 {
            self.release.notified().await;
            Ok(vec![event("stale")])
        } else {
            Ok(vec![event("fresh")])
        }
    }
}

struct FailingQuery;

#[async_trait]
impl EventQuery for FailingQuery {
    async fn query_events(&self, _: &str, _: &str, _: &str) -> CardResult<Vec<CalendarEvent>> {
        Err(query_error("connection refused"))
    }
}

#[tokio::test]
async fn test_initial_load_on_start() {
    let query = Arc::new(CountingQuery {
        events: vec![event("b"), event("a")],
        ..Default::default()
    });
    let handle = CardHandle::new(configured(), query.clone());
    let mut models = handle.subscribe();

    timeout(WAIT, models.wait_for(|m| m.status == CardStatus::Events))
        .await
        .unwrap()
        .unwrap();

    let model = handle.display_model().await.unwrap();
    // Same start instant, input order is kept
    assert_eq!(summaries(&model), vec!["b", "a"]);
    assert_eq!(query.calls.load(Ordering::SeqCst), 1);

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_unconfigured_card_never_fetches() {
    let query = Arc::new(CountingQuery::default());
    let handle = CardHandle::new(CardConfig::stub(), query.clone());

    handle.refresh().await.unwrap();
    let model = handle.display_model().await.unwrap();

    assert_eq!(model.status, CardStatus::Unconfigured);
    assert_eq!(query.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_failed_load_shows_no_events() {
    let handle = CardHandle::new(configured(), Arc::new(FailingQuery));
    let mut models = handle.subscribe();

    timeout(WAIT, models.changed()).await.unwrap().unwrap();

    let model = handle.display_model().await.unwrap();
    assert_eq!(model.status, CardStatus::NoEvents);
    assert!(model.events.is_empty());
}

#[tokio::test]
async fn test_stale_load_is_discarded() {
    let (entered_tx, mut entered_rx) = mpsc::unbounded_channel();
    let query = Arc::new(GatedQuery {
        calls: AtomicUsize::new(0),
        entered_tx,
        release: Notify::new(),
    });

    let handle = CardHandle::new(CardConfig::stub(), query.clone());
    let mut models = handle.subscribe();

    // First load hangs inside the query
    handle.set_config(configured()).await.unwrap();
    assert_eq!(timeout(WAIT, entered_rx.recv()).await.unwrap(), Some(0));

    // Second load finishes first
    handle.refresh().await.unwrap();
    assert_eq!(timeout(WAIT, entered_rx.recv()).await.unwrap(), Some(1));
    timeout(WAIT, models.wait_for(|m| summaries(m) == vec!["fresh"]))
        .await
        .unwrap()
        .unwrap();

    // Now let the first load complete late. Its task holds a clone of the
    // query until its result is queued, so the count drops back to the
    // test's and the actor's references only after that.
    query.release.notify_one();
    timeout(WAIT, async {
        while Arc::strong_count(&query) > 2 {
            tokio::task::yield_now().await;
        }
    })
    .await
    .unwrap();

    let model = handle.display_model().await.unwrap();
    assert_eq!(summaries(&model), vec!["fresh"]);
}

#[tokio::test]
async fn test_set_config_reloads() {
    let query = Arc::new(CountingQuery {
        events: vec![event("a"), event("b"), event("c")],
        ..Default::default()
    });
    let handle = CardHandle::new(configured(), query.clone());
    let mut models = handle.subscribe();

    timeout(WAIT, models.wait_for(|m| m.events.len() == 3))
        .await
        .unwrap()
        .unwrap();

    handle
        .set_config(CardConfig {
            max_events: 2,
            title: Some("Family".to_string()),
            ..configured()
        })
        .await
        .unwrap();

    timeout(WAIT, models.wait_for(|m| m.events.len() == 2))
        .await
        .unwrap()
        .unwrap();

    let model = handle.display_model().await.unwrap();
    assert_eq!(model.title.as_deref(), Some("Family"));
    assert_eq!(query.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_shutdown_stops_actor() {
    let handle = CardHandle::new(CardConfig::stub(), Arc::new(CountingQuery::default()));
    handle.shutdown().await.unwrap();
    assert!(handle.display_model().await.is_err());
}
