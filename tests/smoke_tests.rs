use calendar_upcoming::components::upcoming::{
    CardConfig, CardStatus, DateFormat, Layout, RawCardConfig, TimeFormat, UpcomingCard, CARD_INFO,
};
use calendar_upcoming::components::{register_builtin_cards, CardInfo, CardRegistry};
use calendar_upcoming::config::parse_card_config;
use chrono::{TimeZone, Utc};

/// Smoke test to verify that a card config file resolves with defaults
#[test]
fn test_card_config_loads() {
    let config = parse_card_config(
        r#"
        entity = "calendar.family"
        title = "Family"
        show_past_today = true
        "#,
    )
    .unwrap();

    assert_eq!(config.entity, "calendar.family");
    assert!(config.show_past_today);
    assert_eq!(config.max_events, 5);
    assert_eq!(config.days_ahead, 7);
    assert_eq!(config.layout, Layout::Vertical);
    assert_eq!(config.time_format, TimeFormat::TwentyFourHour);
    assert_eq!(config.date_format, DateFormat::Short);
}

/// Explicit `false` survives the merge with defaults
#[test]
fn test_explicit_false_survives_defaults() {
    let raw: RawCardConfig =
        serde_json::from_str(r#"{"entity": "x", "show_time": false}"#).unwrap();
    let config = CardConfig::from(raw);
    assert!(!config.show_time);
    assert!(config.show_date);
}

#[test]
fn test_registry_registration() {
    let mut registry = CardRegistry::new();
    assert!(registry.get_card_by_type("calendar-upcoming-card").is_none());

    register_builtin_cards(&mut registry);

    let info = registry.get_card_by_type("calendar-upcoming-card").unwrap();
    assert_eq!(info.name, "Calendar Upcoming Card");
    assert_eq!(*info, CARD_INFO);

    // Registering the same type again is ignored
    assert!(!registry.register(CARD_INFO));
    assert_eq!(registry.cards().len(), 1);

    assert!(registry.register(CardInfo {
        card_type: "other-card",
        name: "Other",
        description: "Something else",
    }));
    assert_eq!(registry.cards().len(), 2);
}

#[test]
fn test_text_rendering_of_empty_card() {
    let now = Utc.with_ymd_and_hms(2024, 11, 20, 10, 0, 0).unwrap();
    let card = UpcomingCard::new(CardConfig {
        entity: "calendar.family".to_string(),
        title: Some("Family".to_string()),
        ..Default::default()
    });

    let model = card.display_model(&now);
    assert_eq!(model.status, CardStatus::NoEvents);
    assert_eq!(model.to_string(), "Family\nNo upcoming events\n");
}
