use std::fmt;
use tracing::{info, warn};

pub mod upcoming;

pub use upcoming::{CardHandle, UpcomingCard};

/// Metadata a host shows for a card in its picker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardInfo {
    pub card_type: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

/// Cards known to the embedding application
///
/// Populated explicitly during startup, never at load time.
#[derive(Default)]
pub struct CardRegistry {
    cards: Vec<CardInfo>,
}

impl fmt::Debug for CardRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardRegistry")
            .field("card_count", &self.cards.len())
            .finish()
    }
}

impl CardRegistry {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    /// Register a card; a type registered twice keeps its first entry
    pub fn register(&mut self, card: CardInfo) -> bool {
        if self.get_card_by_type(card.card_type).is_some() {
            warn!("Card already registered: {}", card.card_type);
            return false;
        }

        info!("Registering card: {}", card.card_type);
        self.cards.push(card);
        true
    }

    /// Get a card by its type
    pub fn get_card_by_type(&self, card_type: &str) -> Option<&CardInfo> {
        self.cards.iter().find(|c| c.card_type == card_type)
    }

    pub fn cards(&self) -> &[CardInfo] {
        &self.cards
    }
}

/// Register every card this crate provides
pub fn register_builtin_cards(registry: &mut CardRegistry) {
    registry.register(upcoming::CARD_INFO);
}
