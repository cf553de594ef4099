use crate::models::Card;

/// Ordered collection of cards awaiting a decision.
#[derive(Debug, Clone, Default)]
pub struct CardQueue {
    cards: Vec<Card>,
}

impl CardQueue {
    /// Builds the queue from stored cards as-is. Cards already decided in an
    /// earlier session are not filtered here; storage drops them on decision.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn get(&self, id: i64) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    pub fn remove(&mut self, id: i64) -> Option<Card> {
        let idx = self.cards.iter().position(|c| c.id == id)?;
        Some(self.cards.remove(idx))
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Largest card id currently queued, used to seed id generation.
    pub fn max_id(&self) -> Option<i64> {
        self.cards.iter().map(|c| c.id).max()
    }
}
