use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A pending candidate summary awaiting a swipe decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: i64,
    pub text: String,
}

impl Card {
    pub fn new(id: i64, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }
}

/// On-disk shape of an entry in the `summarized` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarizedRecord {
    pub id: i64,
    pub summary: String,
}

impl From<SummarizedRecord> for Card {
    fn from(record: SummarizedRecord) -> Self {
        Card {
            id: record.id,
            text: record.summary,
        }
    }
}

impl From<&Card> for SummarizedRecord {
    fn from(card: &Card) -> Self {
        SummarizedRecord {
            id: card.id,
            summary: card.text.clone(),
        }
    }
}

/// Issues card ids from the wall clock in milliseconds.
///
/// Ids are strictly increasing: when two cards are created within the same
/// millisecond (or the clock steps backwards) the next id is `last + 1`.
#[derive(Debug, Default)]
pub struct CardIdGenerator {
    last: i64,
}

impl CardIdGenerator {
    /// Seeds the generator so every issued id is greater than `floor`.
    pub fn starting_after(floor: i64) -> Self {
        Self { last: floor }
    }

    pub fn next_id(&mut self) -> i64 {
        self.next_id_at(Utc::now().timestamp_millis())
    }

    fn next_id_at(&mut self, now_ms: i64) -> i64 {
        self.last = now_ms.max(self.last + 1);
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarized_record_maps_to_card() {
        let record = SummarizedRecord {
            id: 1718000000000,
            summary: "Candidate A".to_string(),
        };
        let card: Card = record.into();
        assert_eq!(card, Card::new(1718000000000, "Candidate A"));
    }

    #[test]
    fn test_summarized_record_wire_format() {
        let card = Card::new(42, "Jane Doe");
        let json = serde_json::to_value(SummarizedRecord::from(&card)).unwrap();
        assert_eq!(json, serde_json::json!({ "id": 42, "summary": "Jane Doe" }));
    }

    #[test]
    fn test_id_generator_uses_clock_when_ahead() {
        let mut ids = CardIdGenerator::starting_after(100);
        assert_eq!(ids.next_id_at(5_000), 5_000);
        assert_eq!(ids.next_id_at(6_000), 6_000);
    }

    #[test]
    fn test_id_generator_same_millisecond_stays_unique() {
        let mut ids = CardIdGenerator::default();
        let a = ids.next_id_at(1_000);
        let b = ids.next_id_at(1_000);
        let c = ids.next_id_at(999);
        assert_eq!((a, b, c), (1_000, 1_001, 1_002));
    }

    #[test]
    fn test_id_generator_respects_seed() {
        let mut ids = CardIdGenerator::starting_after(10_000);
        assert_eq!(ids.next_id_at(500), 10_001);
    }
}
