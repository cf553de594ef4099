//! The decision log and summarized-card collections on top of a `KeyValueStore`.
//!
//! Both collections are rewritten whole on every change. There is no
//! transaction across the two: `record_decision` writes the decision log
//! first and the card collection second. Writes always start from a strict
//! read; a collection that cannot be read or parsed is never overwritten.

use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{info, warn};

use super::{KeyValueStore, StoreError, CARDS_KEY, DECISIONS_KEY};
use crate::models::{Card, Decision, DecisionRecord, Direction, SummarizedRecord};

#[derive(Clone)]
pub struct PersistenceStore {
    kv: Arc<dyn KeyValueStore>,
}

impl PersistenceStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// Reads the decision log. Absent or unreadable data reads as empty.
    pub fn load_decisions(&self) -> Vec<Decision> {
        self.load_collection::<DecisionRecord>(DECISIONS_KEY)
            .into_iter()
            .map(Decision::from)
            .collect()
    }

    /// Reads the summarized-card collection as cards, in stored order.
    pub fn load_cards(&self) -> Vec<Card> {
        self.load_collection::<SummarizedRecord>(CARDS_KEY)
            .into_iter()
            .map(Card::from)
            .collect()
    }

    pub fn append_card(&self, card: &Card) -> Result<(), StoreError> {
        let mut records = self.read_collection::<SummarizedRecord>(CARDS_KEY)?;
        records.push(SummarizedRecord::from(card));
        self.write_collection(CARDS_KEY, &records)?;
        info!("Stored card {} ({} pending)", card.id, records.len());
        Ok(())
    }

    /// Appends a decision for `card` and drops the card from storage.
    ///
    /// The decision is recorded once the log write succeeds. A failure while
    /// rewriting the card collection after that is logged, not returned: the
    /// stale card reappears on the next load.
    pub fn record_decision(&self, card: &Card, direction: Direction) -> Result<Decision, StoreError> {
        let decision = Decision {
            card_id: Some(card.id),
            direction,
            text: card.text.clone(),
        };

        let mut log = self.read_collection::<DecisionRecord>(DECISIONS_KEY)?;
        log.push(DecisionRecord::from(&decision));
        self.write_collection(DECISIONS_KEY, &log)?;
        info!("Recorded {direction} decision for card {}", card.id);

        if let Err(e) = self.remove_card(card.id) {
            warn!("Card {} decided but not removed from '{CARDS_KEY}': {e}", card.id);
        }
        Ok(decision)
    }

    fn remove_card(&self, id: i64) -> Result<(), StoreError> {
        let mut records = self.read_collection::<SummarizedRecord>(CARDS_KEY)?;
        records.retain(|r| r.id != id);
        self.write_collection(CARDS_KEY, &records)
    }

    fn load_collection<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        self.read_collection(key).unwrap_or_else(|e| {
            warn!("Failed to load '{key}', treating as empty: {e}");
            Vec::new()
        })
    }

    /// Strict read: only an absent key reads as empty.
    fn read_collection<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, StoreError> {
        match self.kv.get(key)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    fn write_collection<T: Serialize>(&self, key: &str, items: &[T]) -> Result<(), StoreError> {
        let json = serde_json::to_string(items)?;
        self.kv.set(key, &json)
    }
}
