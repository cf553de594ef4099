use std::fmt;

use serde::{Deserialize, Serialize};

/// Swipe direction. Left rejects a candidate, right accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable left/right classification of a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub card_id: Option<i64>,
    pub direction: Direction,
    pub text: String,
}

/// On-disk shape of an entry in the `cardLogs` collection.
///
/// `cardId` is optional so logs written before ids were recorded still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionRecord {
    pub direction: Direction,
    pub description: String,
    #[serde(rename = "cardId", default, skip_serializing_if = "Option::is_none")]
    pub card_id: Option<i64>,
}

impl From<DecisionRecord> for Decision {
    fn from(record: DecisionRecord) -> Self {
        Decision {
            card_id: record.card_id,
            direction: record.direction,
            text: record.description,
        }
    }
}

impl From<&Decision> for DecisionRecord {
    fn from(decision: &Decision) -> Self {
        DecisionRecord {
            direction: decision.direction,
            description: decision.text.clone(),
            card_id: decision.card_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Direction::Left).unwrap(), r#""left""#);
        let d: Direction = serde_json::from_str(r#""right""#).unwrap();
        assert_eq!(d, Direction::Right);
    }

    #[test]
    fn test_legacy_record_without_card_id_loads() {
        let json = r#"{"direction":"left","description":"Card 1 Description"}"#;
        let record: DecisionRecord = serde_json::from_str(json).unwrap();
        let decision: Decision = record.into();
        assert_eq!(decision.card_id, None);
        assert_eq!(decision.direction, Direction::Left);
        assert_eq!(decision.text, "Card 1 Description");
    }

    #[test]
    fn test_unknown_direction_rejected() {
        let json = r#"{"direction":"up","description":"x"}"#;
        assert!(serde_json::from_str::<DecisionRecord>(json).is_err());
    }
}
