//! Triage coordinator — the single owner of the persistence store and the card queue.
//!
//! Everything that mutates triage state (swipe commits, direct decisions,
//! newly summarized cards) is sent here as a `TriageCommand` and applied one
//! at a time. Store I/O is synchronous, so the loop runs on a blocking thread.

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use super::queue::CardQueue;
use super::TriageError;
use crate::models::{Card, CardIdGenerator, Decision, Direction};
use crate::store::PersistenceStore;

const COMMAND_BUFFER: usize = 64;

type Reply<T> = oneshot::Sender<Result<T, TriageError>>;

#[derive(Debug)]
pub enum TriageCommand {
    /// Commit a decision for a queued card.
    Decide {
        card_id: i64,
        direction: Direction,
        reply: Reply<Decision>,
    },
    /// Create a card from a fresh summary and queue it.
    Enqueue { text: String, reply: Reply<Card> },
    /// Current queue, in order.
    Queue { reply: oneshot::Sender<Vec<Card>> },
    /// Decision log, in commit order.
    Decisions {
        reply: oneshot::Sender<Vec<Decision>>,
    },
}

/// Cloneable handle for sending commands to the coordinator loop.
#[derive(Clone)]
pub struct CoordinatorHandle {
    sender: mpsc::Sender<TriageCommand>,
}

impl CoordinatorHandle {
    pub async fn decide(&self, card_id: i64, direction: Direction) -> Result<Decision, TriageError> {
        let (reply, rx) = oneshot::channel();
        self.send(TriageCommand::Decide {
            card_id,
            direction,
            reply,
        })
        .await?;
        rx.await.map_err(|_| TriageError::Closed)?
    }

    pub async fn enqueue(&self, text: String) -> Result<Card, TriageError> {
        let (reply, rx) = oneshot::channel();
        self.send(TriageCommand::Enqueue { text, reply }).await?;
        rx.await.map_err(|_| TriageError::Closed)?
    }

    pub async fn queue(&self) -> Result<Vec<Card>, TriageError> {
        let (reply, rx) = oneshot::channel();
        self.send(TriageCommand::Queue { reply }).await?;
        rx.await.map_err(|_| TriageError::Closed)
    }

    pub async fn decisions(&self) -> Result<Vec<Decision>, TriageError> {
        let (reply, rx) = oneshot::channel();
        self.send(TriageCommand::Decisions { reply }).await?;
        rx.await.map_err(|_| TriageError::Closed)
    }

    async fn send(&self, command: TriageCommand) -> Result<(), TriageError> {
        self.sender
            .send(command)
            .await
            .map_err(|_| TriageError::Closed)
    }
}

/// In-memory triage state mirrored to the persistence store.
struct Coordinator {
    store: PersistenceStore,
    queue: CardQueue,
    decisions: Vec<Decision>,
    ids: CardIdGenerator,
}

impl Coordinator {
    fn load(store: PersistenceStore) -> Self {
        let queue = CardQueue::from_cards(store.load_cards());
        let decisions = store.load_decisions();
        let floor = queue
            .max_id()
            .into_iter()
            .chain(decisions.iter().filter_map(|d| d.card_id))
            .max()
            .unwrap_or(0);
        if queue.is_empty() {
            info!("No pending cards ({} decisions on record)", decisions.len());
        } else {
            info!(
                "Loaded {} pending cards and {} decisions",
                queue.len(),
                decisions.len()
            );
        }
        Self {
            store,
            queue,
            decisions,
            ids: CardIdGenerator::starting_after(floor),
        }
    }

    fn handle(&mut self, command: TriageCommand) {
        match command {
            TriageCommand::Decide {
                card_id,
                direction,
                reply,
            } => {
                let _ = reply.send(self.decide(card_id, direction));
            }
            TriageCommand::Enqueue { text, reply } => {
                let _ = reply.send(self.enqueue(text));
            }
            TriageCommand::Queue { reply } => {
                let _ = reply.send(self.queue.cards().to_vec());
            }
            TriageCommand::Decisions { reply } => {
                let _ = reply.send(self.decisions.clone());
            }
        }
    }

    fn decide(&mut self, card_id: i64, direction: Direction) -> Result<Decision, TriageError> {
        let card = self
            .queue
            .get(card_id)
            .cloned()
            .ok_or(TriageError::CardNotFound(card_id))?;
        let decision = self.store.record_decision(&card, direction)?;
        self.queue.remove(card_id);
        self.decisions.push(decision.clone());
        Ok(decision)
    }

    fn enqueue(&mut self, text: String) -> Result<Card, TriageError> {
        let card = Card::new(self.ids.next_id(), text);
        self.store.append_card(&card)?;
        self.queue.push(card.clone());
        debug!("Queued card {} ({} pending)", card.id, self.queue.len());
        Ok(card)
    }
}

/// Loads triage state from `store` and starts the coordinator loop.
///
/// The loop exits once every `CoordinatorHandle` has been dropped.
pub fn spawn_coordinator(store: PersistenceStore) -> CoordinatorHandle {
    let (sender, mut receiver) = mpsc::channel(COMMAND_BUFFER);

    tokio::task::spawn_blocking(move || {
        let mut coordinator = Coordinator::load(store);
        while let Some(command) = receiver.blocking_recv() {
            coordinator.handle(command);
        }
        warn!("Triage coordinator stopped: all handles dropped");
    });

    CoordinatorHandle { sender }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::store::{
        FaultyKeyValueStore, KeyValueStore, MemoryKeyValueStore, CARDS_KEY, DECISIONS_KEY,
    };

    fn spawn_with(kv: Arc<MemoryKeyValueStore>) -> CoordinatorHandle {
        spawn_coordinator(PersistenceStore::new(kv))
    }

    #[tokio::test]
    async fn test_empty_store_gives_empty_queue() {
        let handle = spawn_with(Arc::new(MemoryKeyValueStore::new()));
        assert!(handle.queue().await.unwrap().is_empty());
        assert!(handle.decisions().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_enqueue_then_decide() {
        let kv = Arc::new(MemoryKeyValueStore::new());
        let handle = spawn_with(kv.clone());

        let card = handle.enqueue("Candidate A".to_string()).await.unwrap();
        assert_eq!(handle.queue().await.unwrap(), vec![card.clone()]);

        let decision = handle.decide(card.id, Direction::Left).await.unwrap();
        assert_eq!(decision.text, "Candidate A");
        assert!(handle.queue().await.unwrap().is_empty());
        assert_eq!(handle.decisions().await.unwrap(), vec![decision]);

        let stored = PersistenceStore::new(kv);
        assert!(stored.load_cards().is_empty());
        assert_eq!(stored.load_decisions().len(), 1);
    }

    #[tokio::test]
    async fn test_second_decision_for_same_card_rejected() {
        let handle = spawn_with(Arc::new(MemoryKeyValueStore::new()));
        let card = handle.enqueue("B".to_string()).await.unwrap();

        handle.decide(card.id, Direction::Right).await.unwrap();
        let again = handle.decide(card.id, Direction::Right).await;

        assert!(matches!(again, Err(TriageError::CardNotFound(id)) if id == card.id));
        assert_eq!(handle.decisions().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_ids_continue_after_stored_cards() {
        let kv = Arc::new(MemoryKeyValueStore::new());
        let far_future = 9_000_000_000_000_i64;
        kv.set(CARDS_KEY, &format!(r#"[{{"id":{far_future},"summary":"X"}}]"#))
            .unwrap();
        let handle = spawn_with(kv);

        let card = handle.enqueue("Y".to_string()).await.unwrap();
        assert_eq!(card.id, far_future + 1);
    }

    #[tokio::test]
    async fn test_queue_loaded_from_store() {
        let kv = Arc::new(MemoryKeyValueStore::new());
        kv.set(
            CARDS_KEY,
            r#"[{"id":1,"summary":"A"},{"id":2,"summary":"B"}]"#,
        )
        .unwrap();
        let handle = spawn_with(kv);
        let texts: Vec<_> = handle
            .queue()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.text)
            .collect();
        assert_eq!(texts, vec!["A", "B"]);
    }

    #[tokio::test]
    async fn test_failed_card_rewrite_does_not_allow_second_decision() {
        let kv = Arc::new(FaultyKeyValueStore::new());
        let handle = spawn_coordinator(PersistenceStore::new(kv.clone()));
        let card = handle.enqueue("E".to_string()).await.unwrap();

        kv.fail_set(CARDS_KEY);
        let first = handle.decide(card.id, Direction::Left).await;
        let second = handle.decide(card.id, Direction::Left).await;
        kv.heal();

        assert!(first.is_ok());
        assert!(matches!(second, Err(TriageError::CardNotFound(_))));
        assert!(handle.queue().await.unwrap().is_empty());
        let stored = PersistenceStore::new(kv).load_decisions();
        assert_eq!(
            stored.iter().filter(|d| d.card_id == Some(card.id)).count(),
            1
        );
    }

    #[tokio::test]
    async fn test_failed_log_write_keeps_card_queued() {
        let kv = Arc::new(FaultyKeyValueStore::new());
        let handle = spawn_coordinator(PersistenceStore::new(kv.clone()));
        let card = handle.enqueue("F".to_string()).await.unwrap();

        kv.fail_set(DECISIONS_KEY);
        let result = handle.decide(card.id, Direction::Right).await;
        kv.heal();

        assert!(matches!(result, Err(TriageError::Store(_))));
        assert_eq!(handle.queue().await.unwrap(), vec![card.clone()]);
        assert!(handle.decisions().await.unwrap().is_empty());

        // Retry once the store recovers.
        handle.decide(card.id, Direction::Right).await.unwrap();
        assert_eq!(handle.decisions().await.unwrap().len(), 1);
    }
}
