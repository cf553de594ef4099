pub mod card;
pub mod decision;

pub use card::{Card, CardIdGenerator, SummarizedRecord};
pub use decision::{Decision, DecisionRecord, Direction};
