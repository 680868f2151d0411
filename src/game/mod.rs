pub mod deck;
pub mod spider;
pub mod types;

pub use deck::{spider_deck, DECK_SIZE};
pub use spider::{can_stack_tableau, SpiderGame, COMPLETED_RUNS_TO_WIN, PILE_COUNT};
pub use types::{rank_label, Card, CardId, Suit, SuitMode};
