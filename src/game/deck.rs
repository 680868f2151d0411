use super::{Card, Suit, SuitMode};

/// Spider always plays with eight 13-card rank sets.
pub const DECK_SIZE: usize = 104;

/// Build the unshuffled 104-card deck for a suit mode, all face-down, with
/// ids assigned in construction order. One suit: eight copies of spades.
/// Two suits: four copies each of spades and hearts (one black, one red).
/// Four suits: two copies of everything.
pub fn spider_deck(suit_mode: SuitMode) -> Vec<Card> {
    let suits: &[Suit] = match suit_mode {
        SuitMode::One => &[Suit::Spades],
        SuitMode::Two => &[Suit::Spades, Suit::Hearts],
        SuitMode::Four => &Suit::ALL,
    };

    let copies = DECK_SIZE / (suits.len() * 13);
    let mut deck = Vec::with_capacity(DECK_SIZE);
    let mut next_id = 0_u32;
    for _ in 0..copies {
        for &suit in suits {
            for rank in 1..=13 {
                deck.push(Card {
                    suit,
                    rank,
                    face_up: false,
                    id: next_id,
                });
                next_id += 1;
            }
        }
    }
    deck
}
