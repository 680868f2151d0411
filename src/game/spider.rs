use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::{HashMap, HashSet};

use super::deck::{spider_deck, DECK_SIZE};
use super::{Card, Suit, SuitMode};

pub const PILE_COUNT: usize = 10;
pub const COMPLETED_RUNS_TO_WIN: usize = 8;

/// Cards dealt from the stock per deal, one onto each pile.
const DEAL_SIZE: usize = PILE_COUNT;

/// Pure Spider rules state: ten tableau piles, the undealt stock, and the
/// completed-run bookkeeping. No clocks, no counters, no undo; the session
/// layer owns those. Every mutating operation validates first and returns
/// `false` without touching state when the request is illegal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SpiderGame {
    suit_mode: SuitMode,
    stock: Vec<Card>,
    tableau: [Vec<Card>; PILE_COUNT],
    completed_runs: usize,
    completed_run_suits: Vec<Suit>,
}

impl SpiderGame {
    pub fn new_with_seed(seed: u64, suit_mode: SuitMode) -> Self {
        let mut deck = spider_deck(suit_mode);
        let mut rng = StdRng::seed_from_u64(seed);
        deck.shuffle(&mut rng);

        let mut game = Self {
            suit_mode,
            stock: Vec::new(),
            tableau: std::array::from_fn(|_| Vec::new()),
            completed_runs: 0,
            completed_run_suits: Vec::new(),
        };

        // Piles 0-3 take six cards, 4-9 take five; only each pile's top card
        // starts face-up. The remaining 50 cards are exactly five deals.
        let mut draw = deck.into_iter();
        for col in 0..PILE_COUNT {
            let col_size = if col < 4 { 6 } else { 5 };
            for row in 0..col_size {
                let mut card = draw.next().expect("spider setup consumes 54 cards");
                card.face_up = row == col_size - 1;
                game.tableau[col].push(card);
            }
        }

        for mut card in draw {
            card.face_up = false;
            game.stock.push(card);
        }

        game
    }

    pub fn suit_mode(&self) -> SuitMode {
        self.suit_mode
    }

    pub fn stock_len(&self) -> usize {
        self.stock.len()
    }

    pub fn tableau(&self) -> &[Vec<Card>; PILE_COUNT] {
        &self.tableau
    }

    pub fn pile(&self, col: usize) -> Option<&[Card]> {
        self.tableau.get(col).map(Vec::as_slice)
    }

    pub fn tableau_top(&self, col: usize) -> Option<Card> {
        self.tableau.get(col).and_then(|pile| pile.last().copied())
    }

    pub fn tableau_len(&self, col: usize) -> Option<usize> {
        self.tableau.get(col).map(Vec::len)
    }

    pub fn tableau_card(&self, col: usize, index: usize) -> Option<Card> {
        self.tableau
            .get(col)
            .and_then(|pile| pile.get(index))
            .copied()
    }

    pub fn completed_runs(&self) -> usize {
        self.completed_runs
    }

    /// Suits of retired sequences, in retirement order. Hosts use this to
    /// draw the foundation stamps.
    pub fn completed_run_suits(&self) -> &[Suit] {
        &self.completed_run_suits
    }

    pub fn is_won(&self) -> bool {
        self.completed_runs >= COMPLETED_RUNS_TO_WIN
    }

    /// The draggable run starting at `start`: `None` when the index is out of
    /// range or face-down, or when the chain up to the pile top breaks suit
    /// or descending-by-one order. Otherwise the contiguous slice to the top.
    pub fn movable_run(&self, col: usize, start: usize) -> Option<&[Card]> {
        let pile = self.tableau.get(col)?;
        let candidate = pile.get(start..)?;
        if candidate.is_empty() || !candidate[0].face_up {
            return None;
        }
        if !is_descending_suited_run(candidate) {
            return None;
        }
        Some(candidate)
    }

    pub fn can_move_run(&self, src: usize, start: usize, dst: usize) -> bool {
        if src == dst || dst >= self.tableau.len() {
            return false;
        }
        let Some(run) = self.movable_run(src, start) else {
            return false;
        };
        can_stack_tableau(self.tableau[dst].last(), run[0])
    }

    /// Transfer the run at (`src`, `start`) onto `dst`, flip the exposed
    /// source card, and retire any sequence the move completed. Returns
    /// `false` (state untouched) when the move is illegal.
    pub fn move_run(&mut self, src: usize, start: usize, dst: usize) -> bool {
        if !self.can_move_run(src, start, dst) {
            return false;
        }

        let moved = self.tableau[src].split_off(start);
        self.tableau[dst].extend(moved);
        self.flip_top_if_needed(src);
        self.remove_completed_runs();
        true
    }

    /// Classic rule: dealing needs a full ten-card row and no empty pile.
    pub fn can_deal_from_stock(&self) -> bool {
        self.stock.len() >= DEAL_SIZE && self.tableau.iter().all(|pile| !pile.is_empty())
    }

    pub fn deal_from_stock(&mut self) -> bool {
        if !self.can_deal_from_stock() {
            return false;
        }

        for col in 0..PILE_COUNT {
            let mut card = self.stock.pop().expect("deal guard checked stock size");
            card.face_up = true;
            self.tableau[col].push(card);
        }

        self.remove_completed_runs();
        true
    }

    fn flip_top_if_needed(&mut self, col: usize) {
        if let Some(card) = self.tableau[col].last_mut() {
            card.face_up = true;
        }
    }

    /// Retire every face-up same-suit K..A sequence sitting on top of a pile.
    /// Loops per pile because retiring one run can expose another that was
    /// assembled underneath it.
    fn remove_completed_runs(&mut self) {
        for col in 0..self.tableau.len() {
            while let Some(suit) = complete_suited_run_suit(&self.tableau[col]) {
                let new_len = self.tableau[col]
                    .len()
                    .checked_sub(13)
                    .expect("complete run requires at least 13 cards");
                self.tableau[col].truncate(new_len);
                self.completed_runs += 1;
                self.completed_run_suits.push(suit);
                self.flip_top_if_needed(col);
            }
        }
    }

    pub fn encode_for_session(&self) -> String {
        let mut parts = vec![
            format!("mode={}", self.suit_mode.suit_count()),
            format!("done={}", self.completed_runs),
            format!("runs={}", encode_run_suits(&self.completed_run_suits)),
            format!("stock={}", encode_pile(&self.stock)),
        ];
        for (col, pile) in self.tableau.iter().enumerate() {
            parts.push(format!("t{col}={}", encode_pile(pile)));
        }
        parts.join(";")
    }

    pub fn decode_from_session(data: &str) -> Option<Self> {
        let mut fields = HashMap::<&str, &str>::new();
        for part in data.split(';') {
            let (key, value) = part.split_once('=')?;
            fields.insert(key, value);
        }

        let suit_mode = SuitMode::from_suit_count(fields.get("mode")?.parse::<u8>().ok()?)?;
        let completed_runs = fields.get("done")?.parse::<usize>().ok()?;
        if completed_runs > COMPLETED_RUNS_TO_WIN {
            return None;
        }
        let completed_run_suits = decode_run_suits(fields.get("runs")?, completed_runs)?;

        let stock = decode_pile(fields.get("stock")?)?;
        let mut tableau: [Vec<Card>; PILE_COUNT] = std::array::from_fn(|_| Vec::new());
        for (col, pile) in tableau.iter_mut().enumerate() {
            let key = format!("t{col}");
            *pile = decode_pile(fields.get(key.as_str())?)?;
        }

        // Card conservation: in-play cards plus retired runs must account
        // for the full deck, and no id may appear twice.
        let tableau_count: usize = tableau.iter().map(Vec::len).sum();
        if stock.len() + tableau_count + (completed_runs * 13) != DECK_SIZE {
            return None;
        }
        let mut seen = HashSet::new();
        for card in stock.iter().chain(tableau.iter().flatten()) {
            if !seen.insert(card.id) {
                return None;
            }
        }

        Some(Self {
            suit_mode,
            stock,
            tableau,
            completed_runs,
            completed_run_suits,
        })
    }
}

#[cfg(test)]
impl SpiderGame {
    pub(crate) fn debug_new(
        suit_mode: SuitMode,
        stock: Vec<Card>,
        tableau: [Vec<Card>; PILE_COUNT],
        completed_runs: usize,
    ) -> Self {
        Self {
            suit_mode,
            stock,
            tableau,
            completed_runs,
            completed_run_suits: vec![Suit::Spades; completed_runs],
        }
    }
}

/// Drop legality: an empty pile accepts anything; otherwise the destination
/// top must be face-up and one rank above the moving card. Suit does not
/// matter across piles, only within the run being picked up.
pub fn can_stack_tableau(top: Option<&Card>, card: Card) -> bool {
    match top {
        None => true,
        Some(top_card) => top_card.face_up && top_card.rank == card.rank + 1,
    }
}

fn is_descending_suited_run(cards: &[Card]) -> bool {
    cards.windows(2).all(|pair| {
        let a = pair[0];
        let b = pair[1];
        a.face_up && b.face_up && a.suit == b.suit && a.rank == b.rank + 1
    })
}

fn complete_suited_run_suit(pile: &[Card]) -> Option<Suit> {
    if pile.len() < 13 {
        return None;
    }

    let run = &pile[pile.len() - 13..];
    let first = run[0];
    if first.rank != 13 || !first.face_up {
        return None;
    }

    let valid =
        is_descending_suited_run(run) && run.last().is_some_and(|card| card.rank == 1);
    if valid {
        Some(first.suit)
    } else {
        None
    }
}

fn encode_pile(cards: &[Card]) -> String {
    if cards.is_empty() {
        return "-".to_string();
    }
    cards
        .iter()
        .map(|card| {
            let face = if card.face_up { 'U' } else { 'D' };
            format!("{}{}{}:{}", card.suit.short(), card.rank, face, card.id)
        })
        .collect::<Vec<_>>()
        .join(".")
}

fn decode_pile(encoded: &str) -> Option<Vec<Card>> {
    if encoded == "-" {
        return Some(Vec::new());
    }
    let mut cards = Vec::new();
    for token in encoded.split('.') {
        let (body, id_raw) = token.split_once(':')?;
        let id = id_raw.parse::<u32>().ok()?;
        let mut chars = body.chars();
        let suit = match chars.next()? {
            'C' => Suit::Clubs,
            'D' => Suit::Diamonds,
            'H' => Suit::Hearts,
            'S' => Suit::Spades,
            _ => return None,
        };
        let face = match body.chars().last()? {
            'U' => true,
            'D' => false,
            _ => return None,
        };
        if body.len() < 3 {
            return None;
        }
        let rank = body[1..body.len() - 1].parse::<u8>().ok()?;
        if !(1..=13).contains(&rank) {
            return None;
        }
        cards.push(Card {
            suit,
            rank,
            face_up: face,
            id,
        });
    }
    Some(cards)
}

fn encode_run_suits(suits: &[Suit]) -> String {
    if suits.is_empty() {
        return "-".to_string();
    }
    suits
        .iter()
        .map(|suit| suit.short())
        .collect::<Vec<_>>()
        .concat()
}

fn decode_run_suits(encoded: &str, completed_runs: usize) -> Option<Vec<Suit>> {
    if encoded == "-" {
        return if completed_runs == 0 {
            Some(Vec::new())
        } else {
            None
        };
    }

    let mut suits = Vec::with_capacity(encoded.len());
    for ch in encoded.chars() {
        let suit = match ch {
            'C' => Suit::Clubs,
            'D' => Suit::Diamonds,
            'H' => Suit::Hearts,
            'S' => Suit::Spades,
            _ => return None,
        };
        suits.push(suit);
    }

    if suits.len() != completed_runs {
        return None;
    }

    Some(suits)
}
