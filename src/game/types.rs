#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    pub fn is_red(self) -> bool {
        matches!(self, Suit::Diamonds | Suit::Hearts)
    }

    pub fn short(self) -> &'static str {
        match self {
            Suit::Clubs => "C",
            Suit::Diamonds => "D",
            Suit::Hearts => "H",
            Suit::Spades => "S",
        }
    }
}

/// Opaque per-game card identity, assigned by the deck builder and never
/// reused within a game. Travels with the card through moves and snapshots.
pub type CardId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    pub suit: Suit,
    pub rank: u8,
    pub face_up: bool,
    pub id: CardId,
}

impl Card {
    pub fn label(&self) -> String {
        format!("{}{}", rank_label(self.rank), self.suit.short())
    }

    pub fn color_red(&self) -> bool {
        self.suit.is_red()
    }
}

/// Suit-count variant. Every mode plays with 104 cards and wins at eight
/// completed King-to-Ace sequences; the mode only changes deck composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SuitMode {
    One,
    Two,
    Four,
}

impl SuitMode {
    pub const ALL: [SuitMode; 3] = [SuitMode::One, SuitMode::Two, SuitMode::Four];

    pub fn suit_count(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Four => 4,
        }
    }

    pub fn from_suit_count(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::One),
            2 => Some(Self::Two),
            4 => Some(Self::Four),
            _ => None,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Self::One => "1-suit",
            Self::Two => "2-suit",
            Self::Four => "4-suit",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::One => "1 Suit (Easy)",
            Self::Two => "2 Suits (Medium)",
            Self::Four => "4 Suits (Hard)",
        }
    }
}

pub fn rank_label(rank: u8) -> &'static str {
    match rank {
        1 => "A",
        2 => "2",
        3 => "3",
        4 => "4",
        5 => "5",
        6 => "6",
        7 => "7",
        8 => "8",
        9 => "9",
        10 => "10",
        11 => "J",
        12 => "Q",
        13 => "K",
        _ => "?",
    }
}
