use std::fmt;

use serde::{Deserialize, Serialize};
use strum::EnumString;

// Useful balatro docs: https://balatrogame.fandom.com/wiki/Card_Ranks

/// Card rank. Named `Rank` (the spec's clause-modifier name) rather than
/// the teacher's `Value`.
#[derive(Serialize, Deserialize, PartialEq, PartialOrd, Eq, Ord, Debug, Clone, Copy, Hash, EnumString)]
pub enum Rank {
    Two = 0,
    Three = 1,
    Four = 2,
    Five = 3,
    Six = 4,
    Seven = 5,
    Eight = 6,
    Nine = 7,
    Ten = 8,
    Jack = 9,
    Queen = 10,
    King = 11,
    Ace = 12,
}

/// Constant of all the ranks. This is what `Rank::ranks()` returns.
const RANKS: [Rank; 13] = [
    Rank::Two,
    Rank::Three,
    Rank::Four,
    Rank::Five,
    Rank::Six,
    Rank::Seven,
    Rank::Eight,
    Rank::Nine,
    Rank::Ten,
    Rank::Jack,
    Rank::Queen,
    Rank::King,
    Rank::Ace,
];

impl Rank {
    pub const fn ranks() -> [Self; 13] {
        RANKS
    }
}

impl From<Rank> for char {
    fn from(rank: Rank) -> Self {
        match rank {
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        }
    }
}

/// Enum for the four different suits.
#[derive(Serialize, Deserialize, PartialEq, PartialOrd, Eq, Ord, Debug, Clone, Copy, Hash, EnumString)]
pub enum Suit {
    Spade = 0,
    Club = 1,
    Heart = 2,
    Diamond = 3,
}

/// All of the `Suit`'s. This is what `Suit::suits()` returns.
const SUITS: [Suit; 4] = [Suit::Spade, Suit::Club, Suit::Heart, Suit::Diamond];

impl Suit {
    pub const fn suits() -> [Self; 4] {
        SUITS
    }

    pub fn unicode(&self) -> &str {
        match self {
            Self::Spade => "♤",
            Self::Club => "♧",
            Self::Heart => "♡",
            Self::Diamond => "♢",
        }
    }
}

impl From<Suit> for char {
    fn from(value: Suit) -> Self {
        match value {
            Suit::Spade => 's',
            Suit::Club => 'c',
            Suit::Heart => 'h',
            Suit::Diamond => 'd',
        }
    }
}

/// Enum for card enhancements.
#[derive(Serialize, Deserialize, PartialEq, PartialOrd, Eq, Ord, Debug, Clone, Copy, Hash, EnumString)]
pub enum Enhancement {
    Bonus,
    Mult,
    Wild,
    Glass,
    Steel,
    Stone,
    Gold,
    Lucky,
}

/// Enum for card/joker editions (spec §3 modifiers, §4.7 thresholds).
#[derive(Serialize, Deserialize, PartialEq, PartialOrd, Eq, Ord, Debug, Clone, Copy, Hash, Default, EnumString)]
pub enum Edition {
    #[default]
    Base,
    Foil,
    Holographic,
    Polychrome,
    Negative,
}

/// Enum for card seals.
#[derive(Serialize, Deserialize, PartialEq, PartialOrd, Eq, Ord, Debug, Clone, Copy, Hash, EnumString)]
pub enum Seal {
    Gold,
    Red,
    Blue,
    Purple,
}

/// A single generated playing card, as produced inside a standard pack or
/// a shop's standard-card slot: rank, suit, and the optional modifiers a
/// `PlayingCard` clause can filter on (spec §4.6).
///
/// Unlike the teacher's `Card`, this one carries no identity counter: a
/// search never holds more than one card in hand at a time, so there is
/// nothing to disambiguate.
#[derive(Serialize, Deserialize, PartialEq, PartialOrd, Eq, Ord, Clone, Copy, Hash)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
    pub edition: Edition,
    pub enhancement: Option<Enhancement>,
    pub seal: Option<Seal>,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Self {
            rank,
            suit,
            edition: Edition::Base,
            enhancement: None,
            seal: None,
        }
    }

    pub fn is_face(&self) -> bool {
        matches!(self.rank, Rank::Jack | Rank::Queen | Rank::King)
    }

    pub fn is_even(&self) -> bool {
        self.rank != Rank::Ace && !self.is_face() && self.rank as u16 % 2 == 0
    }

    pub fn is_odd(&self) -> bool {
        self.rank == Rank::Ace || (!self.is_face() && self.rank as u16 % 2 != 0)
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Card({}{})", char::from(self.rank), self.suit.unicode())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", char::from(self.rank), self.suit.unicode())
    }
}
