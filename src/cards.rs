use std::cmp::Ordering;
use std::fmt;

use crate::error::{SolverError, SolverResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
    Ace = 1,
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Nine = 9,
    Ten = 10,
    Jack = 11,
    Queen = 12,
    King = 13,
}

impl Rank {
    pub fn from_code(code: &str) -> SolverResult<Rank> {
        match code {
            "A" => Ok(Rank::Ace),
            "2" => Ok(Rank::Two),
            "3" => Ok(Rank::Three),
            "4" => Ok(Rank::Four),
            "5" => Ok(Rank::Five),
            "6" => Ok(Rank::Six),
            "7" => Ok(Rank::Seven),
            "8" => Ok(Rank::Eight),
            "9" => Ok(Rank::Nine),
            "10" => Ok(Rank::Ten),
            "J" => Ok(Rank::Jack),
            "Q" => Ok(Rank::Queen),
            "K" => Ok(Rank::King),
            _ => Err(SolverError::InvalidRank(code.to_string())),
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }

    /// Ace-low value, 1..=13.
    pub fn value(self) -> u8 {
        self as u8
    }

    /// Value with the Ace promoted above the King (Q,K,A runs).
    pub fn ace_high_value(self) -> u8 {
        match self {
            Rank::Ace => 14,
            r => r.value(),
        }
    }
}

/// All ranks in value order, Ace low.
pub const ALL_RANKS: [Rank; 13] = [
    Rank::Ace,
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
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

impl Suit {
    pub fn from_code(c: char) -> SolverResult<Suit> {
        match c {
            'S' => Ok(Suit::Spades),
            'H' => Ok(Suit::Hearts),
            'D' => Ok(Suit::Diamonds),
            'C' => Ok(Suit::Clubs),
            _ => Err(SolverError::InvalidSuit(c)),
        }
    }

    pub fn code(self) -> char {
        match self {
            Suit::Spades => 'S',
            Suit::Hearts => 'H',
            Suit::Diamonds => 'D',
            Suit::Clubs => 'C',
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Suit::Spades => "\u{2660}",
            Suit::Hearts => "\u{2665}",
            Suit::Diamonds => "\u{2666}",
            Suit::Clubs => "\u{2663}",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

pub const ALL_SUITS: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Card {
        Card { rank, suit }
    }

    /// Packed index in [0, 52): 13 slots per suit, Ace low.
    pub fn index(self) -> usize {
        self.suit.index() * 13 + (self.rank.value() as usize - 1)
    }

    pub fn from_index(index: usize) -> Card {
        Card::new(ALL_RANKS[index % 13], ALL_SUITS[index / 13])
    }

    /// Canonical textual code, e.g. `AS`, `10H`, `KD`.
    pub fn code(self) -> String {
        format!("{}{}", self.rank.code(), self.suit.code())
    }

    /// Rank plus suit symbol, e.g. `A\u{2660}`.
    pub fn pretty(self) -> String {
        format!("{}{}", self.rank.code(), self.suit.symbol())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.code(), self.suit.code())
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Card {
    fn cmp(&self, other: &Self) -> Ordering {
        self.suit.cmp(&other.suit).then(self.rank.cmp(&other.rank))
    }
}

/// Parse a single card code. Codes are uppercase and case-sensitive:
/// `A|2..9|10|J|Q|K` followed by `S|H|D|C`.
pub fn parse_card(code: &str) -> SolverResult<Card> {
    let code = code.trim();
    let chars: Vec<char> = code.chars().collect();
    if chars.len() < 2 || chars.len() > 3 {
        return Err(SolverError::MalformedCode(code.to_string()));
    }
    let rank_part: String = chars[..chars.len() - 1].iter().collect();
    let suit_char = chars[chars.len() - 1];
    let rank = Rank::from_code(&rank_part)
        .map_err(|_| SolverError::MalformedCode(code.to_string()))?;
    let suit = Suit::from_code(suit_char)
        .map_err(|_| SolverError::MalformedCode(code.to_string()))?;
    Ok(Card::new(rank, suit))
}

/// Parse a whitespace- or comma-separated list of card codes.
pub fn parse_cards(input: &str) -> SolverResult<Vec<Card>> {
    input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(parse_card)
        .collect()
}
