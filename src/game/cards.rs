//! Card kinds and orientation
//!
//! A standard 52-card deck: thirteen ranks, four suits. Cards carry an
//! orientation so the renderer knows whether to show the face or the back.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Card rank, ordered from lowest (Two) to highest (Ace)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    /// All ranks in ascending order
    pub const ALL: [Rank; 13] = [
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

    /// Full name, as used in asset tables
    pub fn name(&self) -> &'static str {
        match self {
            Rank::Two => "Two",
            Rank::Three => "Three",
            Rank::Four => "Four",
            Rank::Five => "Five",
            Rank::Six => "Six",
            Rank::Seven => "Seven",
            Rank::Eight => "Eight",
            Rank::Nine => "Nine",
            Rank::Ten => "Ten",
            Rank::Jack => "Jack",
            Rank::Queen => "Queen",
            Rank::King => "King",
            Rank::Ace => "Ace",
        }
    }

    /// Short glyph printed in the card corner
    pub fn symbol(&self) -> &'static str {
        match self {
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
            Rank::Ace => "A",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Rank {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rank::ALL
            .iter()
            .copied()
            .find(|rank| rank.name().eq_ignore_ascii_case(s) || rank.symbol() == s)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

/// Card suit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Hearts,
    Diamonds,
    Spades,
    Clubs,
}

impl Suit {
    /// All suits, in atlas row order
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Spades, Suit::Clubs];

    pub fn name(&self) -> &'static str {
        match self {
            Suit::Hearts => "Hearts",
            Suit::Diamonds => "Diamonds",
            Suit::Spades => "Spades",
            Suit::Clubs => "Clubs",
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Suit {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Suit::ALL
            .iter()
            .copied()
            .find(|suit| suit.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

/// A rank or suit name that is not part of the standard deck
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown card kind: {0}")]
pub struct UnknownKind(pub String);

/// Which side of the card faces up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    Front,
    Back,
}

/// A playing card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
    pub orientation: Orientation,
}

impl Card {
    /// Create a face-down card
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Self {
            rank,
            suit,
            orientation: Orientation::Back,
        }
    }

    /// Same card, turned to the given side
    pub fn with_orientation(self, orientation: Orientation) -> Self {
        Self {
            orientation,
            ..self
        }
    }

    pub fn face_up(self) -> Self {
        self.with_orientation(Orientation::Front)
    }

    pub fn face_down(self) -> Self {
        self.with_orientation(Orientation::Back)
    }

    pub fn is_face_up(&self) -> bool {
        self.orientation == Orientation::Front
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {}", self.rank, self.suit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_card_is_face_down() {
        let card = Card::new(Rank::Ace, Suit::Spades);
        assert_eq!(card.rank, Rank::Ace);
        assert_eq!(card.suit, Suit::Spades);
        assert!(!card.is_face_up());
        assert!(card.face_up().is_face_up());
    }

    #[test]
    fn test_rank_ordering() {
        assert!(Rank::Two < Rank::Three);
        assert!(Rank::King < Rank::Ace);
        assert_eq!(Rank::ALL.len(), 13);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("Queen".parse::<Rank>(), Ok(Rank::Queen));
        assert_eq!("10".parse::<Rank>(), Ok(Rank::Ten));
        assert_eq!("clubs".parse::<Suit>(), Ok(Suit::Clubs));
        assert_eq!(
            "Joker".parse::<Rank>(),
            Err(UnknownKind("Joker".to_string()))
        );
        assert!("Stars".parse::<Suit>().is_err());
    }

    #[test]
    fn test_display() {
        let card = Card::new(Rank::Ten, Suit::Hearts);
        assert_eq!(card.to_string(), "Ten of Hearts");
        assert_eq!(Suit::Clubs.to_string(), "Clubs");
    }
}
