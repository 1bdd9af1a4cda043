//! Players and seats

use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::cards::Card;

/// A player's fixed position at the table.
///
/// Seats are the only identity used to pick board slots; player objects
/// handed out by an engine may be fresh instances on every query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Seat {
    One,
    Two,
}

impl Seat {
    pub const BOTH: [Seat; 2] = [Seat::One, Seat::Two];

    /// Zero-based index
    pub fn index(&self) -> usize {
        match self {
            Seat::One => 0,
            Seat::Two => 1,
        }
    }

    pub fn from_index(index: usize) -> Option<Seat> {
        match index {
            0 => Some(Seat::One),
            1 => Some(Seat::Two),
            _ => None,
        }
    }

    pub fn opponent(&self) -> Seat {
        match self {
            Seat::One => Seat::Two,
            Seat::Two => Seat::One,
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player {}", self.index() + 1)
    }
}

/// A player and their hand (front = next card to play)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    hand: VecDeque<Card>,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hand: VecDeque::new(),
        }
    }

    /// Put a card at the bottom of the hand, face down
    pub fn take(&mut self, card: Card) {
        self.hand.push_back(card.face_down());
    }

    pub fn take_all(&mut self, cards: impl IntoIterator<Item = Card>) {
        for card in cards {
            self.take(card);
        }
    }

    /// Play the front card
    pub fn play(&mut self) -> Option<Card> {
        self.hand.pop_front()
    }

    pub fn hand(&self) -> &VecDeque<Card> {
        &self.hand
    }

    pub fn card_count(&self) -> usize {
        self.hand.len()
    }

    pub fn clear(&mut self) {
        self.hand.clear();
    }
}

/// Read-only copy of a player handed out to observers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerView {
    pub seat: Seat,
    pub name: String,
    pub cards: Vec<Card>,
}

impl PlayerView {
    pub fn of(seat: Seat, player: &Player) -> Self {
        Self {
            seat,
            name: player.name.clone(),
            cards: player.hand().iter().copied().collect(),
        }
    }

    /// The next card this player would play
    pub fn top_card(&self) -> Option<&Card> {
        self.cards.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::cards::{Rank, Suit};

    #[test]
    fn test_hand_is_fifo() {
        let mut player = Player::new("yungselm");
        player.take(Card::new(Rank::Two, Suit::Hearts));
        player.take(Card::new(Rank::Ace, Suit::Clubs).face_up());

        assert_eq!(player.card_count(), 2);
        assert_eq!(player.play().map(|c| c.rank), Some(Rank::Two));
        let next = player.play().unwrap();
        assert_eq!(next.rank, Rank::Ace);
        assert!(!next.is_face_up());
        assert_eq!(player.play(), None);
    }

    #[test]
    fn test_seat_index() {
        assert_eq!(Seat::from_index(0), Some(Seat::One));
        assert_eq!(Seat::from_index(1), Some(Seat::Two));
        assert_eq!(Seat::from_index(2), None);
        assert_eq!(Seat::Two.opponent(), Seat::One);
    }

    #[test]
    fn test_view_top_card() {
        let mut player = Player::new("COM");
        player.take(Card::new(Rank::King, Suit::Spades));
        let view = PlayerView::of(Seat::Two, &player);
        assert_eq!(view.top_card().map(|c| c.rank), Some(Rank::King));
        assert_eq!(view.seat, Seat::Two);
    }
}
