//! The shared 52-card deck

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::cards::{Card, Rank, Suit};

/// An ordered pile of cards; the last card is the top
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Full deck, face down, suit by suit
    pub fn new() -> Self {
        let cards = Suit::ALL
            .iter()
            .flat_map(|&suit| Rank::ALL.iter().map(move |&rank| Card::new(rank, suit)))
            .collect();
        Self { cards }
    }

    /// Build a deck from explicit cards (top card last)
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Shuffle with the thread RNG, or deterministically when seeded
    pub fn shuffle(&mut self, seed: Option<u64>) {
        match seed {
            Some(seed) => self.cards.shuffle(&mut StdRng::seed_from_u64(seed)),
            None => self.cards.shuffle(&mut rand::thread_rng()),
        }
    }

    /// Take the top card
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}
