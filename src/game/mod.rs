//! Game engine collaborator
//!
//! Card data, the deck, players and the engine interface the board talks to.
//! The rules themselves live behind [`GameEngine`]; the rest of the crate
//! only reads the views it hands out.

pub mod cards;
pub mod deck;
pub mod engine;
pub mod player;

pub use cards::{Card, Orientation, Rank, Suit, UnknownKind};
pub use deck::Deck;
pub use engine::{EngineError, GameEngine, Outcome, RoundOutcome, WarGame};
pub use player::{Player, PlayerView, Seat};
