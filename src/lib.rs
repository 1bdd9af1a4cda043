//! War Table - card rendering for a two-player game of War
//!
//! This library turns the state of an external War engine into a painted
//! board: cards are cropped from a shared atlas, placed on fixed slots and
//! redrawn whenever the engine reports a change.
//!
//! ## Synchronization
//!
//! The `scene` module wraps the engine in an adapter that publishes five
//! facets (player, deck, game, outcome, last-round winner) after every
//! engine call. The scene controller and any shell widgets subscribe to
//! those facets instead of reading engine internals.

pub mod config;
pub mod game;
pub mod render;
pub mod scene;

pub use config::Settings;
pub use game::{Card, GameEngine, Outcome, Rank, Seat, Suit, WarGame};
pub use scene::{Facet, SceneController, SceneError, ScenePhase};
