//! Game-state adapter
//!
//! Wraps the engine, mirrors its state into a read-only snapshot after every
//! mutating call and publishes all five facets. It never diffs: every facet
//! fires after every successful `initialize` or `play_round`, changed or not.

use super::notify::{Facet, SubscriptionId, Subscribers};
use crate::game::cards::Card;
use crate::game::engine::{EngineError, GameEngine, Outcome, RoundOutcome};
use crate::game::player::{PlayerView, Seat};

/// Read-only copy of the engine state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    /// Seat one first
    pub players: [PlayerView; 2],
    pub deck_len: usize,
    pub last_played: Option<[Card; 2]>,
    pub last_war_cards: Option<[Card; 2]>,
    pub outcome: Outcome,
    pub game_over: bool,
    pub last_round_winner: Option<Seat>,
    pub initialized: bool,
}

impl GameSnapshot {
    /// Read the engine's current state
    pub fn capture(engine: &impl GameEngine) -> Self {
        Self {
            players: engine.players(),
            deck_len: engine.deck_len(),
            last_played: engine.last_played(),
            last_war_cards: engine.last_war_cards(),
            outcome: engine.outcome(),
            game_over: engine.is_game_over(),
            last_round_winner: engine.last_round_winner(),
            initialized: engine.is_initialized(),
        }
    }

    pub fn player(&self, seat: Seat) -> &PlayerView {
        &self.players[seat.index()]
    }

    /// Seat of the player with the given name
    pub fn seat_named(&self, name: &str) -> Option<Seat> {
        self.players.iter().find(|p| p.name == name).map(|p| p.seat)
    }
}

/// Engine wrapper with facet notifications
pub struct GameStateAdapter<E: GameEngine> {
    engine: E,
    snapshot: GameSnapshot,
    subscribers: Subscribers,
}

impl<E: GameEngine> GameStateAdapter<E> {
    pub fn new(engine: E) -> Self {
        let snapshot = GameSnapshot::capture(&engine);
        Self {
            engine,
            snapshot,
            subscribers: Subscribers::new(),
        }
    }

    pub fn subscribe<F>(&mut self, facet: Facet, callback: F) -> SubscriptionId
    where
        F: FnMut(Facet, &GameSnapshot) + 'static,
    {
        self.subscribers.subscribe(facet, callback)
    }

    pub fn subscribe_all<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(Facet, &GameSnapshot) + 'static,
    {
        self.subscribers.subscribe_all(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    /// Initialize the engine, then publish every facet
    pub fn initialize(&mut self) -> Result<(), EngineError> {
        self.engine.initialize()?;
        self.refresh_and_notify();
        Ok(())
    }

    /// Play one round, then publish every facet
    pub fn play_round(&mut self) -> Result<RoundOutcome, EngineError> {
        let round = self.engine.play_round()?;
        self.refresh_and_notify();
        Ok(round)
    }

    /// Reset the engine. The mirror is refreshed; nothing is published.
    pub fn reset(&mut self) {
        self.engine.reset();
        self.snapshot = GameSnapshot::capture(&self.engine);
    }

    /// Latest mirror of the engine state
    pub fn snapshot(&self) -> &GameSnapshot {
        &self.snapshot
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    fn refresh_and_notify(&mut self) {
        // Player views may be fresh objects on every query; never keep old ones
        self.snapshot = GameSnapshot::capture(&self.engine);
        for facet in Facet::ALL {
            self.subscribers.publish(facet, &self.snapshot);
        }
    }
}
