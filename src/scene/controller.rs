//! Scene controller
//!
//! Drives the game from user actions and keeps the board in step with the
//! engine. The controller listens to the adapter's facets through an inbox
//! and only redraws what the notifications it received call for.
//!
//! Phases: `Idle` -> `Ready` (start_game) -> `RoundInProgress` (play_round)
//! -> `GameOver` (engine reports game over). `start_game` from any phase
//! starts a fresh game.

use std::cell::RefCell;
use std::collections::{BTreeSet, VecDeque};
use std::path::Path;
use std::rc::Rc;

use super::adapter::{GameSnapshot, GameStateAdapter};
use super::notify::{Facet, SubscriptionId};
use crate::config::{ConfigError, Settings};
use crate::game::cards::Card;
use crate::game::engine::{EngineError, GameEngine, RoundOutcome, WarGame};
use crate::game::player::Seat;
use crate::render::artifacts::{ArtifactError, ArtifactStore};
use crate::render::atlas::AtlasError;
use crate::render::board::{BoardRenderer, DrawList, PlacedSprite, RenderReport};
use crate::render::layout::{position_for, LayoutError, Slot, SlotRole};
use crate::render::sprites::{SpriteCache, SpriteError, SpriteHandle};

/// Where the game is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenePhase {
    /// No game started
    Idle,
    /// Cards dealt, nothing played yet
    Ready,
    /// At least one round played
    RoundInProgress,
    /// The engine declared the game over
    GameOver,
}

/// Everything that is currently on the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneState {
    pub phase: ScenePhase,
    pub draw_list: DrawList,
    pub rounds: u32,
}

impl SceneState {
    fn new() -> Self {
        Self {
            phase: ScenePhase::Idle,
            draw_list: DrawList::new(),
            rounds: 0,
        }
    }
}

/// Errors reported to the shell
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("Game not initialized: start a game first")]
    GameNotInitialized,
    #[error("Game already over")]
    GameAlreadyOver,
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Engine rejected the call: {0}")]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Atlas(#[from] AtlasError),
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error(transparent)]
    Sprite(#[from] SpriteError),
    #[error(transparent)]
    Artifact(#[from] ArtifactError),
}

impl SceneError {
    /// Sequencing and resource errors are recoverable; bad settings or a
    /// broken atlas or layout table are not
    pub fn is_recoverable(&self) -> bool {
        match self {
            SceneError::GameNotInitialized
            | SceneError::GameAlreadyOver
            | SceneError::Engine(_)
            | SceneError::Artifact(_) => true,
            SceneError::Sprite(SpriteError::Atlas(_)) => false,
            SceneError::Sprite(SpriteError::AssetLoad { .. }) => true,
            SceneError::Config(_) | SceneError::Atlas(_) | SceneError::Layout(_) => false,
        }
    }
}

/// Result of a successful `play_round`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundReport {
    pub round: RoundOutcome,
    pub render: RenderReport,
}

/// Which user action the pending notifications belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Start,
    Round,
}

/// Owns the engine adapter, sprite cache and board renderer
pub struct SceneController<E: GameEngine> {
    adapter: GameStateAdapter<E>,
    sprites: SpriteCache,
    renderer: BoardRenderer,
    artifacts: Option<ArtifactStore>,
    show_war_pile: bool,
    state: SceneState,
    inbox: Rc<RefCell<VecDeque<Facet>>>,
    inbox_subscription: SubscriptionId,
}

impl SceneController<WarGame> {
    /// Load assets and build a controller around the reference engine
    pub fn from_settings(settings: &Settings) -> Result<Self, SceneError> {
        let sprites = SpriteCache::load(&settings.assets, settings.card)?;
        Self::new(WarGame::from_settings(&settings.engine), sprites, settings)
    }
}

impl<E: GameEngine> SceneController<E> {
    /// Build a controller and paint the idle table.
    ///
    /// Settings are validated first; geometry the board cannot draw is a
    /// `Config` error.
    pub fn new(engine: E, sprites: SpriteCache, settings: &Settings) -> Result<Self, SceneError> {
        settings.validate().map_err(report)?;

        let mut adapter = GameStateAdapter::new(engine);
        let inbox: Rc<RefCell<VecDeque<Facet>>> = Rc::default();
        let sink = Rc::clone(&inbox);
        let inbox_subscription = adapter.subscribe_all(move |facet, _| {
            sink.borrow_mut().push_back(facet);
        });

        let mut controller = Self {
            adapter,
            sprites,
            renderer: BoardRenderer::new(settings.board.clone(), settings.card),
            artifacts: settings.artifacts.dir.as_ref().map(ArtifactStore::new),
            show_war_pile: settings.board.show_war_pile,
            state: SceneState::new(),
            inbox,
            inbox_subscription,
        };
        controller.place_center_deck()?;
        controller.repaint();
        Ok(controller)
    }

    /// Subscribe the shell to one facet (labels, counters)
    pub fn subscribe<F>(&mut self, facet: Facet, callback: F) -> SubscriptionId
    where
        F: FnMut(Facet, &GameSnapshot) + 'static,
    {
        self.adapter.subscribe(facet, callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        id != self.inbox_subscription && self.adapter.unsubscribe(id)
    }

    /// Deal a new game and show both players' decks
    pub fn start_game(&mut self) -> Result<RenderReport, SceneError> {
        if self.state.phase != ScenePhase::Idle {
            log::info!("Restarting game");
            self.adapter.reset();
            self.sprites.clear();
            if let Some(store) = &self.artifacts {
                store.purge();
            }
        }

        self.inbox.borrow_mut().clear();
        if let Err(e) = self.adapter.initialize() {
            // The engine may already be reset, so the board goes back to Idle
            self.state = SceneState::new();
            self.place_center_deck()?;
            self.repaint();
            return Err(report(e));
        }

        self.state = SceneState::new();
        self.state.phase = ScenePhase::Ready;
        let facets = self.drain_inbox();
        self.apply(Action::Start, &facets).map_err(report)?;

        log::info!("Game started");
        Ok(self.repaint())
    }

    /// Play one round and show the cards that decided it
    pub fn play_round(&mut self) -> Result<RoundReport, SceneError> {
        match self.state.phase {
            ScenePhase::Idle => return Err(report(SceneError::GameNotInitialized)),
            ScenePhase::GameOver => return Err(report(SceneError::GameAlreadyOver)),
            ScenePhase::Ready | ScenePhase::RoundInProgress => {}
        }

        let round = self.adapter.play_round().map_err(report)?;
        self.state.rounds += 1;
        self.state.phase = ScenePhase::RoundInProgress;

        let facets = self.drain_inbox();
        self.apply(Action::Round, &facets).map_err(report)?;

        Ok(RoundReport {
            round,
            render: self.repaint(),
        })
    }

    /// Remove every on-disk artifact of this session. Best effort.
    pub fn end_session(&mut self) -> usize {
        let removed = self.artifacts.as_ref().map_or(0, ArtifactStore::purge);
        self.sprites.clear();
        log::info!("Session ended after {} rounds", self.state.rounds);
        removed
    }

    pub fn phase(&self) -> ScenePhase {
        self.state.phase
    }

    pub fn state(&self) -> &SceneState {
        &self.state
    }

    pub fn draw_list(&self) -> &DrawList {
        &self.state.draw_list
    }

    pub fn snapshot(&self) -> &GameSnapshot {
        self.adapter.snapshot()
    }

    pub fn sprites(&self) -> &SpriteCache {
        &self.sprites
    }

    pub fn renderer(&self) -> &BoardRenderer {
        &self.renderer
    }

    /// Write the current board as a PNG
    pub fn save_board(&self, path: impl AsRef<Path>) -> Result<(), image::ImageError> {
        self.renderer.save_png(path)
    }

    fn drain_inbox(&self) -> BTreeSet<Facet> {
        self.inbox.borrow_mut().drain(..).collect()
    }

    /// React to the facets published for an action
    fn apply(&mut self, action: Action, facets: &BTreeSet<Facet>) -> Result<(), SceneError> {
        if action == Action::Start && facets.contains(&Facet::Player) {
            self.place_decks()?;
        }
        if action == Action::Round && facets.contains(&Facet::Game) {
            self.place_round_cards()?;
        }
        if facets.contains(&Facet::Outcome) && self.adapter.snapshot().game_over {
            self.state.phase = ScenePhase::GameOver;
            log::info!(
                "Game over after {} rounds: {:?}",
                self.state.rounds,
                self.adapter.snapshot().outcome
            );
        }
        Ok(())
    }

    fn place_center_deck(&mut self) -> Result<(), SceneError> {
        if self.adapter.snapshot().deck_len > 0 {
            let (x, y) = position_for(Seat::One.index(), SlotRole::StartDeck)?;
            self.state.draw_list.push(PlacedSprite {
                x,
                y,
                handle: SpriteHandle::Back,
                slot: Slot::CenterDeck,
            });
        }
        Ok(())
    }

    /// Each player's next card, face down, on their deck slot
    fn place_decks(&mut self) -> Result<(), SceneError> {
        let tops: Vec<(Seat, Card)> = self
            .adapter
            .snapshot()
            .players
            .iter()
            .filter_map(|p| p.top_card().map(|card| (p.seat, *card)))
            .collect();
        for (seat, card) in tops {
            self.place(seat, SlotRole::Deck, card)?;
        }
        Ok(())
    }

    /// The deciding face-up pair, plus the war pile if there was a war
    fn place_round_cards(&mut self) -> Result<(), SceneError> {
        let snapshot = self.adapter.snapshot();
        let played = snapshot.last_played;
        let war = snapshot.last_war_cards.filter(|_| self.show_war_pile);

        if let Some(cards) = war {
            for (seat, card) in Seat::BOTH.into_iter().zip(cards) {
                self.place(seat, SlotRole::War, card)?;
            }
        }
        if let Some(cards) = played {
            for (seat, card) in Seat::BOTH.into_iter().zip(cards) {
                self.place(seat, SlotRole::Active, card)?;
            }
        }
        Ok(())
    }

    /// Resolve a card for a slot and append it to the draw list
    fn place(&mut self, seat: Seat, role: SlotRole, card: Card) -> Result<(), SceneError> {
        let card = if role.shows_face() {
            card.face_up()
        } else {
            card.face_down()
        };
        let (x, y) = position_for(seat.index(), role)?;
        let handle = self.sprites.resolve(&card)?;

        if card.is_face_up() {
            if let Some(store) = &self.artifacts {
                // The file is complete before the sprite is published
                let image = self.sprites.image_for(&card)?;
                if let Err(e) = store.export(seat, image) {
                    log::warn!("Could not export artifact for {}: {}", seat, e);
                }
            }
        }

        log::debug!("Placing {} for {} at {} ({}, {})", card, seat, role, x, y);
        self.state.draw_list.push(PlacedSprite {
            x,
            y,
            handle,
            slot: Slot::new(seat, role),
        });
        Ok(())
    }

    fn repaint(&mut self) -> RenderReport {
        let report = self.renderer.invalidate(&self.state.draw_list, &self.sprites);
        if !report.is_clean() {
            log::warn!("Repaint skipped {} sprites", report.skipped.len());
        }
        report
    }
}

/// Log an error at the controller boundary and hand it back
fn report(error: impl Into<SceneError>) -> SceneError {
    let error = error.into();
    if error.is_recoverable() {
        log::warn!("{}", error);
    } else {
        log::error!("{}", error);
    }
    error
}
