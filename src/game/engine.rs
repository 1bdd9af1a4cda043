//! Game engine interface and the reference War engine
//!
//! Everything outside this module talks to the engine through the
//! [`GameEngine`] trait only. [`WarGame`] is the bundled implementation of
//! the classic rules: both players flip their front card, the higher rank
//! takes both, and equal ranks start a war.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::cards::Card;
use super::deck::Deck;
use super::player::{Player, PlayerView, Seat};
use crate::config::settings::EngineSettings;

/// Overall result of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    InProgress,
    Player1Wins,
    Player2Wins,
    Tie,
}

impl Outcome {
    /// Outcome where the given seat won
    pub fn won_by(seat: Seat) -> Self {
        match seat {
            Seat::One => Outcome::Player1Wins,
            Seat::Two => Outcome::Player2Wins,
        }
    }

    pub fn winner(&self) -> Option<Seat> {
        match self {
            Outcome::Player1Wins => Some(Seat::One),
            Outcome::Player2Wins => Some(Seat::Two),
            _ => None,
        }
    }

    pub fn is_decided(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }
}

/// Result of a single `play_round` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundOutcome {
    /// Who took the pot (None if nobody could)
    pub winner: Option<Seat>,
    /// Number of wars fought during the round
    pub wars: u32,
    /// Game outcome after the round
    pub outcome: Outcome,
}

/// Engine sequencing errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("engine already initialized; reset before initializing again")]
    EngineInitError,
    #[error("engine not ready: initialize before playing a round")]
    EngineNotReady,
    #[error("game is over")]
    GameOver,
}

/// The authoritative game engine, seen from the board
pub trait GameEngine {
    /// Set up both players' hands
    fn initialize(&mut self) -> Result<(), EngineError>;

    /// Advance the game by one round
    fn play_round(&mut self) -> Result<RoundOutcome, EngineError>;

    /// Return to the pre-initialize state
    fn reset(&mut self);

    fn is_initialized(&self) -> bool;

    /// Fresh views of both players, seat one first
    fn players(&self) -> [PlayerView; 2];

    /// Cards left in the undealt deck
    fn deck_len(&self) -> usize;

    fn outcome(&self) -> Outcome;

    fn is_game_over(&self) -> bool;

    /// The two face-up cards that decided the last round, seat one first
    fn last_played(&self) -> Option<[Card; 2]>;

    /// The last face-down cards laid in a war during the last round
    fn last_war_cards(&self) -> Option<[Card; 2]> {
        None
    }

    fn last_round_winner(&self) -> Option<Seat>;
}

/// How a round ended
enum RoundEnd {
    /// Ranks differed
    Won(Seat),
    /// The other seat ran out of cards mid-round
    Forfeit(Seat),
    /// Both seats ran out at once
    Exhausted,
}

/// Reference implementation of War
#[derive(Debug, Clone)]
pub struct WarGame {
    players: [Player; 2],
    deck: Deck,
    seed: Option<u64>,
    round_limit: u32,
    preset_hands: Option<[Vec<Card>; 2]>,
    initialized: bool,
    rounds_played: u32,
    outcome: Outcome,
    last_played: Option<[Card; 2]>,
    last_war: Option<[Card; 2]>,
    last_winner: Option<Seat>,
}

impl WarGame {
    /// Create a game for two named players
    pub fn new(player1: impl Into<String>, player2: impl Into<String>) -> Self {
        Self {
            players: [Player::new(player1), Player::new(player2)],
            deck: Deck::new(),
            seed: None,
            round_limit: 1000,
            preset_hands: None,
            initialized: false,
            rounds_played: 0,
            outcome: Outcome::InProgress,
            last_played: None,
            last_war: None,
            last_winner: None,
        }
    }

    pub fn from_settings(settings: &EngineSettings) -> Self {
        let [first, second] = settings.player_names.clone();
        let mut game = Self::new(first, second).with_round_limit(settings.round_limit);
        game.seed = settings.seed;
        game
    }

    /// Shuffle deterministically
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_round_limit(mut self, limit: u32) -> Self {
        self.round_limit = limit;
        self
    }

    /// Deal exactly these hands (front first) instead of shuffling
    pub fn with_hands(mut self, player1: Vec<Card>, player2: Vec<Card>) -> Self {
        self.preset_hands = Some([player1, player2]);
        self
    }

    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    pub fn player(&self, seat: Seat) -> &Player {
        &self.players[seat.index()]
    }

    /// Take the front card from both players into the pot.
    ///
    /// On shortage, whatever was taken still goes into the pot and the round
    /// ends.
    fn play_pair(&mut self, pot: &mut Vec<Card>) -> Result<[Card; 2], RoundEnd> {
        let first = self.players[0].play();
        let second = self.players[1].play();
        match (first, second) {
            (Some(a), Some(b)) => Ok([a, b]),
            (Some(a), None) => {
                pot.push(a);
                Err(RoundEnd::Forfeit(Seat::One))
            }
            (None, Some(b)) => {
                pot.push(b);
                Err(RoundEnd::Forfeit(Seat::Two))
            }
            (None, None) => Err(RoundEnd::Exhausted),
        }
    }

    fn resolve_round(&mut self, pot: &mut Vec<Card>, wars: &mut u32) -> RoundEnd {
        loop {
            let [a, b] = match self.play_pair(pot) {
                Ok(pair) => pair.map(Card::face_up),
                Err(end) => return end,
            };
            pot.extend([a, b]);
            self.last_played = Some([a, b]);

            match a.rank.cmp(&b.rank) {
                Ordering::Greater => return RoundEnd::Won(Seat::One),
                Ordering::Less => return RoundEnd::Won(Seat::Two),
                Ordering::Equal => {
                    *wars += 1;
                    match self.play_pair(pot) {
                        Ok(pair) => {
                            let pair = pair.map(Card::face_down);
                            pot.extend(pair);
                            self.last_war = Some(pair);
                        }
                        Err(end) => return end,
                    }
                }
            }
        }
    }

    /// Decide the game from hand sizes once the round limit is reached
    fn outcome_by_count(&self) -> Outcome {
        match self.players[0].card_count().cmp(&self.players[1].card_count()) {
            Ordering::Greater => Outcome::Player1Wins,
            Ordering::Less => Outcome::Player2Wins,
            Ordering::Equal => Outcome::Tie,
        }
    }
}

impl GameEngine for WarGame {
    fn initialize(&mut self) -> Result<(), EngineError> {
        if self.initialized {
            return Err(EngineError::EngineInitError);
        }

        if let Some([first, second]) = self.preset_hands.clone() {
            self.players[0].take_all(first);
            self.players[1].take_all(second);
            self.deck = Deck::from_cards(Vec::new());
        } else {
            self.deck = Deck::new();
            self.deck.shuffle(self.seed);
            let mut seat = Seat::One;
            while let Some(card) = self.deck.draw() {
                self.players[seat.index()].take(card);
                seat = seat.opponent();
            }
        }

        self.initialized = true;
        log::debug!(
            "Dealt {} / {} cards",
            self.players[0].card_count(),
            self.players[1].card_count()
        );
        Ok(())
    }

    fn play_round(&mut self) -> Result<RoundOutcome, EngineError> {
        if !self.initialized {
            return Err(EngineError::EngineNotReady);
        }
        if self.outcome.is_decided() {
            return Err(EngineError::GameOver);
        }

        self.last_war = None;
        let mut pot = Vec::new();
        let mut wars = 0;
        let end = self.resolve_round(&mut pot, &mut wars);
        self.rounds_played += 1;

        let winner = match end {
            RoundEnd::Won(seat) | RoundEnd::Forfeit(seat) => {
                self.players[seat.index()].take_all(pot);
                Some(seat)
            }
            RoundEnd::Exhausted => None,
        };
        self.last_winner = winner;

        self.outcome = match end {
            RoundEnd::Forfeit(seat) => Outcome::won_by(seat),
            RoundEnd::Exhausted => Outcome::Tie,
            RoundEnd::Won(_) => {
                if self.players[0].card_count() == 0 {
                    Outcome::Player2Wins
                } else if self.players[1].card_count() == 0 {
                    Outcome::Player1Wins
                } else if self.rounds_played >= self.round_limit {
                    self.outcome_by_count()
                } else {
                    Outcome::InProgress
                }
            }
        };

        Ok(RoundOutcome {
            winner,
            wars,
            outcome: self.outcome,
        })
    }

    fn reset(&mut self) {
        for player in &mut self.players {
            player.clear();
        }
        self.deck = Deck::new();
        self.initialized = false;
        self.rounds_played = 0;
        self.outcome = Outcome::InProgress;
        self.last_played = None;
        self.last_war = None;
        self.last_winner = None;
    }

    fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn players(&self) -> [PlayerView; 2] {
        [
            PlayerView::of(Seat::One, &self.players[0]),
            PlayerView::of(Seat::Two, &self.players[1]),
        ]
    }

    fn deck_len(&self) -> usize {
        self.deck.len()
    }

    fn outcome(&self) -> Outcome {
        self.outcome
    }

    fn is_game_over(&self) -> bool {
        self.outcome.is_decided()
    }

    fn last_played(&self) -> Option<[Card; 2]> {
        self.last_played
    }

    fn last_war_cards(&self) -> Option<[Card; 2]> {
        self.last_war
    }

    fn last_round_winner(&self) -> Option<Seat> {
        self.last_winner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::cards::{Rank, Suit};

    fn card(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    #[test]
    fn test_initialize_deals_whole_deck() {
        let mut game = WarGame::new("yungselm", "COM").with_seed(42);
        game.initialize().unwrap();

        let [p1, p2] = game.players();
        assert_eq!(p1.cards.len(), 26);
        assert_eq!(p2.cards.len(), 26);
        assert_eq!(game.deck_len(), 0);
        assert_eq!(game.outcome(), Outcome::InProgress);
    }

    #[test]
    fn test_sequencing_errors() {
        let mut game = WarGame::new("a", "b");
        assert_eq!(game.play_round(), Err(EngineError::EngineNotReady));

        game.initialize().unwrap();
        assert_eq!(game.initialize(), Err(EngineError::EngineInitError));

        game.reset();
        assert!(!game.is_initialized());
        assert!(game.initialize().is_ok());
    }

    #[test]
    fn test_higher_rank_takes_pot() {
        let mut game = WarGame::new("a", "b").with_hands(
            vec![card(Rank::King, Suit::Hearts), card(Rank::Two, Suit::Clubs)],
            vec![card(Rank::Five, Suit::Spades), card(Rank::Three, Suit::Hearts)],
        );
        game.initialize().unwrap();

        let round = game.play_round().unwrap();
        assert_eq!(round.winner, Some(Seat::One));
        assert_eq!(round.wars, 0);
        assert_eq!(game.last_round_winner(), Some(Seat::One));

        let [a, b] = game.last_played().unwrap();
        assert_eq!((a.rank, b.rank), (Rank::King, Rank::Five));
        assert!(a.is_face_up() && b.is_face_up());
        assert_eq!(game.player(Seat::One).card_count(), 3);
        assert_eq!(game.player(Seat::Two).card_count(), 1);
    }

    #[test]
    fn test_war_resolves_on_next_face_up_pair() {
        let mut game = WarGame::new("a", "b").with_hands(
            vec![
                card(Rank::Nine, Suit::Hearts),
                card(Rank::Two, Suit::Hearts),
                card(Rank::Ace, Suit::Hearts),
                card(Rank::Four, Suit::Hearts),
            ],
            vec![
                card(Rank::Nine, Suit::Clubs),
                card(Rank::Three, Suit::Clubs),
                card(Rank::Queen, Suit::Clubs),
                card(Rank::Five, Suit::Clubs),
            ],
        );
        game.initialize().unwrap();

        let round = game.play_round().unwrap();
        assert_eq!(round.wars, 1);
        assert_eq!(round.winner, Some(Seat::One));

        let [a, b] = game.last_played().unwrap();
        assert_eq!((a.rank, b.rank), (Rank::Ace, Rank::Queen));
        let [x, y] = game.last_war_cards().unwrap();
        assert_eq!((x.rank, y.rank), (Rank::Two, Rank::Three));
        assert!(!x.is_face_up());
        assert_eq!(game.player(Seat::One).card_count(), 7);
    }

    #[test]
    fn test_running_out_ends_game() {
        let mut game = WarGame::new("a", "b").with_hands(
            vec![card(Rank::Ace, Suit::Spades)],
            vec![card(Rank::Two, Suit::Spades)],
        );
        game.initialize().unwrap();

        let round = game.play_round().unwrap();
        assert_eq!(round.outcome, Outcome::Player1Wins);
        assert!(game.is_game_over());
        assert_eq!(game.play_round(), Err(EngineError::GameOver));
    }

    #[test]
    fn test_short_war_forfeits() {
        let mut game = WarGame::new("a", "b").with_hands(
            vec![card(Rank::Seven, Suit::Hearts)],
            vec![card(Rank::Seven, Suit::Clubs), card(Rank::Two, Suit::Clubs)],
        );
        game.initialize().unwrap();

        let round = game.play_round().unwrap();
        assert_eq!(round.winner, Some(Seat::Two));
        assert_eq!(round.outcome, Outcome::Player2Wins);
        assert_eq!(game.player(Seat::Two).card_count(), 3);
    }

    #[test]
    fn test_simultaneous_exhaustion_is_tie() {
        let mut game = WarGame::new("a", "b").with_hands(
            vec![card(Rank::Seven, Suit::Hearts)],
            vec![card(Rank::Seven, Suit::Clubs)],
        );
        game.initialize().unwrap();

        let round = game.play_round().unwrap();
        assert_eq!(round.winner, None);
        assert_eq!(round.outcome, Outcome::Tie);
    }

    #[test]
    fn test_round_limit_decides_by_count() {
        let mut game = WarGame::new("a", "b")
            .with_round_limit(1)
            .with_hands(
                vec![card(Rank::Ace, Suit::Hearts), card(Rank::Two, Suit::Hearts)],
                vec![card(Rank::Two, Suit::Clubs), card(Rank::Three, Suit::Clubs)],
            );
        game.initialize().unwrap();

        let round = game.play_round().unwrap();
        assert_eq!(round.outcome, Outcome::Player1Wins);
        assert_eq!(game.rounds_played(), 1);
    }

    #[test]
    fn test_seeded_game_finishes() {
        let mut game = WarGame::new("a", "b").with_seed(3).with_round_limit(5000);
        game.initialize().unwrap();
        while !game.is_game_over() {
            game.play_round().unwrap();
        }
        assert!(game.outcome().is_decided());
    }
}
