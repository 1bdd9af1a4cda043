//! Slot layout
//!
//! Fixed screen positions for every place a card can be drawn. Player one
//! sits at the bottom of the board, player two at the top; the undealt
//! deck sits between them on the right.

use std::fmt;
use std::str::FromStr;

use crate::game::player::Seat;

/// What a slot is used for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotRole {
    /// Undealt deck in the center
    StartDeck,
    /// The player's face-down hand
    Deck,
    /// The card the player just played
    Active,
    /// The player's face-down war card
    War,
}

impl SlotRole {
    pub const ALL: [SlotRole; 4] = [
        SlotRole::StartDeck,
        SlotRole::Deck,
        SlotRole::Active,
        SlotRole::War,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SlotRole::StartDeck => "start-deck",
            SlotRole::Deck => "deck",
            SlotRole::Active => "active",
            SlotRole::War => "war",
        }
    }

    /// Whether cards in this slot are shown face up
    pub fn shows_face(&self) -> bool {
        matches!(self, SlotRole::Active)
    }
}

impl fmt::Display for SlotRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SlotRole {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SlotRole::ALL
            .iter()
            .copied()
            .find(|role| role.name() == s)
            .ok_or_else(|| LayoutError::UnknownSlot(s.to_string()))
    }
}

/// A concrete place on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    CenterDeck,
    Deck(Seat),
    Active(Seat),
    War(Seat),
}

impl Slot {
    /// Every distinct slot, in outline drawing order
    pub const ALL: [Slot; 7] = [
        Slot::CenterDeck,
        Slot::Deck(Seat::One),
        Slot::Deck(Seat::Two),
        Slot::Active(Seat::One),
        Slot::Active(Seat::Two),
        Slot::War(Seat::One),
        Slot::War(Seat::Two),
    ];

    pub fn new(seat: Seat, role: SlotRole) -> Self {
        match role {
            SlotRole::StartDeck => Slot::CenterDeck,
            SlotRole::Deck => Slot::Deck(seat),
            SlotRole::Active => Slot::Active(seat),
            SlotRole::War => Slot::War(seat),
        }
    }

    /// Top-left corner in board units
    pub fn position(&self) -> (i32, i32) {
        match self {
            Slot::CenterDeck => (1350, 325),
            Slot::Deck(Seat::One) => (80, 600),
            Slot::Deck(Seat::Two) => (1600, 60),
            Slot::Active(Seat::One) => (750, 500),
            Slot::Active(Seat::Two) => (750, 150),
            Slot::War(Seat::One) => (1000, 500),
            Slot::War(Seat::Two) => (1000, 150),
        }
    }
}

/// Layout errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("Unknown slot: {0}")]
    UnknownSlot(String),
}

/// Position of a player's slot, by zero-based player index
pub fn position_for(player_index: usize, role: SlotRole) -> Result<(i32, i32), LayoutError> {
    let seat = Seat::from_index(player_index)
        .ok_or_else(|| LayoutError::UnknownSlot(format!("player {player_index} {role}")))?;
    Ok(Slot::new(seat, role).position())
}

/// Position of a player's slot, with the role given by name
pub fn position_for_named(player_index: usize, role: &str) -> Result<(i32, i32), LayoutError> {
    position_for(player_index, role.parse()?)
}
