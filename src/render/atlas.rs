//! Atlas index
//!
//! Maps every (rank, suit) pair to its crop rectangle in the shared card
//! atlas. Columns are ranks, rows are suits. The intervals below were
//! measured from the reference `full_set.png`; they are fixed data, not a
//! computed grid.

use std::fmt;

use crate::game::cards::{Rank, Suit};

/// Horizontal pixel interval `[start, end)` of each rank column
const RANK_COLUMNS: [(Rank, u32, u32); 13] = [
    (Rank::King, 35, 167),
    (Rank::Queen, 177, 309),
    (Rank::Jack, 321, 453),
    (Rank::Ten, 464, 596),
    (Rank::Nine, 607, 739),
    (Rank::Eight, 750, 882),
    (Rank::Seven, 893, 1026),
    (Rank::Six, 1036, 1170),
    (Rank::Five, 1179, 1312),
    (Rank::Four, 1322, 1455),
    (Rank::Three, 1465, 1598),
    (Rank::Two, 1608, 1741),
    (Rank::Ace, 1751, 1884),
];

/// Vertical pixel interval `[start, end)` of each suit row
const SUIT_ROWS: [(Suit, u32, u32); 4] = [
    (Suit::Hearts, 42, 228),
    (Suit::Diamonds, 238, 425),
    (Suit::Spades, 434, 621),
    (Suit::Clubs, 630, 817),
];

/// Axis-aligned pixel rectangle inside the atlas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRect {
    /// Rectangle spanning `[x1, x2) x [y1, y2)`
    pub fn from_corners(x1: u32, y1: u32, x2: u32, y2: u32) -> Self {
        Self {
            x: x1,
            y: y1,
            width: x2.saturating_sub(x1),
            height: y2.saturating_sub(y1),
        }
    }

    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Whether the rectangle lies fully inside an image of the given size
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.width > 0 && self.height > 0 && self.right() <= width && self.bottom() <= height
    }

    pub fn overlaps(&self, other: &CropRect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

impl fmt::Display for CropRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {})-({}, {})",
            self.x,
            self.y,
            self.right(),
            self.bottom()
        )
    }
}

/// Atlas errors. All of them mean the static table or the atlas image is
/// broken.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AtlasError {
    #[error("Unknown card kind: {0}")]
    UnknownCardKind(String),
    #[error("{rank} of {suit} at {rect} lies outside the {atlas_width}x{atlas_height} atlas")]
    OutOfBounds {
        rank: Rank,
        suit: Suit,
        rect: CropRect,
        atlas_width: u32,
        atlas_height: u32,
    },
}

/// Lookup from card kind to atlas rectangle, checked against a loaded atlas
#[derive(Debug, Clone)]
pub struct AtlasIndex {
    width: u32,
    height: u32,
}

impl AtlasIndex {
    /// Bind the table to an atlas of the given size.
    ///
    /// Fails if any of the 52 rectangles falls outside the image.
    pub fn new(width: u32, height: u32) -> Result<Self, AtlasError> {
        let index = Self { width, height };
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                index.resolve(rank, suit)?;
            }
        }
        Ok(index)
    }

    /// Smallest atlas size that holds every rectangle
    pub fn required_size() -> (u32, u32) {
        let width = RANK_COLUMNS.iter().map(|&(_, _, end)| end).max().unwrap_or(0);
        let height = SUIT_ROWS.iter().map(|&(_, _, end)| end).max().unwrap_or(0);
        (width, height)
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Crop rectangle for a card kind
    pub fn resolve(&self, rank: Rank, suit: Suit) -> Result<CropRect, AtlasError> {
        let (x1, x2) = RANK_COLUMNS
            .iter()
            .find(|(r, _, _)| *r == rank)
            .map(|&(_, start, end)| (start, end))
            .ok_or_else(|| AtlasError::UnknownCardKind(rank.to_string()))?;
        let (y1, y2) = SUIT_ROWS
            .iter()
            .find(|(s, _, _)| *s == suit)
            .map(|&(_, start, end)| (start, end))
            .ok_or_else(|| AtlasError::UnknownCardKind(suit.to_string()))?;

        let rect = CropRect::from_corners(x1, y1, x2, y2);
        if !rect.fits_within(self.width, self.height) {
            return Err(AtlasError::OutOfBounds {
                rank,
                suit,
                rect,
                atlas_width: self.width,
                atlas_height: self.height,
            });
        }
        Ok(rect)
    }

    /// Crop rectangle for a card kind given by name ("Queen", "Hearts")
    pub fn resolve_named(&self, rank: &str, suit: &str) -> Result<CropRect, AtlasError> {
        let rank: Rank = rank
            .parse()
            .map_err(|e: crate::game::UnknownKind| AtlasError::UnknownCardKind(e.0))?;
        let suit: Suit = suit
            .parse()
            .map_err(|e: crate::game::UnknownKind| AtlasError::UnknownCardKind(e.0))?;
        self.resolve(rank, suit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn full_index() -> AtlasIndex {
        let (w, h) = AtlasIndex::required_size();
        AtlasIndex::new(w, h).unwrap()
    }

    #[test]
    fn test_all_rects_fit_and_are_disjoint() {
        let index = full_index();
        let mut rects = Vec::new();
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                let rect = index.resolve(rank, suit).unwrap();
                assert!(rect.fits_within(1884, 817));
                rects.push(rect);
            }
        }
        assert_eq!(rects.len(), 52);

        for (i, a) in rects.iter().enumerate() {
            for b in &rects[i + 1..] {
                assert!(!a.overlaps(b), "{a} overlaps {b}");
            }
        }
    }

    #[test]
    fn test_known_coordinates() {
        let index = full_index();
        assert_eq!(
            index.resolve(Rank::King, Suit::Hearts).unwrap(),
            CropRect::from_corners(35, 42, 167, 228)
        );
        assert_eq!(
            index.resolve(Rank::Ace, Suit::Clubs).unwrap(),
            CropRect::from_corners(1751, 630, 1884, 817)
        );
    }

    #[test]
    fn test_small_atlas_fails_loudly() {
        let result = AtlasIndex::new(1000, 817);
        assert!(matches!(result, Err(AtlasError::OutOfBounds { .. })));
    }

    #[test]
    fn test_resolve_named() {
        let index = full_index();
        assert_eq!(
            index.resolve_named("Queen", "Spades"),
            index.resolve(Rank::Queen, Suit::Spades)
        );
        assert_eq!(
            index.resolve_named("Knight", "Spades"),
            Err(AtlasError::UnknownCardKind("Knight".to_string()))
        );
        assert_eq!(
            index.resolve_named("Two", "Stars"),
            Err(AtlasError::UnknownCardKind("Stars".to_string()))
        );
    }

    proptest! {
        #[test]
        fn resolve_is_stable(r in 0usize..13, s in 0usize..4, extra_w in 0u32..500, extra_h in 0u32..500) {
            let (w, h) = AtlasIndex::required_size();
            let index = AtlasIndex::new(w + extra_w, h + extra_h).unwrap();
            let (rank, suit) = (Rank::ALL[r], Suit::ALL[s]);
            let first = index.resolve(rank, suit).unwrap();
            prop_assert_eq!(first, index.resolve(rank, suit).unwrap());
            prop_assert!(first.fits_within(w, h));
        }
    }
}
