//! Board renderer
//!
//! Repaints the whole table on every invalidation: background, dotted slot
//! outlines, the divider between the two players, then every placed sprite
//! in insertion order. Later sprites at the same position cover earlier
//! ones.

use std::path::Path;

use image::{imageops, ImageBuffer, Rgba, RgbaImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;

use super::layout::Slot;
use super::sprites::{SpriteHandle, SpriteSource};
use crate::config::settings::{BoardSettings, CardSize};
use crate::game::player::Seat;

/// A sprite placed on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedSprite {
    pub x: i32,
    pub y: i32,
    pub handle: SpriteHandle,
    /// Slot the position was taken from
    pub slot: Slot,
}

impl PlacedSprite {
    pub fn at(slot: Slot, handle: SpriteHandle) -> Self {
        let (x, y) = slot.position();
        Self { x, y, handle, slot }
    }
}

/// Ordered record of what is on the board
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrawList {
    entries: Vec<PlacedSprite>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sprite: PlacedSprite) {
        self.entries.push(sprite);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlacedSprite> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[PlacedSprite] {
        &self.entries
    }

    /// The visible (last placed) sprite at a position
    pub fn top_at(&self, x: i32, y: i32) -> Option<&PlacedSprite> {
        self.entries.iter().rev().find(|s| s.x == x && s.y == y)
    }
}

/// What happened during a repaint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderReport {
    /// Sprites painted
    pub drawn: usize,
    /// Sprites whose image could not be resolved
    pub skipped: Vec<SpriteHandle>,
}

impl RenderReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Paints the board onto an in-memory canvas
pub struct BoardRenderer {
    settings: BoardSettings,
    card_size: CardSize,
    canvas: RgbaImage,
    repaints: u64,
}

impl BoardRenderer {
    pub fn new(settings: BoardSettings, card_size: CardSize) -> Self {
        let canvas = ImageBuffer::from_pixel(
            settings.width,
            settings.height,
            Rgba(settings.background),
        );
        Self {
            settings,
            card_size,
            canvas,
            repaints: 0,
        }
    }

    /// Repaint the full scene.
    ///
    /// A sprite whose image is missing or empty is skipped with a warning;
    /// the rest of the board still renders.
    pub fn invalidate(&mut self, draw_list: &DrawList, sprites: &impl SpriteSource) -> RenderReport {
        let mut report = RenderReport::default();

        for pixel in self.canvas.pixels_mut() {
            *pixel = Rgba(self.settings.background);
        }
        for slot in Slot::ALL {
            self.draw_outline(slot);
        }
        self.draw_divider();

        for placed in draw_list.iter() {
            match sprites.sprite(&placed.handle) {
                Some(image) if image.width() > 0 && image.height() > 0 => {
                    imageops::overlay(&mut self.canvas, image, placed.x as i64, placed.y as i64);
                    report.drawn += 1;
                }
                _ => {
                    log::warn!(
                        "Skipping {} at ({}, {}): image unavailable",
                        placed.handle,
                        placed.x,
                        placed.y
                    );
                    report.skipped.push(placed.handle);
                }
            }
        }

        self.repaints += 1;
        report
    }

    /// The last painted frame
    pub fn frame(&self) -> &RgbaImage {
        &self.canvas
    }

    /// Number of repaints so far
    pub fn repaints(&self) -> u64 {
        self.repaints
    }

    /// Write the last frame as a PNG
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), image::ImageError> {
        self.canvas.save(path)
    }

    /// Dotted rectangle around a slot
    fn draw_outline(&mut self, slot: Slot) {
        let (x, y) = slot.position();
        let (w, h) = (self.card_size.width as i32, self.card_size.height as i32);
        let t = self.settings.outline_thickness.max(1) as i32;
        let dash = self.settings.dash_length.max(1) as i32;
        let color = Rgba(self.settings.outline);

        let mut offset = 0;
        while offset < w {
            let len = dash.min(w - offset) as u32;
            draw_filled_rect_mut(&mut self.canvas, Rect::at(x + offset, y).of_size(len, t as u32), color);
            draw_filled_rect_mut(
                &mut self.canvas,
                Rect::at(x + offset, y + h - t).of_size(len, t as u32),
                color,
            );
            offset += dash * 2;
        }

        let mut offset = 0;
        while offset < h {
            let len = dash.min(h - offset) as u32;
            draw_filled_rect_mut(&mut self.canvas, Rect::at(x, y + offset).of_size(t as u32, len), color);
            draw_filled_rect_mut(
                &mut self.canvas,
                Rect::at(x + w - t, y + offset).of_size(t as u32, len),
                color,
            );
            offset += dash * 2;
        }
    }

    /// Horizontal line halfway between the two players' active slots
    fn draw_divider(&mut self) {
        let (_, top_y) = Slot::Active(Seat::Two).position();
        let (_, bottom_y) = Slot::Active(Seat::One).position();
        let t = self.settings.outline_thickness.max(1);
        let mid = (top_y + self.card_size.height as i32 + bottom_y) / 2 - t as i32 / 2;
        draw_filled_rect_mut(
            &mut self.canvas,
            Rect::at(0, mid).of_size(self.settings.width, t),
            Rgba(self.settings.outline),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Solid-color sprites keyed by handle
    struct Palette(HashMap<SpriteHandle, RgbaImage>);

    impl SpriteSource for Palette {
        fn sprite(&self, handle: &SpriteHandle) -> Option<&RgbaImage> {
            self.0.get(handle)
        }
    }

    const RED: Rgba<u8> = Rgba([200, 0, 0, 255]);
    const BLUE: Rgba<u8> = Rgba([0, 0, 200, 255]);

    fn palette() -> Palette {
        use crate::game::cards::{Rank, Suit};
        let mut map = HashMap::new();
        map.insert(SpriteHandle::Back, ImageBuffer::from_pixel(200, 300, BLUE));
        map.insert(
            SpriteHandle::Face(Rank::Ace, Suit::Hearts),
            ImageBuffer::from_pixel(200, 300, RED),
        );
        Palette(map)
    }

    fn renderer() -> BoardRenderer {
        BoardRenderer::new(BoardSettings::default(), CardSize::default())
    }

    #[test]
    fn test_empty_board_has_outlines_and_divider() {
        let mut board = renderer();
        let report = board.invalidate(&DrawList::new(), &palette());
        assert_eq!(report.drawn, 0);
        assert!(report.is_clean());

        let frame = board.frame();
        // Outline corner of player one's deck slot
        assert_eq!(*frame.get_pixel(81, 601), Rgba([255, 255, 255, 255]));
        // Inside the slot stays table green
        assert_eq!(*frame.get_pixel(180, 750), Rgba([0, 128, 0, 255]));
        // Divider crosses the left edge between the players
        assert_eq!(*frame.get_pixel(2, 475), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_last_sprite_at_position_wins() {
        use crate::game::cards::{Rank, Suit};
        let mut board = renderer();
        let mut list = DrawList::new();
        list.push(PlacedSprite::at(Slot::Active(Seat::One), SpriteHandle::Back));
        list.push(PlacedSprite::at(
            Slot::Active(Seat::One),
            SpriteHandle::Face(Rank::Ace, Suit::Hearts),
        ));

        let report = board.invalidate(&list, &palette());
        assert_eq!(report.drawn, 2);
        assert_eq!(*board.frame().get_pixel(850, 650), RED);
        assert_eq!(
            list.top_at(750, 500).map(|s| s.handle),
            Some(SpriteHandle::Face(Rank::Ace, Suit::Hearts))
        );
    }

    #[test]
    fn test_missing_sprite_is_skipped() {
        use crate::game::cards::{Rank, Suit};
        let mut board = renderer();
        let missing = SpriteHandle::Face(Rank::Two, Suit::Clubs);
        let mut list = DrawList::new();
        list.push(PlacedSprite::at(Slot::Deck(Seat::One), SpriteHandle::Back));
        list.push(PlacedSprite::at(Slot::Active(Seat::Two), missing));
        list.push(PlacedSprite::at(Slot::Deck(Seat::Two), SpriteHandle::Back));

        let report = board.invalidate(&list, &palette());
        assert_eq!(report.drawn, 2);
        assert_eq!(report.skipped, vec![missing]);
        assert_eq!(*board.frame().get_pixel(180, 750), BLUE);
        assert_eq!(*board.frame().get_pixel(1700, 200), BLUE);
        assert_eq!(*board.frame().get_pixel(850, 300), Rgba([0, 128, 0, 255]));
    }

    #[test]
    fn test_repaint_starts_from_clean_table() {
        let mut board = renderer();
        let mut list = DrawList::new();
        list.push(PlacedSprite::at(Slot::CenterDeck, SpriteHandle::Back));
        board.invalidate(&list, &palette());
        assert_eq!(*board.frame().get_pixel(1450, 475), BLUE);

        list.clear();
        board.invalidate(&list, &palette());
        assert_ne!(*board.frame().get_pixel(1450, 475), BLUE);
        assert_eq!(board.repaints(), 2);
    }
}
