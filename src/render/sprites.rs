//! Sprite cache
//!
//! Turns cards into ready-to-draw images. Face-up cards are cropped out of
//! the atlas and scaled to the card size; face-down cards all share the
//! single back image. Cropped faces are memoized per card kind. The memo
//! is only a cache: dropping it and cropping again gives identical pixels.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::RgbaImage;

use super::atlas::{AtlasError, AtlasIndex, CropRect};
use crate::config::settings::{AssetSettings, CardSize};
use crate::game::cards::{Card, Rank, Suit};

/// Filter used when scaling crops to card size
const SCALE_FILTER: FilterType = FilterType::Triangle;

/// Key of a drawable image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteHandle {
    /// The shared card back
    Back,
    /// A cropped card face
    Face(Rank, Suit),
}

impl SpriteHandle {
    /// Handle a card is drawn with, given its orientation
    pub fn for_card(card: &Card) -> Self {
        if card.is_face_up() {
            SpriteHandle::Face(card.rank, card.suit)
        } else {
            SpriteHandle::Back
        }
    }
}

impl fmt::Display for SpriteHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpriteHandle::Back => f.write_str("card back"),
            SpriteHandle::Face(rank, suit) => write!(f, "{rank} of {suit}"),
        }
    }
}

/// Anything that can hand the board an image for a handle
pub trait SpriteSource {
    fn sprite(&self, handle: &SpriteHandle) -> Option<&RgbaImage>;
}

/// Sprite loading errors
#[derive(Debug, thiserror::Error)]
pub enum SpriteError {
    #[error("Failed to load {path}: {source}")]
    AssetLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error(transparent)]
    Atlas(#[from] AtlasError),
}

/// Memoizing sprite producer backed by one atlas and one back image
pub struct SpriteCache {
    atlas: RgbaImage,
    index: AtlasIndex,
    back: RgbaImage,
    card_size: CardSize,
    faces: HashMap<SpriteHandle, RgbaImage>,
}

impl SpriteCache {
    /// Build a cache from decoded images.
    ///
    /// Fails if the atlas is too small for the index.
    pub fn new(atlas: RgbaImage, back: RgbaImage, card_size: CardSize) -> Result<Self, SpriteError> {
        let (width, height) = atlas.dimensions();
        let index = AtlasIndex::new(width, height)?;
        let back = if back.dimensions() == (card_size.width, card_size.height) {
            back
        } else {
            imageops::resize(&back, card_size.width, card_size.height, SCALE_FILTER)
        };

        Ok(Self {
            atlas,
            index,
            back,
            card_size,
            faces: HashMap::new(),
        })
    }

    /// Load the atlas and back image from disk
    pub fn load(assets: &AssetSettings, card_size: CardSize) -> Result<Self, SpriteError> {
        let atlas = open_rgba(&assets.atlas_path)?;
        let back = open_rgba(&assets.back_path)?;
        log::info!(
            "Loaded atlas {:?} ({}x{})",
            assets.atlas_path,
            atlas.width(),
            atlas.height()
        );
        Self::new(atlas, back, card_size)
    }

    pub fn index(&self) -> &AtlasIndex {
        &self.index
    }

    pub fn card_size(&self) -> CardSize {
        self.card_size
    }

    pub fn back_image(&self) -> &RgbaImage {
        &self.back
    }

    /// Image for a card, cropping and memoizing the face on first use
    pub fn image_for(&mut self, card: &Card) -> Result<&RgbaImage, SpriteError> {
        let handle = SpriteHandle::for_card(card);
        let SpriteHandle::Face(rank, suit) = handle else {
            return Ok(&self.back);
        };

        match self.faces.entry(handle) {
            Entry::Occupied(entry) => Ok(&*entry.into_mut()),
            Entry::Vacant(entry) => {
                let rect = self.index.resolve(rank, suit)?;
                let face = crop_and_scale(&self.atlas, rect, self.card_size);
                log::debug!("Cropped {} from atlas at {}", handle, rect);
                Ok(&*entry.insert(face))
            }
        }
    }

    /// Make sure a card's image is cached and return its handle
    pub fn resolve(&mut self, card: &Card) -> Result<SpriteHandle, SpriteError> {
        self.image_for(card)?;
        Ok(SpriteHandle::for_card(card))
    }

    /// Derive a card image without touching the memo
    pub fn render(&self, card: &Card) -> Result<RgbaImage, SpriteError> {
        if !card.is_face_up() {
            return Ok(self.back.clone());
        }
        let rect = self.index.resolve(card.rank, card.suit)?;
        Ok(crop_and_scale(&self.atlas, rect, self.card_size))
    }

    /// Drop one memoized face
    pub fn evict(&mut self, handle: &SpriteHandle) -> Option<RgbaImage> {
        self.faces.remove(handle)
    }

    /// Drop every memoized face
    pub fn clear(&mut self) {
        self.faces.clear();
    }

    /// Number of memoized faces
    pub fn cached_faces(&self) -> usize {
        self.faces.len()
    }
}

impl SpriteSource for SpriteCache {
    fn sprite(&self, handle: &SpriteHandle) -> Option<&RgbaImage> {
        match handle {
            SpriteHandle::Back => Some(&self.back),
            face => self.faces.get(face),
        }
    }
}

fn open_rgba(path: &Path) -> Result<RgbaImage, SpriteError> {
    image::open(path)
        .map(|image| image.to_rgba8())
        .map_err(|source| SpriteError::AssetLoad {
            path: path.to_path_buf(),
            source,
        })
}

fn crop_and_scale(atlas: &RgbaImage, rect: CropRect, size: CardSize) -> RgbaImage {
    let cropped = imageops::crop_imm(atlas, rect.x, rect.y, rect.width, rect.height).to_image();
    imageops::resize(&cropped, size.width, size.height, SCALE_FILTER)
}
