//! Card rendering module
//!
//! Resolves cards to atlas crops, places them on fixed board slots and
//! paints the table.

pub mod artifacts;
pub mod atlas;
pub mod board;
pub mod layout;
pub mod sprites;

pub use artifacts::{ArtifactError, ArtifactStore};
pub use atlas::{AtlasError, AtlasIndex, CropRect};
pub use board::{BoardRenderer, DrawList, PlacedSprite, RenderReport};
pub use layout::{position_for, LayoutError, Slot, SlotRole};
pub use sprites::{SpriteCache, SpriteError, SpriteHandle, SpriteSource};
