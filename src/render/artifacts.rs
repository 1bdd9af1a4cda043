//! On-disk card artifacts
//!
//! Some rendering surfaces want image files rather than buffers. The store
//! exports the latest face-up card of each player as `temp_card_p{n}.png`
//! in a configured directory. Files are written under a temporary name and
//! renamed into place, so a reader never sees a partial image.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbaImage};

use crate::game::player::Seat;

/// Artifact export errors
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("Artifact I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to encode artifact: {0}")]
    Image(#[from] image::ImageError),
}

/// Per-player artifact files in one directory
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Deterministic file name for a player's artifact
    pub fn path_for(&self, seat: Seat) -> PathBuf {
        self.dir.join(format!("temp_card_p{}.png", seat.index() + 1))
    }

    /// Write a player's card image, replacing the previous one
    pub fn export(&self, seat: Seat, image: &RgbaImage) -> Result<PathBuf, ArtifactError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(seat);
        let partial = path.with_extension("png.partial");
        image.save_with_format(&partial, ImageFormat::Png)?;
        fs::rename(&partial, &path)?;
        Ok(path)
    }

    /// Remove every artifact. Best effort: failures are only logged.
    pub fn purge(&self) -> usize {
        let mut removed = 0;
        for seat in Seat::BOTH {
            let path = self.path_for(seat);
            for candidate in [path.with_extension("png.partial"), path] {
                match fs::remove_file(&candidate) {
                    Ok(()) => removed += 1,
                    Err(e) => log::debug!("Could not remove {:?}: {}", candidate, e),
                }
            }
        }
        if removed > 0 {
            log::info!("Purged {} card artifacts from {:?}", removed, self.dir);
        }
        removed
    }
}
