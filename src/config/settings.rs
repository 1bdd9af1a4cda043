//! Table settings
//!
//! Asset locations, card and board geometry, artifact hand-off and engine
//! options. Everything has a default matching the reference board.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Main settings structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where the card images come from
    pub assets: AssetSettings,
    /// Size every card sprite is scaled to
    pub card: CardSize,
    /// Board canvas and outline styling
    pub board: BoardSettings,
    /// On-disk artifact hand-off
    pub artifacts: ArtifactSettings,
    /// Engine options
    pub engine: EngineSettings,
    /// Where the CLI writes the final board image
    pub output_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            assets: AssetSettings::default(),
            card: CardSize::default(),
            board: BoardSettings::default(),
            artifacts: ArtifactSettings::default(),
            engine: EngineSettings::default(),
            output_path: PathBuf::from("board.png"),
        }
    }
}

impl Settings {
    /// Settings for batch runs and tests: nothing written to disk
    pub fn headless() -> Self {
        Self {
            artifacts: ArtifactSettings { dir: None },
            ..Default::default()
        }
    }

    /// Load settings from a JSON file; missing fields take their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path.as_ref())?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject geometry the board cannot draw
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.card.width == 0 || self.card.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "card size must be non-zero, got {}x{}",
                self.card.width, self.card.height
            )));
        }
        if self.board.width < self.card.width || self.board.height < self.card.height {
            return Err(ConfigError::Invalid(format!(
                "board {}x{} cannot fit a {}x{} card",
                self.board.width, self.board.height, self.card.width, self.card.height
            )));
        }
        if self.board.dash_length == 0 {
            return Err(ConfigError::Invalid("dash length must be non-zero".into()));
        }
        Ok(())
    }
}

/// Card image sources
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetSettings {
    /// Composite image holding all 52 faces
    pub atlas_path: PathBuf,
    /// Single card-back image
    pub back_path: PathBuf,
}

impl Default for AssetSettings {
    fn default() -> Self {
        Self {
            atlas_path: PathBuf::from("media/full_set.png"),
            back_path: PathBuf::from("media/card_back.png"),
        }
    }
}

/// Card sprite dimensions in board units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardSize {
    pub width: u32,
    pub height: u32,
}

impl Default for CardSize {
    fn default() -> Self {
        Self {
            width: 200,
            height: 300,
        }
    }
}

/// Board canvas settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardSettings {
    pub width: u32,
    pub height: u32,
    /// Table color (RGBA)
    pub background: [u8; 4],
    /// Slot outline and divider color (RGBA)
    pub outline: [u8; 4],
    pub outline_thickness: u32,
    /// Length of each dash (and gap) of the dotted slot outline
    pub dash_length: u32,
    /// Draw face-down war cards on the war slots (off: each round adds
    /// only the active pair)
    pub show_war_pile: bool,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            background: [0, 128, 0, 255],
            outline: [255, 255, 255, 255],
            outline_thickness: 5,
            dash_length: 10,
            show_war_pile: false,
        }
    }
}

/// On-disk hand-off of cropped cards
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactSettings {
    /// Directory for per-player artifacts (None = keep everything in memory)
    pub dir: Option<PathBuf>,
}

/// Engine options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub player_names: [String; 2],
    /// Fixed shuffle seed (None = random)
    pub seed: Option<u64>,
    /// Rounds after which the larger hand wins
    pub round_limit: u32,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            player_names: ["yungselm".to_string(), "COM".to_string()],
            seed: None,
            round_limit: 1000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.card, CardSize { width: 200, height: 300 });
        assert_eq!(settings.board.width, 1920);
        assert!(!settings.board.show_war_pile);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_headless_preset() {
        let settings = Settings::headless();
        assert!(settings.artifacts.dir.is_none());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(
            r#"{ "engine": { "seed": 9 }, "artifacts": { "dir": "/tmp/war" } }"#,
        )
        .unwrap();
        assert_eq!(settings.engine.seed, Some(9));
        assert_eq!(settings.engine.round_limit, 1000);
        assert_eq!(settings.artifacts.dir, Some(PathBuf::from("/tmp/war")));
        assert_eq!(settings.assets, AssetSettings::default());
    }

    #[test]
    fn test_invalid_geometry_rejected() {
        let result = Settings::from_json(r#"{ "card": { "width": 0, "height": 300 } }"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let result = Settings::from_json(r#"{ "board": { "width": 100, "height": 100 } }"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            Settings::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
