//! Configuration module
//!
//! Handles asset paths, board geometry and engine options.

pub mod settings;

pub use settings::Settings;

/// Settings loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid settings: {0}")]
    Invalid(String),
}
