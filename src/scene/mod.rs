//! Scene synchronization module
//!
//! Keeps the board in step with the engine: the adapter mirrors engine
//! state and publishes facet notifications, the controller reacts to them
//! by placing sprites and repainting.

pub mod adapter;
pub mod controller;
pub mod notify;

pub use adapter::{GameSnapshot, GameStateAdapter};
pub use controller::{RoundReport, SceneController, SceneError, ScenePhase, SceneState};
pub use notify::{Facet, SubscriptionId, Subscribers};
