//! Game-specific logic and features.

pub mod assets;
pub mod config;
pub mod player;
pub mod state;
pub mod world;

// Re-export commonly used types
pub use config::GameConfig;
pub use state::{GamePhase, GameState};
pub use world::{app::App, camera::Camera2D, simulation::World};
