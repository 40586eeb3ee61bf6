//! Library entry point for the Ebisan shooter.

pub mod engine;
pub mod error;
pub mod game;

// Re-export main types for convenience
pub use game::{App, GameConfig};
