//! Input handling module
//! This module turns keyboard and focus events into per-tick game actions.

pub mod handler;

pub use handler::{FrameInput, InputHandler};
