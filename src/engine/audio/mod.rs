//! Sound effect playback on a dedicated audio thread.

pub mod player;

pub use player::{AudioPlayer, SoundBank, SoundCue};
