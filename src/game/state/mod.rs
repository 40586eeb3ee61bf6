pub mod game_state;
pub mod timestep;

pub use game_state::{GamePhase, GameState};
pub use timestep::FixedTimestep;
