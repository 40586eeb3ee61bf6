//! Game state management implementation.

use std::time::Instant;

use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::engine::input::FrameInput;
use crate::game::config::GameConfig;
use crate::game::world::simulation::{GameEvent, World};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Title,
    Playing,
    GameOver,
}

pub struct GameState {
    pub phase: GamePhase,
    pub world: World,
    pub high_score: u32,
    pub rounds_played: u32,
    config: GameConfig,
    rng: StdRng,
    pub show_fps: bool,
    pub last_fps_print: Instant,
    pub frame_count: u32,
    pub last_fps: u32,
}

impl GameState {
    pub fn new(config: GameConfig) -> Self {
        let mut rng = match config.rules.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let world = World::new(&config, StdRng::seed_from_u64(rng.gen()));
        Self {
            phase: GamePhase::Title,
            world,
            high_score: 0,
            rounds_played: 0,
            config,
            rng,
            show_fps: false,
            last_fps_print: Instant::now(),
            frame_count: 0,
            last_fps: 0,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    fn fresh_world(&mut self) -> World {
        let seed = self.rng.gen();
        World::new(&self.config, StdRng::seed_from_u64(seed))
    }

    fn start_round(&mut self) {
        self.world = self.fresh_world();
        self.phase = GamePhase::Playing;
        self.rounds_played += 1;
        info!("Round {} started", self.rounds_played);
    }

    fn return_to_title(&mut self) {
        self.world = self.fresh_world();
        self.phase = GamePhase::Title;
    }

    /// Runs one fixed tick and returns the simulation events it produced.
    pub fn tick(&mut self, input: &FrameInput) -> Vec<GameEvent> {
        if input.toggle_fps {
            self.toggle_fps_display();
        }

        match self.phase {
            GamePhase::Title => {
                if input.confirm {
                    self.start_round();
                }
                Vec::new()
            }
            GamePhase::Playing => {
                if input.back {
                    self.return_to_title();
                    return Vec::new();
                }
                let events = self.world.step(input);
                for event in &events {
                    if let GameEvent::GameOver { score } = event {
                        self.finish_round(*score);
                    }
                }
                events
            }
            GamePhase::GameOver => {
                if input.back {
                    self.return_to_title();
                } else if input.confirm {
                    self.start_round();
                }
                Vec::new()
            }
        }
    }

    fn finish_round(&mut self, score: u32) {
        self.phase = GamePhase::GameOver;
        if score > self.high_score {
            self.high_score = score;
            info!("Game over with a new high score of {}", score);
        } else {
            info!("Game over with score {} (high score {})", score, self.high_score);
        }
    }

    pub fn update_frame_count(&mut self) {
        self.frame_count += 1;
    }

    pub fn update_fps_display(&mut self) -> Option<u32> {
        if !self.show_fps {
            return None;
        }

        let now = Instant::now();
        let elapsed = now.duration_since(self.last_fps_print);

        if elapsed.as_secs_f32() >= 1.0 {
            self.last_fps = self.frame_count;
            self.frame_count = 0;
            self.last_fps_print = now;
            Some(self.last_fps)
        } else {
            None
        }
    }

    pub fn toggle_fps_display(&mut self) {
        self.show_fps = !self.show_fps;
        self.frame_count = 0;
        self.last_fps_print = Instant::now();
        info!("Show FPS: {}", self.show_fps);
    }

    pub fn get_fps(&self) -> u32 {
        self.last_fps
    }

    pub fn is_fps_display_enabled(&self) -> bool {
        self.show_fps
    }
}
