//! Player implementation.

use glam::Vec2;

use crate::game::config::{PlayerConfig, ScreenConfig, ShotConfig};
use crate::game::world::entity::{Aabb, Projectile};

pub struct Player {
    pub bounds: Aabb,
    pub speed: f32,
}

impl Player {
    /// Spawns the player horizontally centred, resting on the bottom margin.
    pub fn new(config: &PlayerConfig, screen: &ScreenConfig) -> Self {
        let position = Vec2::new(
            screen.width / 2.0 - config.width / 2.0,
            screen.height - config.height - config.bottom_margin,
        );
        Self {
            bounds: Aabb::new(position, Vec2::new(config.width, config.height)),
            speed: config.speed,
        }
    }

    /// Moves horizontally; `direction` is -1, 0 or 1.
    pub fn step(&mut self, direction: f32, screen_width: f32) {
        if direction == 0.0 {
            return;
        }
        let max_x = (screen_width - self.bounds.size.x).max(0.0);
        self.bounds.min.x = (self.bounds.min.x + direction * self.speed).clamp(0.0, max_x);
    }

    /// Spawn point of a shot: centred on the player's top edge.
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(self.bounds.center().x, self.bounds.top())
    }

    pub fn fire(&self, shot: &ShotConfig) -> Projectile {
        let muzzle = self.muzzle();
        let min = Vec2::new(muzzle.x - shot.width / 2.0, muzzle.y - shot.height);
        Projectile::new(Aabb::new(min, Vec2::new(shot.width, shot.height)))
    }

    pub fn get_position(&self) -> Vec2 {
        self.bounds.min
    }
}
