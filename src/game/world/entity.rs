//! Simulation entities: projectiles, enemies and the bounding boxes they share.

use glam::Vec2;

use crate::game::config::EnemyConfig;

/// Axis-aligned bounding box in logical screen space (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub const fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    pub fn left(&self) -> f32 {
        self.min.x
    }

    pub fn right(&self) -> f32 {
        self.min.x + self.size.x
    }

    pub fn top(&self) -> f32 {
        self.min.y
    }

    pub fn bottom(&self) -> f32 {
        self.min.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Touching edges count as an overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.left() <= other.right()
            && other.left() <= self.right()
            && self.top() <= other.bottom()
            && other.top() <= self.bottom()
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.min += delta;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub bounds: Aabb,
}

impl Projectile {
    pub fn new(bounds: Aabb) -> Self {
        Self { bounds }
    }

    pub fn advance(&mut self, speed: f32) {
        self.bounds.translate(Vec2::new(0.0, -speed));
    }

    /// True once the projectile has left through the top of the screen.
    pub fn is_off_screen(&self) -> bool {
        self.bounds.bottom() < 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    Ufo,
    Snake,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 2] = [EnemyKind::Ufo, EnemyKind::Snake];
}

#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub bounds: Aabb,
    pub velocity: Vec2,
    pub points: u32,
}

impl Enemy {
    /// Creates an enemy at `position`. `direction` picks the sign of the
    /// horizontal velocity.
    pub fn new(kind: EnemyKind, config: &EnemyConfig, position: Vec2, direction: f32) -> Self {
        Self {
            kind,
            bounds: Aabb::new(position, Vec2::new(config.width, config.height)),
            velocity: Vec2::new(config.velocity_x * direction.signum(), config.velocity_y),
            points: config.points,
        }
    }

    pub fn advance(&mut self, screen_width: f32) {
        self.bounds.translate(self.velocity);
        if self.kind != EnemyKind::Ufo {
            return;
        }
        // UFOs bounce between the side walls.
        if self.bounds.left() < 0.0 {
            self.bounds.min.x = 0.0;
            self.velocity.x = self.velocity.x.abs();
        } else if self.bounds.right() > screen_width {
            self.bounds.min.x = screen_width - self.bounds.size.x;
            self.velocity.x = -self.velocity.x.abs();
        }
    }

    /// True once the enemy has fallen entirely below the screen.
    pub fn has_escaped(&self, screen_height: f32) -> bool {
        self.bounds.top() >= screen_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boxed(x: f32, y: f32, w: f32, h: f32) -> Aabb {
        Aabb::new(Vec2::new(x, y), Vec2::new(w, h))
    }

    #[test]
    fn overlapping_boxes_collide() {
        assert!(boxed(0.0, 0.0, 10.0, 10.0).overlaps(&boxed(5.0, 5.0, 10.0, 10.0)));
    }

    #[test]
    fn touching_edges_collide() {
        assert!(boxed(0.0, 0.0, 10.0, 10.0).overlaps(&boxed(10.0, 0.0, 10.0, 10.0)));
        assert!(boxed(0.0, 0.0, 10.0, 10.0).overlaps(&boxed(0.0, 10.0, 10.0, 10.0)));
    }

    #[test]
    fn separated_boxes_do_not_collide() {
        assert!(!boxed(0.0, 0.0, 10.0, 10.0).overlaps(&boxed(10.5, 0.0, 10.0, 10.0)));
        assert!(!boxed(0.0, 0.0, 10.0, 10.0).overlaps(&boxed(0.0, -11.0, 10.0, 10.0)));
    }

    #[test]
    fn contained_box_collides() {
        assert!(boxed(0.0, 0.0, 100.0, 100.0).overlaps(&boxed(40.0, 40.0, 2.0, 2.0)));
    }

    #[test]
    fn projectile_moves_up_and_leaves_screen() {
        let mut shot = Projectile::new(boxed(10.0, 4.0, 6.0, 12.0));
        shot.advance(2.0);
        assert_eq!(shot.bounds.top(), 2.0);
        assert!(!shot.is_off_screen());
        for _ in 0..8 {
            shot.advance(2.0);
        }
        assert!(shot.is_off_screen());
    }

    #[test]
    fn ufo_bounces_off_left_wall() {
        let mut ufo = Enemy::new(EnemyKind::Ufo, &EnemyConfig::ufo(), Vec2::new(1.0, 0.0), -1.0);
        ufo.advance(640.0);
        assert_eq!(ufo.bounds.left(), 0.0);
        assert!(ufo.velocity.x > 0.0);
        assert_eq!(ufo.bounds.top(), 1.0);
    }

    #[test]
    fn ufo_bounces_off_right_wall() {
        let config = EnemyConfig::ufo();
        let start = Vec2::new(640.0 - config.width - 1.0, 0.0);
        let mut ufo = Enemy::new(EnemyKind::Ufo, &config, start, 1.0);
        ufo.advance(640.0);
        assert_eq!(ufo.bounds.right(), 640.0);
        assert!(ufo.velocity.x < 0.0);
    }

    #[test]
    fn snake_falls_straight() {
        let mut snake = Enemy::new(EnemyKind::Snake, &EnemyConfig::snake(), Vec2::new(100.0, 0.0), 1.0);
        snake.advance(640.0);
        assert_eq!(snake.bounds.min, Vec2::new(100.0, 2.0));
    }

    #[test]
    fn enemy_escapes_only_when_fully_below() {
        let snake = Enemy::new(EnemyKind::Snake, &EnemyConfig::snake(), Vec2::new(0.0, 479.0), 1.0);
        assert!(!snake.has_escaped(480.0));
        let snake = Enemy::new(EnemyKind::Snake, &EnemyConfig::snake(), Vec2::new(0.0, 480.0), 1.0);
        assert!(snake.has_escaped(480.0));
    }
}
