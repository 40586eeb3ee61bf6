//! Per-tick simulation of a single round.

use glam::Vec2;
use log::debug;
use rand::rngs::StdRng;
use rand::Rng;

use crate::engine::input::FrameInput;
use crate::game::config::{EnemyConfig, GameConfig, ScreenConfig, ShotConfig};
use crate::game::player::Player;
use crate::game::world::entity::{Enemy, EnemyKind, Projectile};

/// Things that happened during a tick, in the order they happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    ShotFired,
    EnemyDestroyed { kind: EnemyKind, points: u32 },
    EnemyEscaped { kind: EnemyKind },
    PlayerHit { kind: EnemyKind },
    GameOver { score: u32 },
}

pub struct World {
    screen: ScreenConfig,
    shot: ShotConfig,
    ufo: EnemyConfig,
    snake: EnemyConfig,
    player: Player,
    projectiles: Vec<Projectile>,
    enemies: Vec<Enemy>,
    score: u32,
    lives: u32,
    over: bool,
    ticks: u64,
    rng: StdRng,
}

impl World {
    pub fn new(config: &GameConfig, rng: StdRng) -> Self {
        Self {
            screen: config.screen,
            shot: config.shot,
            ufo: config.ufo,
            snake: config.snake,
            player: Player::new(&config.player, &config.screen),
            projectiles: Vec::new(),
            enemies: Vec::new(),
            score: 0,
            lives: config.rules.lives,
            over: false,
            ticks: 0,
            rng,
        }
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn screen(&self) -> ScreenConfig {
        self.screen
    }

    fn enemy_config(&self, kind: EnemyKind) -> &EnemyConfig {
        match kind {
            EnemyKind::Ufo => &self.ufo,
            EnemyKind::Snake => &self.snake,
        }
    }

    /// Places an enemy at `position`, moving right for a positive `direction`.
    pub fn spawn_enemy(&mut self, kind: EnemyKind, position: Vec2, direction: f32) {
        let enemy = Enemy::new(kind, self.enemy_config(kind), position, direction);
        self.enemies.push(enemy);
    }

    fn roll_spawns(&mut self) {
        for kind in EnemyKind::ALL {
            let config = *self.enemy_config(kind);
            if !self.rng.gen_bool(config.spawn_chance) {
                continue;
            }
            let max_x = (self.screen.width - config.width).max(0.0);
            let x = self.rng.gen_range(0.0..=max_x);
            let direction = if self.rng.gen_bool(0.5) { 1.0 } else { -1.0 };
            // Enter from just above the top edge.
            self.spawn_enemy(kind, Vec2::new(x, -config.height), direction);
            debug!("Spawned {:?} at x={:.1}", kind, x);
        }
    }

    /// Advances the round by one tick.
    pub fn step(&mut self, input: &FrameInput) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.over {
            return events;
        }
        self.ticks += 1;

        self.player.step(input.horizontal(), self.screen.width);

        if input.fire {
            self.projectiles.push(self.player.fire(&self.shot));
            events.push(GameEvent::ShotFired);
        }

        for projectile in &mut self.projectiles {
            projectile.advance(self.shot.speed);
        }

        self.roll_spawns();

        for enemy in &mut self.enemies {
            enemy.advance(self.screen.width);
        }

        let mut spent = vec![false; self.projectiles.len()];
        let mut destroyed = vec![false; self.enemies.len()];
        for (p, projectile) in self.projectiles.iter().enumerate() {
            let target = self
                .enemies
                .iter()
                .enumerate()
                .find(|(e, enemy)| !destroyed[*e] && projectile.bounds.overlaps(&enemy.bounds));
            if let Some((e, enemy)) = target {
                spent[p] = true;
                destroyed[e] = true;
                self.score += enemy.points;
                events.push(GameEvent::EnemyDestroyed {
                    kind: enemy.kind,
                    points: enemy.points,
                });
            }
        }

        let mut escaped = vec![false; self.enemies.len()];
        for (e, enemy) in self.enemies.iter().enumerate() {
            if destroyed[e] {
                continue;
            }
            if enemy.bounds.overlaps(&self.player.bounds) {
                self.lives = 0;
                events.push(GameEvent::PlayerHit { kind: enemy.kind });
                break;
            }
        }
        for (e, enemy) in self.enemies.iter().enumerate() {
            if destroyed[e] || self.lives == 0 {
                continue;
            }
            if enemy.has_escaped(self.screen.height) {
                escaped[e] = true;
                self.lives -= 1;
                events.push(GameEvent::EnemyEscaped { kind: enemy.kind });
            }
        }

        let mut spent = spent.into_iter();
        self.projectiles
            .retain(|projectile| !spent.next().unwrap_or(false) && !projectile.is_off_screen());
        let mut gone = destroyed.into_iter().zip(escaped);
        self.enemies.retain(|_| {
            let (destroyed, escaped) = gone.next().unwrap_or((false, false));
            !destroyed && !escaped
        });

        if self.lives == 0 {
            self.over = true;
            events.push(GameEvent::GameOver { score: self.score });
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn quiet_config() -> GameConfig {
        let mut config = GameConfig::default();
        config.ufo.spawn_chance = 0.0;
        config.snake.spawn_chance = 0.0;
        config
    }

    fn world(config: &GameConfig) -> World {
        World::new(config, StdRng::seed_from_u64(7))
    }

    fn idle() -> FrameInput {
        FrameInput::default()
    }

    fn fire() -> FrameInput {
        FrameInput {
            fire: true,
            ..FrameInput::default()
        }
    }

    #[test]
    fn fire_spawns_one_projectile() {
        let mut world = world(&quiet_config());
        let events = world.step(&fire());
        assert_eq!(events, vec![GameEvent::ShotFired]);
        assert_eq!(world.projectiles().len(), 1);
        world.step(&idle());
        assert_eq!(world.projectiles().len(), 1);
    }

    #[test]
    fn projectiles_are_pruned_above_screen() {
        let mut world = world(&quiet_config());
        world.step(&fire());
        // The shot's bottom edge starts at y=424 and climbs 2 px per tick.
        for _ in 0..230 {
            world.step(&idle());
        }
        assert!(world.projectiles().is_empty());
    }

    #[test]
    fn player_moves_with_input() {
        let mut world = world(&quiet_config());
        let start = world.player().bounds.left();
        world.step(&FrameInput {
            right: true,
            ..FrameInput::default()
        });
        assert_eq!(world.player().bounds.left(), start + 4.0);
    }

    #[test]
    fn hitting_an_enemy_scores_and_removes_both() {
        let mut world = world(&quiet_config());
        let muzzle = world.player().muzzle();
        world.spawn_enemy(EnemyKind::Snake, Vec2::new(muzzle.x - 16.0, 350.0), 1.0);
        world.step(&fire());

        let mut destroyed = Vec::new();
        for _ in 0..40 {
            destroyed.extend(
                world
                    .step(&idle())
                    .into_iter()
                    .filter(|e| matches!(e, GameEvent::EnemyDestroyed { .. })),
            );
        }
        assert_eq!(
            destroyed,
            vec![GameEvent::EnemyDestroyed {
                kind: EnemyKind::Snake,
                points: 20
            }]
        );
        assert_eq!(world.score(), 20);
        assert!(world.enemies().is_empty());
        assert!(world.projectiles().is_empty());
    }

    #[test]
    fn one_projectile_destroys_one_enemy() {
        let mut config = quiet_config();
        config.snake.velocity_y = 0.0;
        let mut world = world(&config);
        let muzzle = world.player().muzzle();
        world.spawn_enemy(EnemyKind::Snake, Vec2::new(muzzle.x - 16.0, 380.0), 1.0);
        world.spawn_enemy(EnemyKind::Snake, Vec2::new(muzzle.x - 16.0, 381.0), 1.0);

        let mut hits = 0;
        world.step(&fire());
        for _ in 0..30 {
            hits += world
                .step(&idle())
                .iter()
                .filter(|e| matches!(e, GameEvent::EnemyDestroyed { .. }))
                .count();
        }
        assert_eq!(hits, 1);
        assert_eq!(world.enemies().len(), 1);
        assert_eq!(world.score(), 20);
    }

    #[test]
    fn enemy_is_destroyed_once_by_overlapping_shots() {
        let mut world = world(&quiet_config());
        world.step(&fire());
        world.step(&fire());
        assert_eq!(world.projectiles().len(), 2);

        // Both shots overlap the snake once it falls to y=390 next tick.
        let muzzle = world.player().muzzle();
        world.spawn_enemy(EnemyKind::Snake, Vec2::new(muzzle.x - 16.0, 388.0), 1.0);
        let events = world.step(&idle());
        assert_eq!(
            events,
            vec![GameEvent::EnemyDestroyed {
                kind: EnemyKind::Snake,
                points: 20
            }]
        );
        assert_eq!(world.score(), 20);
        assert!(world.enemies().is_empty());
        assert_eq!(world.projectiles().len(), 1);
    }

    #[test]
    fn simultaneous_escapes_end_round_once() {
        let mut config = quiet_config();
        config.rules.lives = 1;
        let mut world = world(&config);
        world.spawn_enemy(EnemyKind::Snake, Vec2::new(0.0, 479.0), 1.0);
        world.spawn_enemy(EnemyKind::Snake, Vec2::new(100.0, 479.0), 1.0);

        let events = world.step(&idle());
        assert_eq!(world.lives(), 0);
        assert!(world.is_over());
        let game_overs = events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(game_overs, 1);
        assert_eq!(events.last(), Some(&GameEvent::GameOver { score: 0 }));
        assert!(world.step(&idle()).is_empty());
        assert_eq!(world.lives(), 0);
    }

    #[test]
    fn escaped_enemy_costs_a_life() {
        let mut world = world(&quiet_config());
        world.spawn_enemy(EnemyKind::Snake, Vec2::new(0.0, 479.0), 1.0);
        let events = world.step(&idle());
        assert_eq!(
            events,
            vec![GameEvent::EnemyEscaped {
                kind: EnemyKind::Snake
            }]
        );
        assert_eq!(world.lives(), 2);
        assert!(world.enemies().is_empty());
        assert!(!world.is_over());
    }

    #[test]
    fn losing_last_life_ends_round() {
        let mut config = quiet_config();
        config.rules.lives = 1;
        let mut world = world(&config);
        world.spawn_enemy(EnemyKind::Snake, Vec2::new(0.0, 479.0), 1.0);
        let events = world.step(&idle());
        assert_eq!(events.last(), Some(&GameEvent::GameOver { score: 0 }));
        assert!(world.is_over());
        assert!(world.step(&fire()).is_empty());
        assert!(world.projectiles().is_empty());
    }

    #[test]
    fn touching_the_player_ends_round() {
        let mut world = world(&quiet_config());
        let player = world.player().bounds;
        world.spawn_enemy(EnemyKind::Ufo, Vec2::new(player.left(), player.top() - 32.0), 1.0);
        let events = world.step(&idle());
        assert_eq!(
            events,
            vec![
                GameEvent::PlayerHit {
                    kind: EnemyKind::Ufo
                },
                GameEvent::GameOver { score: 0 },
            ]
        );
        assert_eq!(world.lives(), 0);
    }

    #[test]
    fn certain_spawns_stay_on_screen() {
        let mut config = GameConfig::default();
        config.ufo.spawn_chance = 1.0;
        config.snake.spawn_chance = 1.0;
        let mut world = world(&config);
        world.step(&idle());
        assert_eq!(world.enemies().len(), 2);
        for _ in 0..20 {
            world.step(&idle());
        }
        for enemy in world.enemies() {
            assert!(enemy.bounds.left() >= 0.0);
            assert!(enemy.bounds.right() <= 640.0);
        }
        let kinds: Vec<_> = world.enemies().iter().take(2).map(|e| e.kind).collect();
        assert_eq!(kinds, vec![EnemyKind::Ufo, EnemyKind::Snake]);
    }

    #[test]
    fn zero_chance_never_spawns() {
        let mut world = world(&quiet_config());
        for _ in 0..500 {
            world.step(&idle());
        }
        assert!(world.enemies().is_empty());
        assert_eq!(world.ticks(), 500);
    }

    #[test]
    fn same_seed_same_round() {
        let config = GameConfig::default();
        let mut a = World::new(&config, StdRng::seed_from_u64(99));
        let mut b = World::new(&config, StdRng::seed_from_u64(99));
        for _ in 0..300 {
            assert_eq!(a.step(&idle()), b.step(&idle()));
        }
        assert_eq!(a.enemies(), b.enemies());
    }
}
