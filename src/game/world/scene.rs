//! Turns the game state into the frame's sprite list.

use glam::Vec2;

use crate::engine::graphics::atlas::UvRect;
use crate::engine::graphics::font::{layout_text, text_width};
use crate::engine::graphics::vertex::SpriteInstance;
use crate::game::assets::{Sprite, SpriteSheet};
use crate::game::state::{GamePhase, GameState};
use crate::game::world::entity::{Aabb, EnemyKind};

const BACKGROUND: [f32; 4] = [0.05, 0.07, 0.16, 1.0];
const UNTINTED: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
const HUD_TEXT: [f32; 4] = [0.9, 0.9, 0.9, 1.0];
const TITLE_TEXT: [f32; 4] = [1.0, 0.85, 0.3, 1.0];
const ALERT_TEXT: [f32; 4] = [1.0, 0.35, 0.3, 1.0];
const DIM_OVERLAY: [f32; 4] = [0.0, 0.0, 0.0, 0.55];

const HUD_PIXEL: f32 = 2.0;
const HUD_MARGIN: f32 = 8.0;

fn quad(bounds: &Aabb, uv: UvRect, color: [f32; 4]) -> SpriteInstance {
    SpriteInstance {
        position: bounds.min.to_array(),
        size: bounds.size.to_array(),
        uv_min: uv.min,
        uv_max: uv.max,
        color,
    }
}

struct SceneBuilder<'a> {
    sheet: &'a SpriteSheet,
    screen: Vec2,
    instances: Vec<SpriteInstance>,
}

impl<'a> SceneBuilder<'a> {
    fn fill(&mut self, bounds: Aabb, color: [f32; 4]) {
        self.instances.push(quad(&bounds, self.sheet.white(), color));
    }

    fn sprite(&mut self, sprite: Sprite, bounds: &Aabb) {
        self.instances.push(quad(bounds, self.sheet.uv(sprite), UNTINTED));
    }

    fn text(&mut self, text: &str, origin: Vec2, pixel: f32, color: [f32; 4]) {
        self.instances
            .extend(layout_text(text, origin, pixel, color, self.sheet.white()));
    }

    fn centered_text(&mut self, text: &str, y: f32, pixel: f32, color: [f32; 4]) {
        let x = ((self.screen.x - text_width(text, pixel)) / 2.0).floor();
        self.text(text, Vec2::new(x, y), pixel, color);
    }

    fn right_text(&mut self, text: &str, y: f32, pixel: f32, color: [f32; 4]) {
        let x = self.screen.x - HUD_MARGIN - text_width(text, pixel);
        self.text(text, Vec2::new(x, y), pixel, color);
    }
}

/// Builds the sprite list for one frame, back to front.
pub fn build_scene(state: &GameState, sheet: &SpriteSheet) -> Vec<SpriteInstance> {
    let screen = state.world.screen();
    let mut scene = SceneBuilder {
        sheet,
        screen: Vec2::new(screen.width, screen.height),
        instances: Vec::new(),
    };
    scene.fill(Aabb::new(Vec2::ZERO, scene.screen), BACKGROUND);

    let world = &state.world;
    match state.phase {
        GamePhase::Title => {
            scene.sprite(Sprite::Player, &world.player().bounds);
            let mid = screen.height / 2.0;
            scene.centered_text("EBISAN SHOOTER", mid - 80.0, 5.0, TITLE_TEXT);
            scene.centered_text("PRESS SPACE TO START", mid + 10.0, HUD_PIXEL, HUD_TEXT);
            scene.centered_text("ARROWS: MOVE  SPACE: FIRE", mid + 40.0, HUD_PIXEL, HUD_TEXT);
            if state.high_score > 0 {
                scene.right_text(&format!("HI {:06}", state.high_score), HUD_MARGIN, HUD_PIXEL, HUD_TEXT);
            }
        }
        GamePhase::Playing | GamePhase::GameOver => {
            for enemy in world.enemies() {
                let sprite = match enemy.kind {
                    EnemyKind::Ufo => Sprite::Ufo,
                    EnemyKind::Snake => Sprite::Snake,
                };
                scene.sprite(sprite, &enemy.bounds);
            }
            for projectile in world.projectiles() {
                scene.sprite(Sprite::Shot, &projectile.bounds);
            }
            scene.sprite(Sprite::Player, &world.player().bounds);

            let score = format!("SCORE {:06}", world.score());
            scene.text(&score, Vec2::splat(HUD_MARGIN), HUD_PIXEL, HUD_TEXT);
            let lives = format!("LIVES {}", world.lives());
            scene.text(&lives, Vec2::new(HUD_MARGIN, HUD_MARGIN + 20.0), HUD_PIXEL, HUD_TEXT);
            let high = state.high_score.max(world.score());
            scene.right_text(&format!("HI {:06}", high), HUD_MARGIN, HUD_PIXEL, HUD_TEXT);

            if state.phase == GamePhase::GameOver {
                scene.fill(Aabb::new(Vec2::ZERO, scene.screen), DIM_OVERLAY);
                let mid = screen.height / 2.0;
                scene.centered_text("GAME OVER", mid - 60.0, 6.0, ALERT_TEXT);
                scene.centered_text(&format!("SCORE {}", world.score()), mid + 10.0, 3.0, HUD_TEXT);
                scene.centered_text("SPACE: RETRY  ESC: TITLE", mid + 50.0, HUD_PIXEL, HUD_TEXT);
            }
        }
    }

    if state.is_fps_display_enabled() {
        let fps = format!("FPS {}", state.get_fps());
        let y = screen.height - HUD_MARGIN - 7.0 * HUD_PIXEL;
        scene.text(&fps, Vec2::new(HUD_MARGIN, y), HUD_PIXEL, HUD_TEXT);
    }

    scene.instances
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::input::FrameInput;
    use crate::game::config::{AssetConfig, GameConfig};
    use std::path::PathBuf;

    fn setup() -> (GameState, SpriteSheet) {
        let mut config = GameConfig::default();
        config.ufo.spawn_chance = 0.0;
        config.snake.spawn_chance = 0.0;
        config.rules.seed = Some(3);
        let sheet = SpriteSheet::load(&AssetConfig {
            directory: PathBuf::from("no/such/dir"),
            ..AssetConfig::default()
        });
        (GameState::new(config), sheet)
    }

    fn start(state: &mut GameState) {
        state.tick(&FrameInput {
            confirm: true,
            ..FrameInput::default()
        });
    }

    #[test]
    fn background_is_drawn_first() {
        let (state, sheet) = setup();
        let scene = build_scene(&state, &sheet);
        assert_eq!(scene[0].position, [0.0, 0.0]);
        assert_eq!(scene[0].size, [640.0, 480.0]);
        assert_eq!(scene[0].color, BACKGROUND);
    }

    #[test]
    fn playing_scene_draws_every_entity() {
        let (mut state, sheet) = setup();
        start(&mut state);
        state.world.spawn_enemy(EnemyKind::Ufo, Vec2::new(100.0, 50.0), 1.0);
        state.tick(&FrameInput {
            fire: true,
            ..FrameInput::default()
        });

        let scene = build_scene(&state, &sheet);
        let ufo_uv = sheet.uv(Sprite::Ufo);
        let ufos: Vec<_> = scene.iter().filter(|i| i.uv_min == ufo_uv.min).collect();
        assert_eq!(ufos.len(), 1);
        assert_eq!(ufos[0].position, state.world.enemies()[0].bounds.min.to_array());
        let shot_uv = sheet.uv(Sprite::Shot);
        assert_eq!(scene.iter().filter(|i| i.uv_min == shot_uv.min).count(), 1);
        let player_uv = sheet.uv(Sprite::Player);
        assert_eq!(scene.iter().filter(|i| i.uv_min == player_uv.min).count(), 1);
    }

    #[test]
    fn game_over_dims_the_playfield() {
        let (mut state, sheet) = setup();
        start(&mut state);
        let player = state.world.player().bounds;
        state.world.spawn_enemy(EnemyKind::Snake, Vec2::new(player.left(), player.top() - 24.0), 1.0);
        state.tick(&FrameInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);

        let scene = build_scene(&state, &sheet);
        assert!(scene.iter().any(|i| i.color == DIM_OVERLAY));
        assert!(scene.iter().any(|i| i.color == ALERT_TEXT));
    }

    #[test]
    fn fps_counter_only_when_enabled() {
        let (mut state, sheet) = setup();
        let without = build_scene(&state, &sheet).len();
        state.toggle_fps_display();
        let with = build_scene(&state, &sheet).len();
        assert!(with > without);
    }
}
