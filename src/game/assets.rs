//! Sprite and sound assets named by the configuration.

use crate::engine::audio::{SoundBank, SoundCue};
use crate::engine::graphics::atlas::{SpriteAtlas, TileSource, UvRect};
use crate::game::config::AssetConfig;
use crate::game::world::simulation::GameEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sprite {
    Player,
    Ufo,
    Snake,
    Shot,
}

impl Sprite {
    pub const ALL: [Sprite; 4] = [Sprite::Player, Sprite::Ufo, Sprite::Snake, Sprite::Shot];

    /// Atlas tile index; tile 0 is the white tile.
    fn tile(self) -> usize {
        match self {
            Sprite::Player => 1,
            Sprite::Ufo => 2,
            Sprite::Snake => 3,
            Sprite::Shot => 4,
        }
    }

    /// Solid colour drawn when the image file is missing.
    fn fallback(self) -> [u8; 4] {
        match self {
            Sprite::Player => [240, 200, 60, 255],
            Sprite::Ufo => [170, 170, 200, 255],
            Sprite::Snake => [80, 200, 90, 255],
            Sprite::Shot => [255, 255, 255, 255],
        }
    }

    fn file(self, assets: &AssetConfig) -> &str {
        match self {
            Sprite::Player => &assets.player_image,
            Sprite::Ufo => &assets.ufo_image,
            Sprite::Snake => &assets.snake_image,
            Sprite::Shot => &assets.shot_image,
        }
    }
}

/// Atlas with the game's sprites, plus lookups by `Sprite`.
pub struct SpriteSheet {
    pub atlas: SpriteAtlas,
}

impl SpriteSheet {
    pub fn load(assets: &AssetConfig) -> Self {
        let sources: Vec<TileSource> = Sprite::ALL
            .iter()
            .map(|sprite| TileSource::new(assets.path(sprite.file(assets)), sprite.fallback()))
            .collect();
        Self {
            atlas: SpriteAtlas::build(&sources),
        }
    }

    pub fn uv(&self, sprite: Sprite) -> UvRect {
        self.atlas.region(sprite.tile())
    }

    pub fn white(&self) -> UvRect {
        self.atlas.white()
    }
}

pub fn load_sound_bank(assets: &AssetConfig) -> SoundBank {
    let shot = assets.path(&assets.shot_sound);
    let hit = assets.path(&assets.hit_sound);
    SoundBank::load(&[(SoundCue::Shot, shot.as_path()), (SoundCue::Hit, hit.as_path())])
}

/// Sound played for a simulation event, if any.
pub fn sound_for(event: &GameEvent) -> Option<SoundCue> {
    match event {
        GameEvent::ShotFired => Some(SoundCue::Shot),
        GameEvent::EnemyDestroyed { .. } | GameEvent::PlayerHit { .. } => Some(SoundCue::Hit),
        GameEvent::EnemyEscaped { .. } | GameEvent::GameOver { .. } => None,
    }
}
