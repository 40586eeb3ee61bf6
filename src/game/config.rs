//! Game configuration loaded from `ebisan.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_CONFIG_PATH: &str = "ebisan.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub screen: ScreenConfig,
    pub player: PlayerConfig,
    pub shot: ShotConfig,
    #[serde(default = "EnemyConfig::ufo")]
    pub ufo: EnemyConfig,
    #[serde(default = "EnemyConfig::snake")]
    pub snake: EnemyConfig,
    pub rules: RulesConfig,
    pub assets: AssetConfig,
    pub audio: AudioConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            screen: ScreenConfig::default(),
            player: PlayerConfig::default(),
            shot: ShotConfig::default(),
            ufo: EnemyConfig::ufo(),
            snake: EnemyConfig::snake(),
            rules: RulesConfig::default(),
            assets: AssetConfig::default(),
            audio: AudioConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    /// Window pixels per logical pixel.
    pub scale: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Hello, Ebisan!".to_string(),
            scale: 2.0,
        }
    }
}

/// Logical playfield size. All simulation coordinates live in this space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: 640.0,
            height: 480.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub bottom_margin: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            width: 48.0,
            height: 48.0,
            speed: 4.0,
            bottom_margin: 8.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShotConfig {
    pub width: f32,
    pub height: f32,
    pub speed: f32,
}

impl Default for ShotConfig {
    fn default() -> Self {
        Self {
            width: 6.0,
            height: 12.0,
            speed: 2.0,
        }
    }
}

/// Per-kind enemy tuning. A table present in the file must list every field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyConfig {
    pub width: f32,
    pub height: f32,
    /// Horizontal speed; the direction is picked at spawn time.
    pub velocity_x: f32,
    pub velocity_y: f32,
    /// Probability of a spawn on any single tick.
    pub spawn_chance: f64,
    pub points: u32,
}

impl EnemyConfig {
    pub fn ufo() -> Self {
        Self {
            width: 64.0,
            height: 32.0,
            velocity_x: 2.0,
            velocity_y: 1.0,
            spawn_chance: 0.01,
            points: 10,
        }
    }

    pub fn snake() -> Self {
        Self {
            width: 32.0,
            height: 24.0,
            velocity_x: 0.0,
            velocity_y: 2.0,
            spawn_chance: 0.005,
            points: 20,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub lives: u32,
    pub tick_rate: u32,
    /// Fixed RNG seed; entropy is used when absent.
    pub seed: Option<u64>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            lives: 3,
            tick_rate: 60,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    pub directory: PathBuf,
    pub player_image: String,
    pub ufo_image: String,
    pub snake_image: String,
    pub shot_image: String,
    pub shot_sound: String,
    pub hit_sound: String,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("assets"),
            player_image: "ebisan.png".to_string(),
            ufo_image: "ufo.png".to_string(),
            snake_image: "snake.png".to_string(),
            shot_image: "o.png".to_string(),
            shot_sound: "shot.wav".to_string(),
            hit_sound: "hit.wav".to_string(),
        }
    }
}

impl AssetConfig {
    pub fn path(&self, file: &str) -> PathBuf {
        self.directory.join(file)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub enabled: bool,
    pub volume: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            volume: 1.0,
        }
    }
}

impl GameConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Loads `path` if it exists, otherwise falls back to the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            info!("Loading configuration from '{}'", path.display());
            Self::load(path)
        } else {
            info!("No '{}' found, using default configuration", path.display());
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let screen = self.screen;
        if !positive(screen.width) || !positive(screen.height) {
            return Err(invalid("screen size must be positive"));
        }
        if !positive(self.window.scale) {
            return Err(invalid("window scale must be positive"));
        }
        if self.rules.tick_rate == 0 {
            return Err(invalid("tick_rate must be at least 1"));
        }
        if self.rules.lives == 0 {
            return Err(invalid("lives must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.audio.volume) {
            return Err(invalid("audio volume must be within [0, 1]"));
        }

        let sprites = [
            ("player", self.player.width, self.player.height),
            ("shot", self.shot.width, self.shot.height),
            ("ufo", self.ufo.width, self.ufo.height),
            ("snake", self.snake.width, self.snake.height),
        ];
        for (name, width, height) in sprites {
            if !positive(width) || !positive(height) {
                return Err(invalid(format!("{name} size must be positive")));
            }
            if width > screen.width || height > screen.height {
                return Err(invalid(format!("{name} does not fit on the screen")));
            }
        }

        for (name, enemy) in [("ufo", &self.ufo), ("snake", &self.snake)] {
            if !(0.0..=1.0).contains(&enemy.spawn_chance) {
                return Err(invalid(format!("{name} spawn_chance must be within [0, 1]")));
            }
            // Enemies must keep falling or they are never pruned.
            if !positive(enemy.velocity_y) {
                return Err(invalid(format!("{name} velocity_y must be positive")));
            }
            if !non_negative(enemy.velocity_x) {
                return Err(invalid(format!("{name} velocity_x must not be negative")));
            }
        }

        if !positive(self.shot.speed) {
            return Err(invalid("shot speed must be positive"));
        }
        if !non_negative(self.player.speed) {
            return Err(invalid("player speed must not be negative"));
        }
        if !non_negative(self.player.bottom_margin) {
            return Err(invalid("player bottom_margin must not be negative"));
        }
        Ok(())
    }

    /// Window size in physical pixels.
    pub fn window_size(&self) -> (u32, u32) {
        (
            (self.screen.width * self.window.scale).round() as u32,
            (self.screen.height * self.window.scale).round() as u32,
        )
    }
}

/// Finite and greater than zero; rejects NaN and infinities.
fn positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

fn non_negative(value: f32) -> bool {
    value.is_finite() && value >= 0.0
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(message.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.window_size(), (1280, 960));
    }

    #[test]
    fn empty_file_yields_defaults() {
        let config = GameConfig::from_toml_str("").unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = GameConfig::from_toml_str(
            r#"
            [player]
            speed = 6.0

            [rules]
            seed = 7
            "#,
        )
        .unwrap();
        assert_eq!(config.player.speed, 6.0);
        assert_eq!(config.player.width, 48.0);
        assert_eq!(config.rules.seed, Some(7));
        assert_eq!(config.rules.lives, 3);
        assert_eq!(config.snake, EnemyConfig::snake());
    }

    #[test]
    fn enemy_table_must_be_complete() {
        let result = GameConfig::from_toml_str(
            r#"
            [ufo]
            points = 50
            "#,
        );
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn rejects_spawn_chance_above_one() {
        let result = GameConfig::from_toml_str(
            r#"
            [snake]
            width = 32.0
            height = 24.0
            velocity_x = 0.0
            velocity_y = 2.0
            spawn_chance = 1.5
            points = 20
            "#,
        );
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_sprite_larger_than_screen() {
        let mut config = GameConfig::default();
        config.player.width = 1000.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_zero_lives() {
        let result = GameConfig::from_toml_str("[rules]\nlives = 0\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_non_positive_speeds() {
        let result = GameConfig::from_toml_str("[shot]\nwidth = 6.0\nheight = 12.0\nspeed = 0.0\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let mut config = GameConfig::default();
        config.snake.velocity_y = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = GameConfig::default();
        config.ufo.velocity_y = -1.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = GameConfig::default();
        config.ufo.velocity_x = -2.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = GameConfig::default();
        config.player.speed = -4.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_nan_and_infinite_sizes() {
        let result = GameConfig::from_toml_str("[screen]\nwidth = nan\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let result = GameConfig::from_toml_str("[window]\nscale = inf\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let mut config = GameConfig::default();
        config.shot.speed = f32::NAN;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = GameConfig::load_or_default(Path::new("does/not/exist.toml")).unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn asset_paths_are_joined_to_directory() {
        let assets = AssetConfig::default();
        assert_eq!(assets.path("ufo.png"), PathBuf::from("assets").join("ufo.png"));
    }
}
