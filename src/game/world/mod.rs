pub mod camera;
pub mod app;
pub mod entity;
pub mod scene;
pub mod simulation;

pub use camera::Camera2D;
pub use app::App;
pub use entity::{Aabb, Enemy, EnemyKind, Projectile};
pub use simulation::{GameEvent, World};
