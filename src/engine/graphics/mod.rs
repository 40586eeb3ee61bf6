pub mod atlas;
pub mod font;
pub mod renderer;
pub mod texture;
pub mod vertex;

pub use atlas::{SpriteAtlas, TileSource, UvRect};
pub use renderer::Renderer;
pub use texture::Texture;
pub use vertex::{SpriteInstance, Vertex};
