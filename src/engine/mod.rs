//! Engine module containing audio, graphics, input, and window management.

pub mod audio;
pub mod graphics;
pub mod input;
pub mod window;

// Re-export commonly used types
pub use graphics::{renderer::Renderer, texture::Texture, vertex::SpriteInstance};
