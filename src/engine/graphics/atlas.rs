//! CPU-side sprite atlas packing.

use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use log::{info, warn};

use crate::error::AssetError;

/// Edge length, in texels, of every atlas tile.
pub const TILE_SIZE: u32 = 64;

/// Tile index reserved for the solid white texel block.
pub const WHITE_TILE: usize = 0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvRect {
    pub min: [f32; 2],
    pub max: [f32; 2],
}

/// An image to place in the atlas, and the colour used if it cannot be read.
#[derive(Debug, Clone)]
pub struct TileSource {
    pub path: PathBuf,
    pub fallback: [u8; 4],
}

impl TileSource {
    pub fn new(path: impl Into<PathBuf>, fallback: [u8; 4]) -> Self {
        Self {
            path: path.into(),
            fallback,
        }
    }
}

/// Helper for calculating atlas UV coordinates
#[derive(Debug, Clone, Copy)]
pub struct AtlasUVHelper {
    atlas_size: u32,
    tile_size: f32,
}

impl AtlasUVHelper {
    pub fn new(num_textures: usize) -> Self {
        let atlas_size = ((num_textures.max(1)) as f32).sqrt().ceil() as u32;
        let tile_size = 1.0 / atlas_size as f32;
        Self { atlas_size, tile_size }
    }

    pub fn grid_size(&self) -> u32 {
        self.atlas_size
    }

    /// Texel origin of a tile inside the atlas image.
    pub fn tile_origin(&self, index: usize) -> (u32, u32) {
        let index = index as u32;
        (
            (index % self.atlas_size) * TILE_SIZE,
            (index / self.atlas_size) * TILE_SIZE,
        )
    }

    /// UV rectangle covering one tile.
    pub fn tile_uv(&self, index: usize) -> UvRect {
        let index = index as u32;
        let tile_x = (index % self.atlas_size) as f32 * self.tile_size;
        let tile_y = (index / self.atlas_size) as f32 * self.tile_size;
        UvRect {
            min: [tile_x, tile_y],
            max: [tile_x + self.tile_size, tile_y + self.tile_size],
        }
    }
}

/// Packed atlas image plus the UV rectangle of each tile.
pub struct SpriteAtlas {
    pub image: RgbaImage,
    regions: Vec<UvRect>,
}

impl SpriteAtlas {
    /// Packs the white tile followed by `sources`, in order. Unreadable
    /// images become solid tiles of their fallback colour.
    pub fn build(sources: &[TileSource]) -> Self {
        let mut tiles = Vec::with_capacity(sources.len() + 1);
        tiles.push(solid_tile([255, 255, 255, 255]));
        for source in sources {
            let tile = load_tile(&source.path).unwrap_or_else(|e| {
                warn!("{}, using placeholder colour", e);
                solid_tile(source.fallback)
            });
            tiles.push(tile);
        }
        Self::from_tiles(&tiles)
    }

    fn from_tiles(tiles: &[RgbaImage]) -> Self {
        let helper = AtlasUVHelper::new(tiles.len());
        let side = helper.grid_size() * TILE_SIZE;
        let mut image = RgbaImage::new(side, side);
        let mut regions = Vec::with_capacity(tiles.len());

        for (i, tile) in tiles.iter().enumerate() {
            let (x, y) = helper.tile_origin(i);
            imageops::replace(&mut image, tile, x as i64, y as i64);
            regions.push(helper.tile_uv(i));
        }

        info!(
            "Created sprite atlas: {}x{} with {} tiles in {}x{} grid",
            side,
            side,
            tiles.len(),
            helper.grid_size(),
            helper.grid_size()
        );
        Self { image, regions }
    }

    pub fn region(&self, index: usize) -> UvRect {
        self.regions
            .get(index)
            .copied()
            .unwrap_or(self.regions[WHITE_TILE])
    }

    pub fn white(&self) -> UvRect {
        self.regions[WHITE_TILE]
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

fn solid_tile(color: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(TILE_SIZE, TILE_SIZE, Rgba(color))
}

fn load_tile(path: &Path) -> Result<RgbaImage, AssetError> {
    let img = image::open(path).map_err(|source| AssetError::Image {
        path: path.to_path_buf(),
        source,
    })?;
    let rgba = img.to_rgba8();
    info!("[atlas] Loaded sprite {}x{} from {}", rgba.width(), rgba.height(), path.display());
    Ok(imageops::resize(&rgba, TILE_SIZE, TILE_SIZE, FilterType::Nearest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn helper_lays_tiles_out_in_square_grid() {
        let helper = AtlasUVHelper::new(5);
        assert_eq!(helper.grid_size(), 3);
        assert_eq!(helper.tile_origin(4), (TILE_SIZE, TILE_SIZE));
        let uv = helper.tile_uv(4);
        assert!((uv.min[0] - 1.0 / 3.0).abs() < 1e-6);
        assert!((uv.max[1] - 2.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn missing_images_fall_back_to_solid_colour() {
        let atlas = SpriteAtlas::build(&[
            TileSource::new("no/such/sprite.png", [10, 20, 30, 255]),
            TileSource::new("no/such/other.png", [0, 0, 0, 0]),
        ]);
        assert_eq!(atlas.len(), 3);
        assert_eq!(atlas.image.width(), 2 * TILE_SIZE);
        assert_eq!(*atlas.image.get_pixel(0, 0), Rgba([255, 255, 255, 255]));
        assert_eq!(*atlas.image.get_pixel(TILE_SIZE + 5, 5), Rgba([10, 20, 30, 255]));
        assert_eq!(*atlas.image.get_pixel(5, TILE_SIZE + 5), Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn unknown_region_falls_back_to_white() {
        let atlas = SpriteAtlas::build(&[]);
        assert_eq!(atlas.len(), 1);
        assert_eq!(atlas.region(7), atlas.white());
        assert_eq!(atlas.white(), UvRect { min: [0.0, 0.0], max: [1.0, 1.0] });
    }
}
