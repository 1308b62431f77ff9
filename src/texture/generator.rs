//! Procedural default textures for footprints without authored sprites
//!
//! A fixed 48x48 source sprite is stretched to any footprint by repeated
//! pixel-block copy: full blocks while they fit, partial blocks to fill
//! the remainder. Results are memoized per footprint and only invalidated
//! on [`ProceduralTextureGenerator::clear`].

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use image::{Rgba, RgbaImage};

use crate::border::compositor::{BorderPart, compose};
use crate::catalog::registry::Season;
use crate::io::configuration::{BASE_BOTTOM_MARGIN, BASE_SOURCE_SIZE, TILE_HEIGHT, TILE_WIDTH};
use crate::io::error::Result;
use crate::spatial::point::Size;

/// Generator and cache of procedural default textures
#[derive(Debug)]
pub struct ProceduralTextureGenerator {
    sand_source: RgbaImage,
    winter_source: RgbaImage,
    base_cache: HashMap<(Size, Season), RgbaImage>,
    feature_cache: HashMap<Size, RgbaImage>,
    border_cache: HashMap<Size, Vec<BorderPart>>,
}

impl Default for ProceduralTextureGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ProceduralTextureGenerator {
    /// Create a generator with its built-in source sprites
    pub fn new() -> Self {
        Self {
            sand_source: raked_source(
                Rgba([226, 211, 159, 255]),
                Rgba([201, 180, 122, 255]),
                Rgba([238, 227, 180, 255]),
            ),
            winter_source: raked_source(
                Rgba([247, 251, 253, 255]),
                Rgba([214, 228, 238, 255]),
                Rgba([255, 255, 255, 255]),
            ),
            base_cache: HashMap::new(),
            feature_cache: HashMap::new(),
            border_cache: HashMap::new(),
        }
    }

    /// The default base texture for a footprint and season
    ///
    /// The buffer is `16*W x 32*H` pixels; the source tiles the region
    /// whose bottom edge sits two pixels above the buffer bottom. Winter
    /// uses the snow source, the other seasons share the sand source.
    pub fn default_base(&mut self, size: Size, season: Season) -> &RgbaImage {
        let source = match season {
            Season::Winter => &self.winter_source,
            _ => &self.sand_source,
        };
        self.base_cache
            .entry((size, season))
            .or_insert_with(|| stretch_base(source, size))
    }

    /// The default feature texture for a footprint: fully transparent
    pub fn default_feature(&mut self, size: Size) -> &RgbaImage {
        self.feature_cache.entry(size).or_insert_with(|| {
            RgbaImage::new(
                TILE_WIDTH * size.x.max(0) as u32,
                TILE_HEIGHT * size.y.max(0) as u32,
            )
        })
    }

    /// The border decoration of a footprint with no contacts at all
    ///
    /// Used while an object is still being placed and has no neighbors
    /// registered yet.
    ///
    /// # Errors
    ///
    /// Propagates [`crate::io::error::GardenError::UnsupportedShape`] for
    /// non-positive footprints.
    pub fn default_border(&mut self, size: Size) -> Result<&[BorderPart]> {
        let parts = match self.border_cache.entry(size) {
            Entry::Occupied(occupied) => occupied.into_mut(),
            Entry::Vacant(vacant) => vacant.insert(compose(size, |_| 0)?),
        };
        Ok(parts.as_slice())
    }

    /// Drop all memoized textures, used on world transitions
    pub fn clear(&mut self) {
        self.base_cache.clear();
        self.feature_cache.clear();
        self.border_cache.clear();
    }
}

/// Build a horizontally seamless raked-line source sprite
fn raked_source(fill: Rgba<u8>, groove: Rgba<u8>, ridge: Rgba<u8>) -> RgbaImage {
    let mut source = RgbaImage::from_pixel(BASE_SOURCE_SIZE, BASE_SOURCE_SIZE, fill);
    for y in 0..BASE_SOURCE_SIZE {
        let pixel = match y % 8 {
            5 => groove,
            6 => ridge,
            _ => continue,
        };
        for x in 0..BASE_SOURCE_SIZE {
            source.put_pixel(x, y, pixel);
        }
    }
    source
}

/// Stretch the source over a footprint by repeated block copy
fn stretch_base(source: &RgbaImage, size: Size) -> RgbaImage {
    let width = TILE_WIDTH * size.x.max(0) as u32;
    let height = TILE_HEIGHT * size.y.max(0) as u32;
    let mut buffer = RgbaImage::new(width, height);

    // Bottom edge of the tiled region sits two pixels above the buffer
    // bottom; the anchor accounts for the taller-than-wide tile shape.
    let anchor = (size.y.max(0) as u32) * (TILE_HEIGHT - TILE_WIDTH);
    let anchor = anchor.saturating_sub(BASE_BOTTOM_MARGIN);
    let bottom = height.saturating_sub(BASE_BOTTOM_MARGIN);

    let mut y = anchor;
    while y < bottom {
        let block_height = (bottom - y).min(source.height());
        let mut x = 0;
        while x < width {
            let block_width = (width - x).min(source.width());
            blit_block(&mut buffer, source, x, y, block_width, block_height);
            x += block_width;
        }
        y += block_height;
    }

    buffer
}

/// Copy the top-left `width x height` block of `source` into `buffer`
fn blit_block(
    buffer: &mut RgbaImage,
    source: &RgbaImage,
    dest_x: u32,
    dest_y: u32,
    width: u32,
    height: u32,
) {
    for y in 0..height {
        for x in 0..width {
            if let Some(pixel) = source.get_pixel_checked(x, y)
                && dest_x + x < buffer.width()
                && dest_y + y < buffer.height()
            {
                buffer.put_pixel(dest_x + x, dest_y + y, *pixel);
            }
        }
    }
}
