//! Offline scene compositing and PNG export
//!
//! Renders every placed garden into one buffer: base layer, border parts
//! in their emission order, then the feature layer. Gardens are drawn
//! back to front by the bottom row of their footprint, matching how the
//! host engine depth-sorts placed objects.

use std::path::Path;

use image::{Pixel, RgbaImage};

use crate::border::sheet::BorderSheet;
use crate::catalog::registry::{Season, TextureLayer, TypeRegistry};
use crate::io::configuration::TILE_WIDTH;
use crate::io::error::{GardenError, Result};
use crate::spatial::garden::Garden;
use crate::spatial::index::SpatialIndex;
use crate::texture::generator::ProceduralTextureGenerator;

/// Render all placed gardens for one season into a single image
///
/// # Errors
///
/// Returns [`GardenError::EmptyScene`] when no gardens are placed and
/// propagates border tile lookup failures.
pub fn render_scene(
    index: &SpatialIndex,
    registry: &TypeRegistry,
    sheet: &BorderSheet,
    generator: &mut ProceduralTextureGenerator,
    season: Season,
) -> Result<RgbaImage> {
    let mut gardens: Vec<&Garden> = index.gardens().collect();
    if gardens.is_empty() {
        return Err(GardenError::EmptyScene);
    }
    gardens.sort_by_key(|garden| {
        (
            garden.position().y + garden.size().y,
            garden.position().x,
        )
    });

    let tile = TILE_WIDTH as i32;
    let mut min_x = i32::MAX;
    let mut min_y = i32::MAX;
    let mut max_x = i32::MIN;
    let mut max_y = i32::MIN;
    for garden in &gardens {
        let (pos, size) = (garden.position(), garden.size());
        min_x = min_x.min(pos.x * tile);
        // Sprites are twice as tall as the footprint, overdrawing upwards
        min_y = min_y.min((pos.y - size.y) * tile);
        max_x = max_x.max((pos.x + size.x) * tile);
        max_y = max_y.max((pos.y + size.y) * tile);
    }

    let mut canvas = RgbaImage::new((max_x - min_x) as u32, (max_y - min_y) as u32);

    for garden in gardens {
        let Some(garden_type) = registry.by_id(garden.type_id()) else {
            continue;
        };
        let (pos, size) = (garden.position(), garden.size());
        let left = pos.x * tile - min_x;
        let top = (pos.y - size.y) * tile - min_y;
        let bottom = (pos.y + size.y) * tile - min_y;

        // Cloned so the generator borrow ends before the next layer
        let base = garden_type
            .texture_or_default(TextureLayer::Base, season, generator)
            .clone();
        blit_over(&mut canvas, &base, left, bottom - base.height() as i32);

        for part in garden.border_parts() {
            let border = sheet.tile(size.shape(), part.edge, part.value)?;
            blit_over(
                &mut canvas,
                border,
                left + part.tile.x * tile,
                top + (part.tile.y + size.y - 1) * tile,
            );
        }

        let feature = garden_type
            .texture_or_default(TextureLayer::Feature, season, generator)
            .clone();
        blit_over(&mut canvas, &feature, left, bottom - feature.height() as i32);
    }

    Ok(canvas)
}

/// Export a rendered scene as a PNG, creating parent directories
///
/// # Errors
///
/// Returns [`GardenError::FileSystem`] if the parent directory cannot be
/// created and [`GardenError::ImageExport`] if the image cannot be saved.
pub fn export_scene_as_png(canvas: &RgbaImage, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| GardenError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source,
        })?;
    }

    canvas
        .save(output_path)
        .map_err(|source| GardenError::ImageExport {
            path: output_path.to_path_buf(),
            source,
        })
}

/// Alpha-composite a sprite over the canvas at a pixel offset
///
/// Pixels falling outside the canvas are clipped.
fn blit_over(canvas: &mut RgbaImage, sprite: &RgbaImage, left: i32, top: i32) {
    for (x, y, pixel) in sprite.enumerate_pixels() {
        let canvas_x = left + x as i32;
        let canvas_y = top + y as i32;
        if canvas_x < 0 || canvas_y < 0 {
            continue;
        }
        if let Some(dest) = canvas.get_pixel_mut_checked(canvas_x as u32, canvas_y as u32) {
            dest.blend(pixel);
        }
    }
}
