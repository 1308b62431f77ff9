//! Border tile tables sliced from spritesheets
//!
//! Two sheets exist because the neighborhood topology differs: single-cell
//! footprints key each edge off one outward ring cell, multi-cell
//! footprints see several ring cells per perimeter tile. Each sheet row is
//! one edge category, each column one bitmask value.

use image::{Rgba, RgbaImage, imageops};

use crate::border::compositor::EdgeKind;
use crate::io::assets::AssetSource;
use crate::io::configuration::{
    SHEET_COLUMNS, SINGLE_SHEET_PATH, SQUARE_SHEET_PATH, TILE_HEIGHT, TILE_WIDTH,
};
use crate::io::error::{GardenError, Result};
use crate::spatial::point::Shape;

/// Row order of the multi-cell spritesheet
const SQUARE_EDGES: [EdgeKind; 8] = [
    EdgeKind::TopLeft,
    EdgeKind::Top,
    EdgeKind::TopRight,
    EdgeKind::Left,
    EdgeKind::Right,
    EdgeKind::BottomLeft,
    EdgeKind::Bottom,
    EdgeKind::BottomRight,
];

/// Row order of the single-cell spritesheet
const SINGLE_EDGES: [EdgeKind; 4] = [
    EdgeKind::Top,
    EdgeKind::Left,
    EdgeKind::Right,
    EdgeKind::Bottom,
];

/// Sliced border tile tables for both footprint classes
#[derive(Clone, Debug)]
pub struct BorderSheet {
    square: Vec<Vec<RgbaImage>>,
    single: Vec<Vec<RgbaImage>>,
}

impl BorderSheet {
    /// Load and slice both spritesheets from an asset source
    ///
    /// # Errors
    ///
    /// Propagates asset failures and returns
    /// [`GardenError::SheetLayout`] if either sheet does not divide into
    /// the expected 16x32 tile grid.
    pub fn load(assets: &dyn AssetSource) -> Result<Self> {
        let square = assets.load(SQUARE_SHEET_PATH)?;
        let single = assets.load(SINGLE_SHEET_PATH)?;
        Self::from_images(&square, &single)
    }

    /// Slice tables from already-loaded sheet images
    ///
    /// # Errors
    ///
    /// Returns [`GardenError::SheetLayout`] if a sheet is smaller than
    /// its expected row count.
    pub fn from_images(square: &RgbaImage, single: &RgbaImage) -> Result<Self> {
        Ok(Self {
            square: slice_sheet(square, SQUARE_SHEET_PATH, SQUARE_EDGES.len() as u32)?,
            single: slice_sheet(single, SINGLE_SHEET_PATH, SINGLE_EDGES.len() as u32)?,
        })
    }

    /// Build plain line-drawn sheets requiring no asset files
    ///
    /// Used when no authored sheets exist; every bitmask column shares
    /// one tile per edge, which loses contact-specific variants but keeps
    /// scenes renderable.
    pub fn procedural() -> Self {
        let ink = Rgba([94, 81, 58, 255]);
        let build = |edges: &[EdgeKind]| {
            edges
                .iter()
                .map(|edge| vec![line_tile(*edge, ink); SHEET_COLUMNS as usize])
                .collect()
        };
        Self {
            square: build(&SQUARE_EDGES),
            single: build(&SINGLE_EDGES),
        }
    }

    /// The 16x32 tile for a footprint class, edge category and bitmask
    ///
    /// Elongated-footprint cap categories alias onto the corner rows of
    /// the multi-cell sheet.
    ///
    /// # Errors
    ///
    /// Returns [`GardenError::BorderTile`] when the bitmask exceeds the
    /// sheet's columns and [`GardenError::SheetLayout`] when the edge has
    /// no row in the selected sheet.
    pub fn tile(&self, shape: Shape, edge: EdgeKind, value: u16) -> Result<&RgbaImage> {
        let (table, edges, sheet) = match shape {
            Shape::Single => (&self.single, SINGLE_EDGES.as_slice(), SINGLE_SHEET_PATH),
            _ => (&self.square, SQUARE_EDGES.as_slice(), SQUARE_SHEET_PATH),
        };
        let canonical = canonical_edge(edge);
        let row = edges
            .iter()
            .position(|candidate| *candidate == canonical)
            .and_then(|index| table.get(index))
            .ok_or_else(|| GardenError::SheetLayout {
                sheet: sheet.to_string(),
                reason: format!("no row for edge '{}'", edge.name()),
            })?;
        row.get(value as usize).ok_or(GardenError::BorderTile {
            edge: edge.name(),
            value,
            columns: row.len(),
        })
    }
}

/// Map elongated-footprint cap categories onto the corner rows
const fn canonical_edge(edge: EdgeKind) -> EdgeKind {
    match edge {
        EdgeKind::LeftTop => EdgeKind::TopLeft,
        EdgeKind::RightTop => EdgeKind::TopRight,
        EdgeKind::LeftBottom => EdgeKind::BottomLeft,
        EdgeKind::RightBottom => EdgeKind::BottomRight,
        other => other,
    }
}

/// Cut a sheet into rows of 16x32 tiles
fn slice_sheet(
    sheet: &RgbaImage,
    name: &str,
    expected_rows: u32,
) -> Result<Vec<Vec<RgbaImage>>> {
    let columns = sheet.width() / TILE_WIDTH;
    let rows = sheet.height() / TILE_HEIGHT;
    if columns == 0 || rows < expected_rows {
        return Err(GardenError::SheetLayout {
            sheet: name.to_string(),
            reason: format!(
                "expected at least {expected_rows} rows of 16x32 tiles, found {rows} rows and {columns} columns"
            ),
        });
    }

    let mut table = Vec::with_capacity(expected_rows as usize);
    for row in 0..expected_rows {
        let mut tiles = Vec::with_capacity(columns as usize);
        for column in 0..columns {
            tiles.push(
                imageops::crop_imm(
                    sheet,
                    column * TILE_WIDTH,
                    row * TILE_HEIGHT,
                    TILE_WIDTH,
                    TILE_HEIGHT,
                )
                .to_image(),
            );
        }
        table.push(tiles);
    }
    Ok(table)
}

/// Draw a plain border line tile for one edge category
///
/// The footprint occupies the lower 16x16 of the 16x32 tile; lines hug
/// the matching side of that region.
fn line_tile(edge: EdgeKind, ink: Rgba<u8>) -> RgbaImage {
    let mut tile = RgbaImage::new(TILE_WIDTH, TILE_HEIGHT);
    let top = TILE_HEIGHT - TILE_WIDTH;
    let canonical = canonical_edge(edge);

    let horizontal = |tile: &mut RgbaImage, y: u32| {
        for x in 0..TILE_WIDTH {
            tile.put_pixel(x, y, ink);
        }
    };
    let vertical = |tile: &mut RgbaImage, x: u32| {
        for y in top..TILE_HEIGHT {
            tile.put_pixel(x, y, ink);
        }
    };

    match canonical {
        EdgeKind::Top => horizontal(&mut tile, top),
        EdgeKind::Bottom => horizontal(&mut tile, TILE_HEIGHT - 1),
        EdgeKind::Left => vertical(&mut tile, 0),
        EdgeKind::Right => vertical(&mut tile, TILE_WIDTH - 1),
        EdgeKind::TopLeft => {
            horizontal(&mut tile, top);
            vertical(&mut tile, 0);
        }
        EdgeKind::TopRight => {
            horizontal(&mut tile, top);
            vertical(&mut tile, TILE_WIDTH - 1);
        }
        EdgeKind::BottomLeft => {
            horizontal(&mut tile, TILE_HEIGHT - 1);
            vertical(&mut tile, 0);
        }
        EdgeKind::BottomRight => {
            horizontal(&mut tile, TILE_HEIGHT - 1);
            vertical(&mut tile, TILE_WIDTH - 1);
        }
        // canonical_edge never returns a cap category
        _ => {}
    }

    tile
}
