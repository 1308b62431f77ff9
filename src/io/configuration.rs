//! Grid and sprite constants shared across the crate

/// Width of one sprite tile in pixels
pub const TILE_WIDTH: u32 = 16;
/// Height of one sprite tile in pixels (taller than wide to allow overdraw)
pub const TILE_HEIGHT: u32 = 32;

/// Edge length of one world tile in screen pixels
///
/// Placement sources report furniture bounds in these units; dividing by
/// this constant yields grid cells.
pub const WORLD_TILE_PIXELS: i32 = 64;

/// Edge length of the fixed procedural base source sprite in pixels
pub const BASE_SOURCE_SIZE: u32 = 48;
/// Gap between the procedural base and the bottom of the target buffer
pub const BASE_BOTTOM_MARGIN: u32 = 2;

/// Logical asset path of the spritesheet for multi-cell footprints
pub const SQUARE_SHEET_PATH: &str = "borders/NxN.png";
/// Logical asset path of the spritesheet for single-cell footprints
pub const SINGLE_SHEET_PATH: &str = "borders/1x1.png";

/// Directory under the asset root holding per-type sprites
pub const GARDEN_ASSET_DIR: &str = "gardens";

/// Number of bitmask columns a procedural border sheet provides
///
/// Corner cells of a footprint track up to five ring neighbors, so
/// bitmask values stay below `2^5`.
pub const SHEET_COLUMNS: u32 = 32;

/// Suffix inserted before the season in exported preview filenames
pub const OUTPUT_SUFFIX: &str = "_scene";
