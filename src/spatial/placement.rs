//! World objects reaching the index from the placement source
//!
//! Two producer kinds exist in the host world. Both expose the same view
//! to the index, an anchor grid cell plus a type key, so the index never
//! needs to know which concrete kind produced a garden.

use crate::io::configuration::WORLD_TILE_PIXELS;
use crate::spatial::point::Point;

/// A placed world object that may correspond to a garden
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PlacedObject {
    /// Movable object reporting the top-left of its bounding box in
    /// world pixels
    Furniture {
        /// Key routed through the type registry
        type_key: String,
        /// Bounding box top-left in world pixels
        bounds: Point,
    },
    /// Fixed structure reporting its anchor grid cell directly
    Structure {
        /// Key routed through the type registry
        type_key: String,
        /// Anchor grid cell
        tile: Point,
    },
}

impl PlacedObject {
    /// Build a furniture object whose bounding box starts at a grid cell
    pub fn furniture_at_tile(type_key: &str, tile: Point) -> Self {
        Self::Furniture {
            type_key: type_key.to_string(),
            bounds: Point::new(tile.x * WORLD_TILE_PIXELS, tile.y * WORLD_TILE_PIXELS),
        }
    }

    /// The type key routed through the registry
    pub fn type_key(&self) -> &str {
        match self {
            Self::Furniture { type_key, .. } | Self::Structure { type_key, .. } => type_key,
        }
    }

    /// The anchor grid cell of this object
    ///
    /// Furniture bounds are converted from world pixels by integer
    /// division with the world tile edge.
    pub const fn anchor(&self) -> Point {
        match self {
            Self::Furniture { bounds, .. } => Point::new(
                bounds.x / WORLD_TILE_PIXELS,
                bounds.y / WORLD_TILE_PIXELS,
            ),
            Self::Structure { tile, .. } => *tile,
        }
    }
}
