//! Border decoration: perimeter walks and tile lookup
//!
//! Composition turns a footprint plus its contact state into an ordered
//! list of border parts; the sheet maps each part onto a concrete 16x32
//! sprite tile.

/// Shape-dispatched perimeter walks
pub mod compositor;
/// Spritesheet slicing and tile lookup
pub mod sheet;

pub use compositor::{BorderPart, EdgeKind, compose};
pub use sheet::BorderSheet;
