//! Shape-dispatched perimeter walks producing ordered border decorations
//!
//! Each footprint shape class walks its perimeter in a fixed order and
//! emits one border part per edge category. The emission order doubles as
//! the draw order, so renderers can composite the parts as returned.

use crate::io::error::{GardenError, Result};
use crate::spatial::point::{Point, Shape, Size};

/// Edge categories selecting a spritesheet row
///
/// Square footprints use the eight compass categories. Elongated
/// footprints additionally use the four cap categories (`LeftTop` through
/// `RightBottom`) for the short ends of the strip.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum EdgeKind {
    /// Top-left corner of a square footprint
    TopLeft,
    /// Top edge
    Top,
    /// Top-right corner of a square footprint
    TopRight,
    /// Left edge
    Left,
    /// Right edge
    Right,
    /// Bottom-left corner of a square footprint
    BottomLeft,
    /// Bottom edge
    Bottom,
    /// Bottom-right corner of a square footprint
    BottomRight,
    /// Upper cap of the left end of a row footprint
    LeftTop,
    /// Lower cap of the left end of a row footprint
    LeftBottom,
    /// Upper cap of the right end of a row footprint
    RightTop,
    /// Lower cap of the right end of a row footprint
    RightBottom,
}

impl EdgeKind {
    /// The spritesheet row name for this category
    pub const fn name(self) -> &'static str {
        match self {
            Self::TopLeft => "top_left",
            Self::Top => "top",
            Self::TopRight => "top_right",
            Self::Left => "left",
            Self::Right => "right",
            Self::BottomLeft => "bottom_left",
            Self::Bottom => "bottom",
            Self::BottomRight => "bottom_right",
            Self::LeftTop => "left_top",
            Self::LeftBottom => "left_bottom",
            Self::RightTop => "right_top",
            Self::RightBottom => "right_bottom",
        }
    }
}

/// One element of a garden's border decoration
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BorderPart {
    /// Footprint tile the decoration is anchored to
    pub tile: Point,
    /// Edge category selecting the spritesheet row
    pub edge: EdgeKind,
    /// Contact bitmask selecting the spritesheet column
    pub value: u16,
}

/// Walk the perimeter of a footprint and emit its border parts in draw order
///
/// The `bitmask` function is queried at grid offsets relative to the
/// footprint's top-left cell: at the named outward ring cells for single,
/// column and row footprints, and at the perimeter tiles themselves for
/// square footprints, whose tiles see several ring cells at once.
///
/// # Errors
///
/// Returns [`GardenError::UnsupportedShape`] if either dimension is below
/// one; registration rejects such sizes, so this is unreachable through
/// the public index API.
pub fn compose<F>(size: Size, bitmask: F) -> Result<Vec<BorderPart>>
where
    F: Fn(Point) -> u16,
{
    if !size.is_valid() {
        return Err(GardenError::UnsupportedShape { size });
    }

    let mut parts = Vec::new();
    let mut emit = |tile: Point, edge: EdgeKind, cell: Point| {
        parts.push(BorderPart {
            tile,
            edge,
            value: bitmask(cell),
        });
    };

    let (w, h) = (size.x, size.y);
    match size.shape() {
        Shape::Single => {
            let tile = Point::ZERO;
            emit(tile, EdgeKind::Top, Point::new(0, -1));
            emit(tile, EdgeKind::Left, Point::new(-1, 0));
            emit(tile, EdgeKind::Right, Point::new(1, 0));
            emit(tile, EdgeKind::Bottom, Point::new(0, 1));
        }
        Shape::Column => {
            let top = Point::ZERO;
            emit(top, EdgeKind::Top, Point::new(0, -1));
            emit(top, EdgeKind::TopLeft, Point::new(-1, -1));
            emit(top, EdgeKind::TopRight, Point::new(1, -1));
            for y in 1..h - 1 {
                let tile = Point::new(0, y);
                emit(tile, EdgeKind::Left, Point::new(-1, y));
                emit(tile, EdgeKind::Right, Point::new(1, y));
            }
            let bottom = Point::new(0, h - 1);
            emit(bottom, EdgeKind::BottomLeft, Point::new(-1, h));
            emit(bottom, EdgeKind::BottomRight, Point::new(1, h));
            emit(bottom, EdgeKind::Bottom, Point::new(0, h));
        }
        Shape::Row => {
            let left = Point::ZERO;
            emit(left, EdgeKind::LeftTop, Point::new(-1, -1));
            emit(left, EdgeKind::Left, Point::new(-1, 0));
            emit(left, EdgeKind::LeftBottom, Point::new(-1, 1));
            for x in 1..w - 1 {
                let tile = Point::new(x, 0);
                emit(tile, EdgeKind::Top, Point::new(x, -1));
                emit(tile, EdgeKind::Bottom, Point::new(x, 1));
            }
            let right = Point::new(w - 1, 0);
            emit(right, EdgeKind::RightTop, Point::new(w, -1));
            emit(right, EdgeKind::Right, Point::new(w, 0));
            emit(right, EdgeKind::RightBottom, Point::new(w, 1));
        }
        Shape::Square => {
            emit(Point::ZERO, EdgeKind::TopLeft, Point::ZERO);
            for x in 1..w - 1 {
                let tile = Point::new(x, 0);
                emit(tile, EdgeKind::Top, tile);
            }
            let tr = Point::new(w - 1, 0);
            emit(tr, EdgeKind::TopRight, tr);
            for y in 1..h - 1 {
                let left = Point::new(0, y);
                emit(left, EdgeKind::Left, left);
                let right = Point::new(w - 1, y);
                emit(right, EdgeKind::Right, right);
            }
            let bl = Point::new(0, h - 1);
            emit(bl, EdgeKind::BottomLeft, bl);
            for x in 1..w - 1 {
                let tile = Point::new(x, h - 1);
                emit(tile, EdgeKind::Bottom, tile);
            }
            let br = Point::new(w - 1, h - 1);
            emit(br, EdgeKind::BottomRight, br);
        }
    }

    Ok(parts)
}
