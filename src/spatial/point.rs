//! Integer grid coordinates and footprint geometry

use std::fmt;
use std::ops::{Add, Sub};

/// A cell position or relative offset on the tile grid
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Point {
    /// Column, growing rightwards
    pub x: i32,
    /// Row, growing downwards
    pub y: i32,
}

impl Point {
    /// The origin offset
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Create a point from column and row
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The footprint of a garden type in whole grid cells
///
/// Valid sizes have both dimensions at least one; registration rejects
/// anything else, so downstream code only ever sees the four [`Shape`]
/// classes.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Size {
    /// Width in cells
    pub x: i32,
    /// Height in cells
    pub y: i32,
}

impl Size {
    /// Create a footprint size from width and height
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Whether both dimensions are positive
    pub const fn is_valid(self) -> bool {
        self.x >= 1 && self.y >= 1
    }

    /// Classify the footprint for border composition
    pub const fn shape(self) -> Shape {
        match (self.x > 1, self.y > 1) {
            (false, false) => Shape::Single,
            (false, true) => Shape::Column,
            (true, false) => Shape::Row,
            (true, true) => Shape::Square,
        }
    }

    /// Iterate over every cell of the footprint, column-major
    pub fn cells(self) -> impl Iterator<Item = Point> {
        (0..self.x).flat_map(move |x| (0..self.y).map(move |y| Point::new(x, y)))
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.x, self.y)
    }
}

/// Footprint shape classes with distinct border walk orders
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Shape {
    /// A single cell
    Single,
    /// One cell wide, taller than one cell
    Column,
    /// One cell tall, wider than one cell
    Row,
    /// Both dimensions greater than one
    Square,
}
