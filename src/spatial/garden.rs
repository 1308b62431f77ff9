//! A placed garden instance with its contact ring and border decoration

use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use crate::border::compositor::{BorderPart, compose};
use crate::catalog::registry::{GardenType, TypeId};
use crate::io::error::Result;
use crate::spatial::point::{Point, Size};

/// One placed garden
///
/// Owns the ring contact map and the derived border parts. The contact
/// map's keyset is fixed at construction to exactly the one-cell ring
/// around the footprint; only the boolean values ever change.
#[derive(Clone, Debug)]
pub struct Garden {
    position: Point,
    type_id: TypeId,
    size: Size,
    contacts: HashMap<Point, bool>,
    border_parts: Vec<BorderPart>,
}

impl Garden {
    /// Create a garden of the given type anchored at a grid cell
    pub fn new(garden_type: &GardenType, position: Point) -> Self {
        let size = garden_type.size();
        let mut contacts = HashMap::new();
        for x in -1..=size.x {
            contacts.insert(Point::new(x, -1), false);
            contacts.insert(Point::new(x, size.y), false);
        }
        for y in 0..size.y {
            contacts.insert(Point::new(-1, y), false);
            contacts.insert(Point::new(size.x, y), false);
        }

        Self {
            position,
            type_id: garden_type.id(),
            size,
            contacts,
            border_parts: Vec::new(),
        }
    }

    /// Top-left grid cell of the footprint
    pub const fn position(&self) -> Point {
        self.position
    }

    /// Interned id of this garden's type
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Footprint size in grid cells
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Set one ring cell's occupancy; offsets outside the ring are ignored
    pub fn set_contact(&mut self, offset: Point, value: bool) {
        if let Some(slot) = self.contacts.get_mut(&offset) {
            *slot = value;
        }
    }

    /// Whether the ring cell at an offset is occupied by a neighbor
    pub fn contact(&self, offset: Point) -> bool {
        self.contacts.get(&offset).copied().unwrap_or(false)
    }

    /// Iterate over the ring cells and their occupancy
    pub fn contacts(&self) -> impl Iterator<Item = (Point, bool)> + '_ {
        self.contacts.iter().map(|(&offset, &value)| (offset, value))
    }

    /// Mark or clear the cells of a neighboring footprint on this ring
    ///
    /// Stamps every cell of `footprint` translated by `origin`; cells that
    /// miss the ring are ignored, so callers can stamp whole footprints
    /// without clipping them first.
    pub fn stamp_contacts(&mut self, footprint: Size, origin: Point, value: bool) {
        for cell in footprint.cells() {
            self.set_contact(origin + cell, value);
        }
    }

    /// Bitmask of occupied tracked ring cells around a grid offset
    ///
    /// Scans the 3x3 neighborhood in fixed order, rows top to bottom and
    /// cells left to right. Only offsets present in the ring contribute a
    /// bit; the bit counter does not advance for untracked neighbors, so
    /// the mask width depends on where the offset sits relative to the
    /// footprint.
    pub fn contact_bitmask(&self, offset: Point) -> u16 {
        let mut value = 0;
        let mut bit = 0;
        for dy in -1..=1 {
            for dx in -1..=1 {
                let probe = Point::new(offset.x + dx, offset.y + dy);
                if let Some(&occupied) = self.contacts.get(&probe) {
                    if occupied {
                        value |= 1 << bit;
                    }
                    bit += 1;
                }
            }
        }
        value
    }

    /// The current border decoration in draw order, empty before the
    /// first recompute
    pub fn border_parts(&self) -> &[BorderPart] {
        &self.border_parts
    }

    /// Recompute the border decoration from the current contact state
    ///
    /// Overwrites the previous parts wholesale; the list is never left
    /// partially updated.
    ///
    /// # Errors
    ///
    /// Propagates [`crate::io::error::GardenError::UnsupportedShape`],
    /// unreachable for sizes accepted at registration.
    pub fn recompute_borders(&mut self) -> Result<()> {
        let parts = compose(self.size, |cell| self.contact_bitmask(cell))?;
        self.border_parts = parts;
        Ok(())
    }
}

// Garden identity is its anchor plus its type; the index relies on this
// for dirty-set deduplication.
impl PartialEq for Garden {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position && self.type_id == other.type_id
    }
}

impl Eq for Garden {}

impl Hash for Garden {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.position.hash(state);
        self.type_id.hash(state);
    }
}
