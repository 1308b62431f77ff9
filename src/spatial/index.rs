//! Spatial index with incremental contact updates and batched recomputes
//!
//! Mutations mark touched gardens dirty; a single [`SpatialIndex::flush`]
//! after a batch recomputes each dirty garden's border decoration exactly
//! once. Recomputation only reads a garden's own contact state, so the
//! flush order is irrelevant.

use std::collections::{HashMap, HashSet};

use crate::catalog::registry::{GardenType, TypeId, TypeRegistry};
use crate::io::error::{GardenError, Result};
use crate::spatial::garden::Garden;
use crate::spatial::placement::PlacedObject;
use crate::spatial::point::{Point, Size};

/// Grid positions to garden instances, plus the pending-recompute set
#[derive(Debug, Default)]
pub struct SpatialIndex {
    positions: HashMap<Point, Garden>,
    dirty: HashSet<(Point, TypeId)>,
}

impl SpatialIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// The garden anchored at a grid cell, if any
    pub fn get(&self, position: Point) -> Option<&Garden> {
        self.positions.get(&position)
    }

    /// Iterate over all placed gardens in arbitrary order
    pub fn gardens(&self) -> impl Iterator<Item = &Garden> {
        self.positions.values()
    }

    /// Number of placed gardens
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether no gardens are placed
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Place a garden, propagate contacts to both sides of every new
    /// adjacency and return the stored instance
    ///
    /// Neighbor candidates are found by an AABB test inclusive of the
    /// one-cell ring, so footprints that merely touch edges qualify. The
    /// new garden and every candidate are marked dirty.
    pub fn add(&mut self, garden_type: &GardenType, position: Point) -> &Garden {
        let mut garden = Garden::new(garden_type, position);

        for neighbor_pos in self.neighbor_candidates(position, garden_type.size()) {
            let Some(other) = self.positions.get_mut(&neighbor_pos) else {
                continue;
            };
            let delta = other.position() - position;
            garden.stamp_contacts(other.size(), delta, true);
            other.stamp_contacts(garden_type.size(), Point::ZERO - delta, true);
            self.dirty.insert((other.position(), other.type_id()));
        }

        self.dirty.insert((position, garden_type.id()));
        self.positions.entry(position).insert_entry(garden).into_mut()
    }

    /// Remove the garden matching a reported anchor and return it
    ///
    /// Removal may report a non-top-left anchor when the object moved
    /// within its footprint, so the true top-left is found by scanning
    /// the `size.x * size.y` candidate anchors around the report.
    /// Contacts are cleared on both sides of each broken adjacency and
    /// every neighbor is marked dirty.
    ///
    /// # Errors
    ///
    /// Returns [`GardenError::GardenNotFound`] when no candidate matches;
    /// this signals that the placement source and the index disagree.
    pub fn remove(&mut self, garden_type: &GardenType, position: Point) -> Result<Garden> {
        let anchor = self
            .resolve_anchor(garden_type, position)
            .ok_or_else(|| GardenError::GardenNotFound {
                type_name: garden_type.name().to_string(),
                position,
            })?;

        let Some(mut garden) = self.positions.remove(&anchor) else {
            // resolve_anchor only returns occupied cells
            return Err(GardenError::GardenNotFound {
                type_name: garden_type.name().to_string(),
                position,
            });
        };

        for neighbor_pos in self.neighbor_candidates(anchor, garden.size()) {
            let Some(other) = self.positions.get_mut(&neighbor_pos) else {
                continue;
            };
            let delta = other.position() - anchor;
            garden.stamp_contacts(other.size(), delta, false);
            other.stamp_contacts(garden.size(), Point::ZERO - delta, false);
            self.dirty.insert((other.position(), other.type_id()));
        }

        self.dirty.insert((anchor, garden.type_id()));
        Ok(garden)
    }

    /// Recompute border decorations for every dirty garden, then clear
    /// the dirty set
    ///
    /// A garden touched by several mutations since the last flush is
    /// recomputed exactly once. Dirty entries whose garden has since been
    /// removed are skipped. Flushing with nothing dirty is a no-op.
    ///
    /// # Errors
    ///
    /// Propagates composition failures, unreachable for registered sizes.
    pub fn flush(&mut self) -> Result<()> {
        if self.dirty.is_empty() {
            return Ok(());
        }

        let dirty = std::mem::take(&mut self.dirty);
        log::debug!("Recomputing borders for {} gardens", dirty.len());
        for (position, type_id) in dirty {
            if let Some(garden) = self.positions.get_mut(&position)
                && garden.type_id() == type_id
            {
                garden.recompute_borders()?;
            }
        }
        Ok(())
    }

    /// Drop all gardens and pending recomputes, used on world transitions
    pub fn clear(&mut self) {
        self.positions.clear();
        self.dirty.clear();
    }

    /// Route an added world object into the index by its type key
    ///
    /// # Errors
    ///
    /// Returns [`GardenError::UnknownType`] if the key is not registered;
    /// the caller should treat the object as not a garden.
    pub fn notify_added(&mut self, registry: &TypeRegistry, object: &PlacedObject) -> Result<()> {
        let garden_type = registry.get(object.type_key())?;
        self.add(garden_type, object.anchor());
        Ok(())
    }

    /// Route a removed world object into the index by its type key
    ///
    /// # Errors
    ///
    /// Returns [`GardenError::UnknownType`] for an unregistered key and
    /// [`GardenError::GardenNotFound`] when the index holds no matching
    /// garden.
    pub fn notify_removed(
        &mut self,
        registry: &TypeRegistry,
        object: &PlacedObject,
    ) -> Result<Garden> {
        let garden_type = registry.get(object.type_key())?;
        self.remove(garden_type, object.anchor())
    }

    /// Positions of every garden whose footprint overlaps the ring-padded
    /// bounding box of a footprint at `position`
    fn neighbor_candidates(&self, position: Point, size: Size) -> Vec<Point> {
        self.positions
            .values()
            .filter(|other| {
                let delta = other.position() - position;
                let other_size = other.size();
                delta.x >= -other_size.x
                    && delta.x <= size.x
                    && delta.y >= -other_size.y
                    && delta.y <= size.y
            })
            .map(Garden::position)
            .collect()
    }

    /// Scan candidate top-left anchors around a reported position for a
    /// garden of the given type
    fn resolve_anchor(&self, garden_type: &GardenType, position: Point) -> Option<Point> {
        let size = garden_type.size();
        for x in 0..size.x {
            for y in 0..size.y {
                let candidate = position - Point::new(x, y);
                if let Some(garden) = self.positions.get(&candidate)
                    && garden.type_id() == garden_type.id()
                {
                    return Some(candidate);
                }
            }
        }
        None
    }
}
