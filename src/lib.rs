//! Incremental adjacency tracking and border autotiling for grid-placed garden objects
//!
//! Gardens occupy rectangular footprints on an integer grid. As they are
//! added and removed the spatial index propagates contact state to both
//! sides of every touched adjacency, and a single flush recomputes each
//! affected garden's border decoration from bitmasks over its contact
//! ring. Footprints without authored sprites fall back to procedurally
//! generated textures.

#![forbid(unsafe_code)]

/// Border composition and spritesheet tile lookup
pub mod border;
/// Garden type catalogue and scene configuration
pub mod catalog;
/// Input/output operations and error handling
pub mod io;
/// Spatial index, garden instances and contact propagation
pub mod spatial;
/// Procedural default texture generation
pub mod texture;

pub use io::error::{GardenError, Result};
