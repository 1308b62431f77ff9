//! Spatial placement tracking and contact propagation
//!
//! This module contains the placement-facing functionality:
//! - Grid coordinates and footprint geometry
//! - Garden instances with their ring contact maps
//! - The position index with batched border recomputation
//! - World-object routing from the placement source

/// Garden instances and contact ring state
pub mod garden;
/// Position index with incremental contact updates
pub mod index;
/// World objects reaching the index from the placement source
pub mod placement;
/// Grid coordinates and footprint geometry
pub mod point;

pub use garden::Garden;
pub use index::SpatialIndex;
