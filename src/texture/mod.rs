//! Procedural default texture generation

/// Default base, feature and border generation with memoization
pub mod generator;

pub use generator::ProceduralTextureGenerator;
