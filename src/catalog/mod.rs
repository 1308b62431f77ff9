//! Garden type catalogue and scene configuration

/// Scene configuration loaded from JSON
pub mod config;
/// Type registry with interned identity and texture resolution
pub mod registry;

pub use config::SceneConfig;
pub use registry::{Season, TypeRegistry};
