//! Scene configuration loaded from JSON
//!
//! A scene names the garden types it uses and the placements to apply in
//! one batch. Width and height are validated after parsing so that one
//! malformed type does not abort the rest of the load.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::io::error::{GardenError, Result};
use crate::spatial::point::Point;
use crate::spatial::placement::PlacedObject;

/// Declaration of one garden type
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeConfig {
    /// Footprint width in grid cells, must be positive
    pub width: i32,
    /// Footprint height in grid cells, must be positive
    pub height: i32,
    /// Credited author, if any
    #[serde(default)]
    pub author: Option<String>,
    /// Skip the asset chain for the base layer and use the procedural default
    #[serde(default)]
    pub use_default_base: bool,
    /// Skip the asset chain for the feature layer and use the transparent default
    #[serde(default)]
    pub use_default_feature: bool,
}

/// The kind of world object producing a placement
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum PlacementKind {
    /// Movable object reporting pixel-space bounds
    Furniture,
    /// Fixed structure reporting its tile anchor directly
    #[default]
    Structure,
}

/// One placement within a scene, in grid cells
#[derive(Clone, Debug, Deserialize)]
pub struct PlacementConfig {
    /// Key of the garden type to place
    #[serde(rename = "type")]
    pub type_key: String,
    /// Top-left grid column
    pub x: i32,
    /// Top-left grid row
    pub y: i32,
    /// Producer kind simulated for this placement
    #[serde(default)]
    pub kind: PlacementKind,
}

impl PlacementConfig {
    /// Build the world object this placement simulates
    pub fn to_object(&self) -> PlacedObject {
        let tile = Point::new(self.x, self.y);
        match self.kind {
            PlacementKind::Furniture => PlacedObject::furniture_at_tile(&self.type_key, tile),
            PlacementKind::Structure => PlacedObject::Structure {
                type_key: self.type_key.clone(),
                tile,
            },
        }
    }
}

/// A full scene: type declarations plus an ordered placement batch
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SceneConfig {
    /// Garden types by name
    pub types: BTreeMap<String, TypeConfig>,
    /// Placements applied in order before a single flush
    #[serde(default)]
    pub placements: Vec<PlacementConfig>,
}

impl SceneConfig {
    /// Parse a scene from JSON text
    ///
    /// # Errors
    ///
    /// Returns [`GardenError::Config`] if the text is not a valid scene
    /// document.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|error| GardenError::Config {
            path: "<inline>".into(),
            reason: error.to_string(),
        })
    }

    /// Read and parse a scene file
    ///
    /// # Errors
    ///
    /// Returns [`GardenError::FileSystem`] if the file cannot be read and
    /// [`GardenError::Config`] if its contents do not parse.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| GardenError::FileSystem {
            path: path.to_path_buf(),
            operation: "read scene config",
            source,
        })?;
        serde_json::from_str(&text).map_err(|error| GardenError::Config {
            path: path.to_path_buf(),
            reason: error.to_string(),
        })
    }
}
