//! Asset loading by logical path

use std::path::PathBuf;

use image::RgbaImage;

use crate::io::error::{GardenError, Result};

/// Source of raw pixel buffers addressed by logical path
///
/// The library never assumes where sprites come from; the host supplies
/// an implementation and the registry drives the fallback chain on top
/// of it.
pub trait AssetSource {
    /// Load the sprite at a logical path such as
    /// `gardens/pond/base_winter.png`
    ///
    /// # Errors
    ///
    /// Returns [`GardenError::AssetMissing`] when no asset exists at the
    /// path and [`GardenError::AssetLoad`] when one exists but cannot be
    /// decoded.
    fn load(&self, path: &str) -> Result<RgbaImage>;
}

/// Asset source backed by a directory tree on disk
#[derive(Clone, Debug)]
pub struct DirAssets {
    root: PathBuf,
}

impl DirAssets {
    /// Create a source rooted at a directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AssetSource for DirAssets {
    fn load(&self, path: &str) -> Result<RgbaImage> {
        let full = self.root.join(path);
        if !full.is_file() {
            return Err(GardenError::AssetMissing {
                path: path.to_string(),
            });
        }
        let img = image::open(&full).map_err(|source| GardenError::AssetLoad {
            path: path.to_string(),
            source,
        })?;
        Ok(img.to_rgba8())
    }
}
