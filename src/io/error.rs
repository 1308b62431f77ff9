//! Error types for registry, spatial index, and asset operations

use std::fmt;
use std::path::PathBuf;

use crate::spatial::point::{Point, Size};

/// Main error type for all garden operations
#[derive(Debug)]
pub enum GardenError {
    /// A type was registered with a non-positive footprint dimension
    InvalidSize {
        /// Name of the rejected type
        name: String,
        /// The offending footprint
        size: Size,
    },

    /// A type key did not match any registered garden type
    UnknownType {
        /// The unmatched key
        key: String,
    },

    /// Removal found no registered garden near the reported position
    ///
    /// Indicates the placement source and the index disagree; a correct
    /// caller issues exactly one removal per prior addition.
    GardenNotFound {
        /// Name of the type being removed
        type_name: String,
        /// Anchor position reported by the placement source
        position: Point,
    },

    /// A footprint reached border composition with a non-positive dimension
    UnsupportedShape {
        /// The offending footprint
        size: Size,
    },

    /// An asset path resolved to no file
    AssetMissing {
        /// Logical asset path
        path: String,
    },

    /// An asset file exists but could not be decoded
    AssetLoad {
        /// Logical asset path
        path: String,
        /// Underlying image decoding error
        source: image::ImageError,
    },

    /// A border spritesheet does not match the expected row/column grid
    SheetLayout {
        /// Logical path of the sheet
        sheet: String,
        /// Description of the mismatch
        reason: String,
    },

    /// A contact bitmask selected a column beyond the spritesheet
    BorderTile {
        /// Edge category being resolved
        edge: &'static str,
        /// Bitmask value used as column index
        value: u16,
        /// Number of columns available in the sheet
        columns: usize,
    },

    /// Scene configuration could not be parsed
    Config {
        /// Source file of the configuration
        path: PathBuf,
        /// Description of the parse failure
        reason: String,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Failed to save a rendered scene to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// A scene render was requested with no gardens placed
    EmptyScene,
}

impl fmt::Display for GardenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSize { name, size } => {
                write!(f, "Garden type '{name}' has invalid size {size}")
            }
            Self::UnknownType { key } => {
                write!(f, "No garden type registered for key '{key}'")
            }
            Self::GardenNotFound {
                type_name,
                position,
            } => {
                write!(f, "No registered '{type_name}' garden matched at {position}")
            }
            Self::UnsupportedShape { size } => {
                write!(f, "Unsupported garden size {size}")
            }
            Self::AssetMissing { path } => {
                write!(f, "Asset '{path}' was not found")
            }
            Self::AssetLoad { path, source } => {
                write!(f, "Failed to load asset '{path}': {source}")
            }
            Self::SheetLayout { sheet, reason } => {
                write!(f, "Border sheet '{sheet}' has an unusable layout: {reason}")
            }
            Self::BorderTile {
                edge,
                value,
                columns,
            } => {
                write!(
                    f,
                    "Border value {value} for edge '{edge}' exceeds the {columns} sheet columns"
                )
            }
            Self::Config { path, reason } => {
                write!(f, "Invalid scene config '{}': {reason}", path.display())
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::ImageExport { path, source } => {
                write!(f, "Failed to export image to '{}': {source}", path.display())
            }
            Self::EmptyScene => {
                write!(f, "No gardens have been placed in the scene")
            }
        }
    }
}

impl std::error::Error for GardenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::AssetLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for garden results
pub type Result<T> = std::result::Result<T, GardenError>;

impl From<std::io::Error> for GardenError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}
