//! Input/output operations, configuration constants and error handling

/// Asset loading by logical path
pub mod assets;
/// Command-line interface for batch scene rendering
pub mod cli;
/// Grid and sprite constants
pub mod configuration;
/// Error types and result alias
pub mod error;
/// Scene compositing and PNG export
pub mod preview;
/// Progress display for batch processing
pub mod progress;
