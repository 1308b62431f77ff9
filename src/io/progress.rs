//! Progress display for batch scene processing

use std::path::Path;
use std::sync::LazyLock;

use indicatif::{ProgressBar, ProgressStyle};

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Scenes: [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

/// Single batch bar across all scene files
#[derive(Debug, Default)]
pub struct ProgressManager {
    bar: Option<ProgressBar>,
}

impl ProgressManager {
    /// Create an uninitialized progress manager
    pub const fn new() -> Self {
        Self { bar: None }
    }

    /// Create the batch bar once the scene count is known
    pub fn initialize(&mut self, scene_count: usize) {
        let bar = ProgressBar::new(scene_count as u64);
        bar.set_style(BATCH_STYLE.clone());
        self.bar = Some(bar);
    }

    /// Show the scene currently being processed
    pub fn start_scene(&self, path: &Path) {
        if let Some(bar) = &self.bar {
            bar.set_message(
                path.file_name()
                    .unwrap_or_default()
                    .to_string_lossy()
                    .to_string(),
            );
        }
    }

    /// Advance the batch bar past a completed scene
    pub fn complete_scene(&self) {
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
    }

    /// Clean up the progress display
    pub fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_with_message("All scenes processed");
        }
    }
}
