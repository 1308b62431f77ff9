//! Command-line interface for batch rendering scene files

use std::path::{Path, PathBuf};

use clap::Parser;

use crate::border::sheet::BorderSheet;
use crate::catalog::config::SceneConfig;
use crate::catalog::registry::{Season, TypeRegistry};
use crate::io::assets::DirAssets;
use crate::io::configuration::OUTPUT_SUFFIX;
use crate::io::error::{GardenError, Result};
use crate::io::preview::{export_scene_as_png, render_scene};
use crate::io::progress::ProgressManager;
use crate::spatial::index::SpatialIndex;
use crate::texture::generator::ProceduralTextureGenerator;

#[derive(Parser)]
#[command(name = "zengrid")]
#[command(
    author,
    version,
    about = "Compose garden scenes with autotiled borders and procedural base textures"
)]
/// Command-line arguments for the scene rendering tool
pub struct Cli {
    /// Scene JSON file or directory of scenes to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Asset root holding border spritesheets and per-garden sprites
    #[arg(short, long, default_value = "assets")]
    pub assets: PathBuf,

    /// Render a single season instead of all four
    #[arg(short, long)]
    pub season: Option<String>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process scenes even if outputs exist
    #[arg(short, long)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if scenes with existing outputs should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Orchestrates batch processing of scene files with progress tracking
pub struct SceneProcessor {
    cli: Cli,
    progress: Option<ProgressManager>,
}

impl SceneProcessor {
    /// Create a processor from parsed CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress = cli.should_show_progress().then(ProgressManager::new);
        Self { cli, progress }
    }

    /// Process scene files according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if target validation, scene loading, or export
    /// fails. An unknown type key within a scene is logged and skipped
    /// rather than aborting the batch.
    pub fn process(&mut self) -> Result<()> {
        let seasons = self.selected_seasons()?;
        let scenes = self.collect_scenes(&seasons)?;

        if scenes.is_empty() {
            return Ok(());
        }

        if let Some(pm) = &mut self.progress {
            pm.initialize(scenes.len());
        }

        for scene in &scenes {
            self.process_scene(scene, &seasons)?;
        }

        if let Some(pm) = &self.progress {
            pm.finish();
        }

        Ok(())
    }

    fn selected_seasons(&self) -> Result<Vec<Season>> {
        self.cli.season.as_ref().map_or_else(
            || Ok(Season::ALL.to_vec()),
            |key| {
                Season::parse(key)
                    .map(|season| vec![season])
                    .ok_or_else(|| GardenError::Config {
                        path: "<arguments>".into(),
                        reason: format!("unknown season '{key}'"),
                    })
            },
        )
    }

    fn collect_scenes(&self, seasons: &[Season]) -> Result<Vec<PathBuf>> {
        if self.cli.target.is_file() {
            if self.cli.target.extension().and_then(|s| s.to_str()) == Some("json") {
                if self.should_process_scene(&self.cli.target, seasons) {
                    Ok(vec![self.cli.target.clone()])
                } else {
                    Ok(vec![])
                }
            } else {
                Err(GardenError::Config {
                    path: self.cli.target.clone(),
                    reason: "target file must be a JSON scene".to_string(),
                })
            }
        } else if self.cli.target.is_dir() {
            let mut scenes = Vec::new();
            for entry in std::fs::read_dir(&self.cli.target)? {
                let path = entry?.path();
                if path.extension().and_then(|s| s.to_str()) == Some("json")
                    && self.should_process_scene(&path, seasons)
                {
                    scenes.push(path);
                }
            }
            scenes.sort();
            Ok(scenes)
        } else {
            Err(GardenError::Config {
                path: self.cli.target.clone(),
                reason: "target must be a JSON scene file or directory".to_string(),
            })
        }
    }

    // Allow print for user feedback on skipped scenes
    #[allow(clippy::print_stderr)]
    fn should_process_scene(&self, path: &Path, seasons: &[Season]) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let all_exist = seasons
            .iter()
            .all(|season| Self::output_path(path, *season).exists());
        if all_exist {
            if !self.cli.quiet {
                eprintln!("Skipping: {} (outputs exist)", path.display());
            }
            false
        } else {
            true
        }
    }

    fn process_scene(&self, path: &Path, seasons: &[Season]) -> Result<()> {
        if let Some(pm) = &self.progress {
            pm.start_scene(path);
        }

        let config = SceneConfig::from_path(path)?;
        let assets = DirAssets::new(&self.cli.assets);
        let mut generator = ProceduralTextureGenerator::new();
        let mut registry = TypeRegistry::new();
        registry.load_types(&config, &assets, &mut generator);

        let sheet = match BorderSheet::load(&assets) {
            Ok(sheet) => sheet,
            Err(error) => {
                log::warn!("Border sheets unavailable ({error}), using procedural sheets");
                BorderSheet::procedural()
            }
        };

        let mut index = SpatialIndex::new();
        for placement in &config.placements {
            let object = placement.to_object();
            if let Err(error) = index.notify_added(&registry, &object) {
                log::warn!("Skipping placement of '{}': {error}", placement.type_key);
            }
        }
        index.flush()?;

        if index.is_empty() {
            log::warn!("Scene '{}' placed no gardens, nothing to render", path.display());
        } else {
            for season in seasons {
                let canvas = render_scene(&index, &registry, &sheet, &mut generator, *season)?;
                export_scene_as_png(&canvas, &Self::output_path(path, *season))?;
            }
        }

        if let Some(pm) = &self.progress {
            pm.complete_scene();
        }

        Ok(())
    }

    /// Output path of one scene/season pair, next to the scene file
    fn output_path(scene_path: &Path, season: Season) -> PathBuf {
        let stem = scene_path.file_stem().unwrap_or_default();
        let output_name = format!("{}{OUTPUT_SUFFIX}_{season}.png", stem.to_string_lossy());

        scene_path
            .parent()
            .map_or_else(|| PathBuf::from(&output_name), |parent| parent.join(&output_name))
    }
}
