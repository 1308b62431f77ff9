//! CLI entry point for the garden scene rendering tool

use clap::Parser;
use zengrid::io::cli::{Cli, SceneProcessor};

fn main() -> zengrid::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let mut processor = SceneProcessor::new(cli);
    processor.process()
}
