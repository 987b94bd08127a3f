//! Island generator binary.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p isle-app -- --seed 7 --png island.png` to write a preview.

mod export;
mod platform;

use std::process::ExitCode;

use clap::Parser;
use isle_config::{CliArgs, Config, ConfigError};
use isle_terrain::{ConfigurationError, Island, generate_all, preview};
use tracing::{error, info};

use crate::export::ExportError;
use crate::platform::{PlatformDirs, PlatformError};

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Platform(#[from] PlatformError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("generation failed: {0}")]
    Generation(#[from] ConfigurationError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let (dirs, config) = match load_config(&args) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    isle_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));
    info!(config_dir = %dirs.config_dir.display(), "configuration loaded");

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(args: &CliArgs) -> Result<(PlatformDirs, Config), AppError> {
    let dirs = PlatformDirs::resolve(args.config.as_deref())?;
    dirs.create_dirs()?;
    let mut config = Config::load_or_create(&dirs.config_dir)?;
    config.apply_cli_overrides(args);
    Ok((dirs, config))
}

fn run(config: &Config) -> Result<(), AppError> {
    let seed = config.island.resolve_seed();
    let params = config.island.to_params(seed)?;
    let island = generate_all(&params)?;
    report(&island);

    if config.preview.ascii {
        print!("{}", preview::render_ascii(island.land_mask()));
    }
    if config.preview.print_tree {
        print!("{}", island.quadtree().dump());
    }
    for path in export::write_previews(&island, &config.preview)? {
        info!(path = %path.display(), "wrote preview");
    }
    Ok(())
}

fn report(island: &Island) {
    let stats = island.stats();
    info!(
        seed = island.params().noise.seed,
        width = island.width(),
        height = island.height(),
        land = stats.land_cells,
        water = stats.water_cells,
        edges = stats.edge_cells,
        "generated island"
    );
    info!(
        nodes = stats.node_count,
        leaves = stats.leaf_count,
        depth = stats.depth,
        "compressed land mask"
    );
}
