//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Island generator command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "isle", about = "Procedural island generator")]
pub struct CliArgs {
    /// Grid width in tiles.
    #[arg(long)]
    pub width: Option<usize>,

    /// Grid height in tiles.
    #[arg(long)]
    pub height: Option<usize>,

    /// Generation seed (disables random seeding).
    #[arg(long)]
    pub seed: Option<u64>,

    /// Draw a fresh random seed.
    #[arg(long)]
    pub random_seed: bool,

    /// Number of noise octaves.
    #[arg(long)]
    pub octaves: Option<u32>,

    /// Land threshold in [0, 1].
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Quadtree leaf floor.
    #[arg(long)]
    pub min_leaf_size: Option<usize>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Write a land/water PNG preview to this path.
    #[arg(long)]
    pub png: Option<PathBuf>,

    /// Write a grayscale noise field PNG to this path.
    #[arg(long)]
    pub noise_png: Option<PathBuf>,

    /// Write a quadtree leaf PNG to this path.
    #[arg(long)]
    pub quadtree_png: Option<PathBuf>,

    /// Print the full quadtree.
    #[arg(long)]
    pub print_tree: bool,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.island.width = w;
        }
        if let Some(h) = args.height {
            self.island.height = h;
        }
        if let Some(seed) = args.seed {
            self.island.seed = seed;
            self.island.random_seed = false;
        }
        if args.random_seed {
            self.island.random_seed = true;
        }
        if let Some(octaves) = args.octaves {
            self.island.octaves = octaves;
        }
        if let Some(threshold) = args.threshold {
            self.island.threshold = threshold;
        }
        if let Some(size) = args.min_leaf_size {
            self.island.min_leaf_size = size;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        if let Some(ref path) = args.png {
            self.preview.png_path = Some(path.clone());
        }
        if let Some(ref path) = args.noise_png {
            self.preview.noise_png_path = Some(path.clone());
        }
        if let Some(ref path) = args.quadtree_png {
            self.preview.quadtree_png_path = Some(path.clone());
        }
        if args.print_tree {
            self.preview.print_tree = true;
        }
    }
}
