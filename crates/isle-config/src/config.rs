//! Configuration structs with sensible defaults and RON persistence.

use std::fmt::Display;
use std::path::{Path, PathBuf};

use isle_terrain::{IslandParams, NoiseParams};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";

/// Smallest noise scale handed to the generator.
pub const MIN_NOISE_SCALE: f64 = 0.0001;
/// Allowed octave counts.
pub const OCTAVE_RANGE: (u32, u32) = (1, 10);
/// Allowed persistence values.
pub const PERSISTENCE_RANGE: (f64, f64) = (0.01, 1.0);
/// Allowed lacunarity values.
pub const LACUNARITY_RANGE: (f64, f64) = (0.1, 8.0);

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Island generation settings.
    pub island: IslandConfig,
    /// Preview output settings.
    pub preview: PreviewConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Island generation settings as a designer edits them.
///
/// Values may be out of range; [`IslandConfig::to_params`] clamps them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct IslandConfig {
    /// Grid width in tiles.
    pub width: usize,
    /// Grid height in tiles.
    pub height: usize,
    /// Spatial divisor for noise sampling.
    pub noise_scale: f64,
    /// Noise values strictly above this become land, in `[0, 1]`.
    pub threshold: f64,
    /// Exponent of the island falloff, in `[0, 1]`.
    pub island_falloff: f64,
    /// Generation seed.
    pub seed: u64,
    /// Ignore `seed` and draw a fresh one on every run.
    pub random_seed: bool,
    /// Number of noise octaves, in `[1, 10]`.
    pub octaves: u32,
    /// Per-octave amplitude decay, in `[0.01, 1]`.
    pub persistence: f64,
    /// Per-octave frequency growth, in `[0.1, 8]`.
    pub lacunarity: f64,
    /// Quadtree leaf floor.
    pub min_leaf_size: usize,
}

/// Which previews the application produces after generating.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PreviewConfig {
    /// Print a text map of the island to stdout.
    pub ascii: bool,
    /// Write a land/water PNG here, if set.
    pub png_path: Option<PathBuf>,
    /// Write a grayscale noise field PNG here, if set.
    pub noise_png_path: Option<PathBuf>,
    /// Write a PNG of the quadtree leaves here, if set.
    pub quadtree_png_path: Option<PathBuf>,
    /// Print the full quadtree.
    pub print_tree: bool,
    /// Put mask row 0 at the bottom of the PNG.
    pub flip_y: bool,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for IslandConfig {
    fn default() -> Self {
        Self {
            width: 100,
            height: 100,
            noise_scale: 20.0,
            threshold: 0.4,
            island_falloff: 0.45,
            seed: 0,
            random_seed: false,
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.0,
            min_leaf_size: 1,
        }
    }
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            ascii: true,
            png_path: None,
            noise_png_path: None,
            quadtree_png_path: None,
            print_tree: false,
            flip_y: true,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

// --- Clamping into generation parameters ---

impl IslandConfig {
    /// The seed to generate with: `seed`, or a fresh random one when
    /// `random_seed` is set.
    pub fn resolve_seed(&self) -> u64 {
        if self.random_seed {
            let seed = rand::rng().random::<u64>();
            log::info!("Using random seed {seed}");
            seed
        } else {
            self.seed
        }
    }

    /// Clamp every setting into its allowed range and build generation parameters.
    ///
    /// Each adjusted value is reported with `log::warn!`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSettings`] for values clamping cannot
    /// repair, such as NaN.
    pub fn to_params(&self, seed: u64) -> Result<IslandParams, ConfigError> {
        let params = IslandParams {
            noise: NoiseParams {
                width: clamped("width", self.width, 1, usize::MAX),
                height: clamped("height", self.height, 1, usize::MAX),
                seed,
                octaves: clamped("octaves", self.octaves, OCTAVE_RANGE.0, OCTAVE_RANGE.1),
                persistence: clamped(
                    "persistence",
                    self.persistence,
                    PERSISTENCE_RANGE.0,
                    PERSISTENCE_RANGE.1,
                ),
                lacunarity: clamped(
                    "lacunarity",
                    self.lacunarity,
                    LACUNARITY_RANGE.0,
                    LACUNARITY_RANGE.1,
                ),
                scale: clamped("noise_scale", self.noise_scale, MIN_NOISE_SCALE, f64::MAX),
                falloff_exponent: clamped("island_falloff", self.island_falloff, 0.0, 1.0),
            },
            threshold: clamped("threshold", self.threshold, 0.0, 1.0),
            min_leaf_size: clamped("min_leaf_size", self.min_leaf_size, 1, usize::MAX),
        };
        params.validate()?;
        Ok(params)
    }
}

/// Clamp `value` into `[min, max]`, warning when it moves. NaN passes through.
fn clamped<T: PartialOrd + Copy + Display>(name: &str, value: T, min: T, max: T) -> T {
    let result = if value < min {
        min
    } else if value > max {
        max
    } else {
        return value;
    };
    log::warn!("{name} = {value} is out of range, clamped to {result}");
    result
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let config = Self::read(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(2)
            .enumerate_arrays(false);
        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(config_dir.join(CONFIG_FILE), serialized)
            .map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Re-read the file: `Some(new_config)` if it differs from `self`, `None` otherwise.
    ///
    /// Callers regenerate the island only when this returns `Some`.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = Self::read(&config_dir.join(CONFIG_FILE))?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        ron::from_str(&contents).map_err(ConfigError::ParseError)
    }
}
