//! Caller-facing configuration for island generation.
//!
//! Settings persist to disk as RON, accept CLI overrides via clap, and are
//! clamped into valid generation parameters before reaching the terrain core.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    Config, DebugConfig, IslandConfig, LACUNARITY_RANGE, MIN_NOISE_SCALE, OCTAVE_RANGE,
    PERSISTENCE_RANGE, PreviewConfig,
};
pub use error::ConfigError;
