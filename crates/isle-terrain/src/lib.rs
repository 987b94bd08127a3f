//! Procedural island terrain: multi-octave noise field, land/water
//! thresholding, and quadtree compression of the resulting mask.

mod error;
mod grid;
mod island;
mod land_mask;
mod noise_field;
mod quadtree;
mod rect;

pub mod preview;

pub use error::ConfigurationError;
pub use grid::Grid;
pub use island::{Island, IslandParams, IslandStats, generate_all};
pub use land_mask::{LandMask, threshold};
pub use noise_field::{
    NoiseField, NoiseFieldGenerator, NoiseParams, OctaveOffset, island_falloff, octave_offsets,
};
pub use quadtree::{LandState, QuadtreeCompressor, QuadtreeNode};
pub use rect::Rect;
