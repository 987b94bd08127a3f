//! Preview rendering of generation output.
//!
//! Provides [`DebugImage`] and renderers that turn a noise field, land mask or
//! quadtree into RGBA pixels or a text map. Encoding to an image format is
//! left to the caller.

mod image;
mod renderers;

pub use self::image::DebugImage;
pub use renderers::{
    LAND_COLOR, WATER_COLOR, render_ascii, render_land_preview, render_noise_preview,
    render_quadtree_overlay,
};
