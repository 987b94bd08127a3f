//! The generation pipeline: seed and parameters to noise field, land mask and quadtree.

use tracing::{debug, info_span};

use crate::error::ConfigurationError;
use crate::land_mask::LandMask;
use crate::noise_field::{NoiseField, NoiseFieldGenerator, NoiseParams};
use crate::quadtree::{QuadtreeCompressor, QuadtreeNode};

/// Everything needed to generate an [`Island`].
#[derive(Clone, Debug, PartialEq)]
pub struct IslandParams {
    /// Noise field parameters (dimensions, seed, octaves, falloff).
    pub noise: NoiseParams,
    /// Cells with noise strictly above this value are land.
    pub threshold: f64,
    /// Regions this narrow or shorter are never subdivided.
    pub min_leaf_size: usize,
}

impl Default for IslandParams {
    fn default() -> Self {
        Self {
            noise: NoiseParams::default(),
            threshold: 0.4,
            min_leaf_size: 1,
        }
    }
}

impl IslandParams {
    /// Validate every parameter without clamping.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigurationError`] found.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.noise.validate()?;
        if self.threshold.is_nan() {
            return Err(ConfigurationError::NanThreshold(self.threshold));
        }
        if self.min_leaf_size < 1 {
            return Err(ConfigurationError::InvalidMinLeafSize(self.min_leaf_size));
        }
        Ok(())
    }
}

/// Summary counts over a generated island.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IslandStats {
    /// Cells classified as land.
    pub land_cells: usize,
    /// Cells classified as water.
    pub water_cells: usize,
    /// Land cells with at least one water 4-neighbour.
    pub edge_cells: usize,
    /// Quadtree leaves.
    pub leaf_count: usize,
    /// Quadtree nodes, leaves included.
    pub node_count: usize,
    /// Quadtree depth (a single leaf is depth 1).
    pub depth: usize,
}

/// An immutable generation result: noise field, land mask and quadtree,
/// always produced together from the same parameters.
#[derive(Clone, Debug)]
pub struct Island {
    params: IslandParams,
    field: NoiseField,
    mask: LandMask,
    quadtree: QuadtreeNode,
}

impl Island {
    /// Run the full pipeline. Either all three structures are produced or none.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] if `params` fails validation.
    pub fn generate(params: &IslandParams) -> Result<Self, ConfigurationError> {
        let _span = info_span!("generate_island", seed = params.noise.seed).entered();
        params.validate()?;

        let field = NoiseFieldGenerator::new().generate(&params.noise)?;
        let mask = LandMask::from_field(&field, params.threshold);
        debug!(land = mask.land_count(), threshold = params.threshold, "thresholded field");
        let quadtree = QuadtreeCompressor::build(&mask, params.min_leaf_size)?;

        Ok(Self {
            params: params.clone(),
            field,
            mask,
            quadtree,
        })
    }

    /// Produce a fresh island for new parameters. `self` is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] if `params` fails validation.
    pub fn regenerate(&self, params: &IslandParams) -> Result<Self, ConfigurationError> {
        Self::generate(params)
    }

    /// The parameters this island was generated from.
    pub fn params(&self) -> &IslandParams {
        &self.params
    }

    /// The generated noise field.
    pub fn noise_field(&self) -> &NoiseField {
        &self.field
    }

    /// The thresholded land mask.
    pub fn land_mask(&self) -> &LandMask {
        &self.mask
    }

    /// Root of the compressed quadtree, covering the whole grid.
    pub fn quadtree(&self) -> &QuadtreeNode {
        &self.quadtree
    }

    /// Grid width in cells.
    pub fn width(&self) -> usize {
        self.mask.width()
    }

    /// Grid height in cells.
    pub fn height(&self) -> usize {
        self.mask.height()
    }

    /// Noise value at `(x, y)`, or `None` when out of bounds.
    pub fn noise_value(&self, x: usize, y: usize) -> Option<f64> {
        self.field.value(x, y)
    }

    /// Whether `(x, y)` is land, or `None` when out of bounds.
    pub fn is_land(&self, x: usize, y: usize) -> Option<bool> {
        self.mask.is_land(x, y)
    }

    /// See [`LandMask::is_edge_tile`].
    pub fn is_edge_tile(&self, x: usize, y: usize) -> bool {
        self.mask.is_edge_tile(x, y)
    }

    /// Land/water and tree shape counts.
    pub fn stats(&self) -> IslandStats {
        let land_cells = self.mask.land_count();
        IslandStats {
            land_cells,
            water_cells: self.width() * self.height() - land_cells,
            edge_cells: self.mask.edge_tiles().len(),
            leaf_count: self.quadtree.leaf_count(),
            node_count: self.quadtree.node_count(),
            depth: self.quadtree.depth(),
        }
    }

    /// Decompose into `(field, mask, quadtree)`.
    pub fn into_parts(self) -> (NoiseField, LandMask, QuadtreeNode) {
        (self.field, self.mask, self.quadtree)
    }
}

/// Generate noise field, land mask and quadtree in one call; see [`Island::generate`].
///
/// # Errors
///
/// Returns [`ConfigurationError`] if `params` fails validation.
pub fn generate_all(params: &IslandParams) -> Result<Island, ConfigurationError> {
    Island::generate(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(seed: u64) -> IslandParams {
        IslandParams {
            noise: NoiseParams {
                width: 48,
                height: 40,
                seed,
                scale: 12.0,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_mask_matches_field_threshold() {
        let island = generate_all(&params(21)).unwrap();
        let threshold = island.params().threshold;
        for y in 0..island.height() {
            for x in 0..island.width() {
                let value = island.noise_value(x, y).unwrap();
                assert_eq!(island.is_land(x, y), Some(value > threshold));
            }
        }
    }

    #[test]
    fn test_regenerate_leaves_original_untouched() {
        let original = generate_all(&params(1)).unwrap();
        let snapshot = original.land_mask().clone();
        let next = original.regenerate(&params(2)).unwrap();

        assert_eq!(original.land_mask(), &snapshot);
        assert_eq!(next.params().noise.seed, 2);
        assert_eq!(original.params().noise.seed, 1);
    }

    #[test]
    fn test_invalid_params_produce_nothing() {
        let mut bad = params(0);
        bad.min_leaf_size = 0;
        assert_eq!(
            generate_all(&bad).unwrap_err(),
            ConfigurationError::InvalidMinLeafSize(0)
        );

        let mut bad = params(0);
        bad.threshold = f64::NAN;
        assert!(matches!(
            generate_all(&bad),
            Err(ConfigurationError::NanThreshold(_))
        ));
    }

    #[test]
    fn test_stats_are_consistent() {
        let island = generate_all(&params(8)).unwrap();
        let stats = island.stats();
        assert_eq!(stats.land_cells + stats.water_cells, 48 * 40);
        assert!(stats.edge_cells <= stats.land_cells);
        assert_eq!(stats.leaf_count, island.quadtree().leaf_count());
        assert!(stats.node_count >= stats.leaf_count);
    }

    #[test]
    fn test_out_of_bounds_accessors() {
        let island = generate_all(&params(4)).unwrap();
        assert_eq!(island.noise_value(48, 0), None);
        assert_eq!(island.is_land(0, 40), None);
        assert!(!island.is_edge_tile(100, 100));
    }
}
