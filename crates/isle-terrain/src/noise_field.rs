//! Multi-octave noise field generation with an island-shaping falloff.
//!
//! Generation runs in two passes. The first sums octaves of Perlin noise per
//! cell and records the observed minimum and maximum. The second remaps every
//! cell onto `[0, 1]` against those observed extremes and multiplies by a
//! sine-product falloff that fades the field to zero at the grid border.

use std::f64::consts::PI;

use noise::{NoiseFn, Perlin};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::error::ConfigurationError;
use crate::grid::Grid;

/// Octave offsets are drawn from `-OFFSET_RANGE..OFFSET_RANGE`.
const OFFSET_RANGE: i32 = 100_000;

/// Parameters for a noise field generation run.
#[derive(Clone, Debug, PartialEq)]
pub struct NoiseParams {
    /// Field width in cells. Must be at least 1.
    pub width: usize,
    /// Field height in cells. Must be at least 1.
    pub height: usize,
    /// Seed for octave offset derivation.
    pub seed: u64,
    /// Number of summed noise layers. Must be at least 1.
    pub octaves: u32,
    /// Amplitude multiplier per octave, in `(0, 1]`.
    pub persistence: f64,
    /// Frequency multiplier per octave. Must be positive.
    pub lacunarity: f64,
    /// Spatial divisor applied to cell coordinates. Larger values produce
    /// broader features. Must be positive.
    pub scale: f64,
    /// Exponent applied to the sine-product falloff, in `[0, 1]`.
    pub falloff_exponent: f64,
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self {
            width: 100,
            height: 100,
            seed: 0,
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.0,
            scale: 20.0,
            falloff_exponent: 0.45,
        }
    }
}

impl NoiseParams {
    /// Check every parameter against its allowed domain.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigurationError`] found. Values are never clamped here.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigurationError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if !(self.scale > 0.0 && self.scale.is_finite()) {
            return Err(ConfigurationError::InvalidScale(self.scale));
        }
        if self.octaves < 1 {
            return Err(ConfigurationError::InvalidOctaves(self.octaves));
        }
        if !(self.persistence > 0.0 && self.persistence <= 1.0) {
            return Err(ConfigurationError::InvalidPersistence(self.persistence));
        }
        if !(self.lacunarity > 0.0 && self.lacunarity.is_finite()) {
            return Err(ConfigurationError::InvalidLacunarity(self.lacunarity));
        }
        if !(0.0..=1.0).contains(&self.falloff_exponent) {
            return Err(ConfigurationError::FalloffExponentOutOfRange(
                self.falloff_exponent,
            ));
        }
        Ok(())
    }
}

/// A generated noise field with values in `[0, 1]`, zero along the border.
///
/// Immutable once generated.
#[derive(Clone, Debug, PartialEq)]
pub struct NoiseField(Grid<f64>);

impl NoiseField {
    #[cfg(test)]
    pub(crate) fn from_grid(grid: Grid<f64>) -> Self {
        Self(grid)
    }

    /// Field width in cells.
    pub fn width(&self) -> usize {
        self.0.width()
    }

    /// Field height in cells.
    pub fn height(&self) -> usize {
        self.0.height()
    }

    /// The value at `(x, y)`, or `None` when out of bounds.
    pub fn value(&self, x: usize, y: usize) -> Option<f64> {
        self.0.get(x, y).copied()
    }

    /// The underlying grid.
    pub fn grid(&self) -> &Grid<f64> {
        &self.0
    }
}

/// Per-octave sampling offset, decorrelating octaves that share one noise function.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OctaveOffset {
    /// Horizontal offset in noise space.
    pub x: i32,
    /// Vertical offset in noise space.
    pub y: i32,
}

/// Raw octave sums from the first pass together with their observed range.
#[derive(Clone, Debug)]
pub(crate) struct RawField {
    pub(crate) values: Grid<f64>,
    pub(crate) min: f64,
    pub(crate) max: f64,
}

/// Draw one offset per octave, x then y.
pub fn octave_offsets<R: Rng + ?Sized>(octaves: u32, rng: &mut R) -> Vec<OctaveOffset> {
    (0..octaves)
        .map(|_| {
            let x = rng.random_range(-OFFSET_RANGE..OFFSET_RANGE);
            let y = rng.random_range(-OFFSET_RANGE..OFFSET_RANGE);
            OctaveOffset { x, y }
        })
        .collect()
}

/// Generates [`NoiseField`]s from [`NoiseParams`].
///
/// Every octave samples the same Perlin function; the seed only selects the
/// octave offsets. Output is bit-for-bit reproducible for identical parameters.
#[derive(Clone, Debug)]
pub struct NoiseFieldGenerator {
    noise: Perlin,
}

impl NoiseFieldGenerator {
    /// Create a generator over the default Perlin permutation.
    pub fn new() -> Self {
        Self {
            noise: Perlin::new(Perlin::DEFAULT_SEED),
        }
    }

    /// Generate a field, deriving octave offsets from a `ChaCha8Rng` seeded
    /// with `params.seed`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] if `params` fails validation.
    pub fn generate(&self, params: &NoiseParams) -> Result<NoiseField, ConfigurationError> {
        let mut rng = ChaCha8Rng::seed_from_u64(params.seed);
        self.generate_with_rng(params, &mut rng)
    }

    /// Generate a field using a caller-supplied RNG for octave offsets.
    ///
    /// `params.seed` is ignored; the RNG's state determines the offsets.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] if `params` fails validation.
    pub fn generate_with_rng<R: Rng + ?Sized>(
        &self,
        params: &NoiseParams,
        rng: &mut R,
    ) -> Result<NoiseField, ConfigurationError> {
        params.validate()?;

        let offsets = octave_offsets(params.octaves, rng);
        let raw = self.sample_raw(params, &offsets);
        debug!(
            width = params.width,
            height = params.height,
            octaves = params.octaves,
            min = raw.min,
            max = raw.max,
            "sampled raw noise"
        );

        let normalized = normalize(&raw);
        Ok(NoiseField(apply_falloff(
            &normalized,
            params.falloff_exponent,
        )))
    }

    /// First pass: octave sums per cell, tracking the global min and max
    /// in row-major order.
    pub(crate) fn sample_raw(&self, params: &NoiseParams, offsets: &[OctaveOffset]) -> RawField {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;

        let values = Grid::from_fn(params.width, params.height, |x, y| {
            let mut amplitude = 1.0;
            let mut frequency = 1.0;
            let mut total = 0.0;

            for offset in offsets {
                let sx = x as f64 / params.scale * frequency + f64::from(offset.x);
                let sy = y as f64 / params.scale * frequency + f64::from(offset.y);
                total += self.signed_sample(sx, sy) * amplitude;

                amplitude *= params.persistence;
                frequency *= params.lacunarity;
            }

            min = min.min(total);
            max = max.max(total);
            total
        });

        RawField { values, min, max }
    }

    /// Perlin output mapped to the unit range, then onto `[-1, 1]`.
    fn signed_sample(&self, x: f64, y: f64) -> f64 {
        let unit = ((self.noise.get([x, y]) + 1.0) * 0.5).clamp(0.0, 1.0);
        unit * 2.0 - 1.0
    }
}

impl Default for NoiseFieldGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Remap raw sums from `[min, max]` onto `[0, 1]`. A flat field maps to all zeros.
pub(crate) fn normalize(raw: &RawField) -> Grid<f64> {
    let range = raw.max - raw.min;
    raw.values.map(|_, _, &v| {
        if range > 0.0 {
            (v - raw.min) / range
        } else {
            0.0
        }
    })
}

/// Multiply every cell by [`island_falloff`].
pub(crate) fn apply_falloff(normalized: &Grid<f64>, exponent: f64) -> Grid<f64> {
    let (width, height) = (normalized.width(), normalized.height());
    normalized.map(|x, y, &v| v * island_falloff(x, y, width, height, exponent))
}

/// Bell-shaped island mask: `(sin(πx/(w-1)) · sin(πy/(h-1)))^exponent`.
///
/// Exactly zero on the border and on any axis of length 1.
pub fn island_falloff(x: usize, y: usize, width: usize, height: usize, exponent: f64) -> f64 {
    let product = edge_sine(x, width) * edge_sine(y, height);
    if product <= 0.0 {
        0.0
    } else {
        libm::pow(product, exponent)
    }
}

/// `sin(π·i/(n-1))`, pinned to exactly 0 at both ends of the axis.
fn edge_sine(i: usize, n: usize) -> f64 {
    if n <= 1 || i == 0 || i + 1 >= n {
        return 0.0;
    }
    libm::sin(PI * i as f64 / (n - 1) as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_params(seed: u64) -> NoiseParams {
        NoiseParams {
            width: 32,
            height: 24,
            seed,
            scale: 8.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_determinism_same_seed_same_field() {
        let generator = NoiseFieldGenerator::new();
        let a = generator.generate(&small_params(42)).unwrap();
        let b = generator.generate(&small_params(42)).unwrap();
        assert_eq!(
            a.grid().as_slice(),
            b.grid().as_slice(),
            "Same parameters must produce a bit-identical field"
        );
    }

    #[test]
    fn test_different_seeds_produce_different_fields() {
        let generator = NoiseFieldGenerator::new();
        let a = generator.generate(&small_params(1)).unwrap();
        let b = generator.generate(&small_params(999)).unwrap();
        assert_ne!(a.grid().as_slice(), b.grid().as_slice());
    }

    #[test]
    fn test_injected_rng_matches_seeded_generate() {
        let generator = NoiseFieldGenerator::new();
        let params = small_params(7);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let injected = generator.generate_with_rng(&params, &mut rng).unwrap();
        let seeded = generator.generate(&params).unwrap();
        assert_eq!(injected, seeded);
    }

    #[test]
    fn test_values_within_unit_range() {
        let field = NoiseFieldGenerator::new()
            .generate(&small_params(3))
            .unwrap();
        for (x, y, &v) in field.grid().iter() {
            assert!((0.0..=1.0).contains(&v), "value {v} at ({x}, {y}) outside [0, 1]");
        }
    }

    #[test]
    fn test_border_cells_are_zero() {
        let params = small_params(11);
        let field = NoiseFieldGenerator::new().generate(&params).unwrap();
        for (x, y, &v) in field.grid().iter() {
            let on_border = x == 0 || y == 0 || x == params.width - 1 || y == params.height - 1;
            if on_border {
                assert_eq!(v, 0.0, "border cell ({x}, {y}) must be zero, got {v}");
            }
        }
    }

    #[test]
    fn test_zero_exponent_keeps_border_zero() {
        let params = NoiseParams {
            falloff_exponent: 0.0,
            ..small_params(5)
        };
        let field = NoiseFieldGenerator::new().generate(&params).unwrap();
        assert_eq!(field.value(0, 5), Some(0.0));
        assert_eq!(field.value(params.width - 1, 5), Some(0.0));
    }

    #[test]
    fn test_single_row_field_is_all_zero() {
        let params = NoiseParams {
            width: 16,
            height: 1,
            ..Default::default()
        };
        let field = NoiseFieldGenerator::new().generate(&params).unwrap();
        assert!(field.grid().as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_normalize_maps_extremes() {
        let values = Grid::from_fn(3, 1, |x, _| [-2.0, 0.5, 3.0][x]);
        let normalized = normalize(&RawField {
            values,
            min: -2.0,
            max: 3.0,
        });
        assert_eq!(normalized.as_slice(), &[0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_normalize_flat_field_is_zero() {
        let values = Grid::filled(4, 4, 0.25);
        let normalized = normalize(&RawField {
            values,
            min: 0.25,
            max: 0.25,
        });
        assert!(normalized.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_single_octave_minimum_survives_falloff() {
        let params = NoiseParams {
            width: 4,
            height: 4,
            seed: 0,
            octaves: 1,
            persistence: 0.5,
            lacunarity: 2.0,
            scale: 10.0,
            falloff_exponent: 0.45,
        };
        let generator = NoiseFieldGenerator::new();
        let mut rng = ChaCha8Rng::seed_from_u64(params.seed);
        let offsets = octave_offsets(params.octaves, &mut rng);
        let normalized = normalize(&generator.sample_raw(&params, &offsets));

        let zeros: Vec<_> = normalized.iter().filter(|(_, _, v)| **v == 0.0).collect();
        let ones = normalized.iter().filter(|(_, _, v)| **v == 1.0).count();
        assert_eq!(zeros.len(), 1, "exactly one cell should normalize to 0");
        assert_eq!(ones, 1, "exactly one cell should normalize to 1");

        let field = generator.generate(&params).unwrap();
        let (x, y, _) = zeros[0];
        assert_eq!(field.value(x, y), Some(0.0), "falloff must preserve zero");
    }

    #[test]
    fn test_octave_offsets_in_range_and_reproducible() {
        let mut rng_a = ChaCha8Rng::seed_from_u64(99);
        let mut rng_b = ChaCha8Rng::seed_from_u64(99);
        let a = octave_offsets(8, &mut rng_a);
        let b = octave_offsets(8, &mut rng_b);
        assert_eq!(a, b);
        assert_eq!(a.len(), 8);
        for o in &a {
            assert!((-OFFSET_RANGE..OFFSET_RANGE).contains(&o.x));
            assert!((-OFFSET_RANGE..OFFSET_RANGE).contains(&o.y));
        }
    }

    #[test]
    fn test_falloff_peaks_at_center() {
        let center = island_falloff(5, 5, 11, 11, 0.45);
        assert!((center - 1.0).abs() < 1e-12, "center falloff should be 1, got {center}");
        assert!(island_falloff(1, 5, 11, 11, 0.45) < center);
        assert_eq!(island_falloff(0, 5, 11, 11, 0.45), 0.0);
        assert_eq!(island_falloff(3, 0, 11, 1, 0.45), 0.0);
    }

    #[test]
    fn test_validation_rejects_bad_parameters() {
        let base = NoiseParams::default();
        let cases = [
            (
                NoiseParams { width: 0, ..base.clone() },
                ConfigurationError::InvalidDimensions { width: 0, height: 100 },
            ),
            (
                NoiseParams { scale: 0.0, ..base.clone() },
                ConfigurationError::InvalidScale(0.0),
            ),
            (
                NoiseParams { scale: -3.0, ..base.clone() },
                ConfigurationError::InvalidScale(-3.0),
            ),
            (
                NoiseParams { octaves: 0, ..base.clone() },
                ConfigurationError::InvalidOctaves(0),
            ),
            (
                NoiseParams { persistence: 1.5, ..base.clone() },
                ConfigurationError::InvalidPersistence(1.5),
            ),
            (
                NoiseParams { lacunarity: 0.0, ..base.clone() },
                ConfigurationError::InvalidLacunarity(0.0),
            ),
            (
                NoiseParams { falloff_exponent: 1.2, ..base.clone() },
                ConfigurationError::FalloffExponentOutOfRange(1.2),
            ),
        ];
        for (params, expected) in cases {
            assert_eq!(params.validate(), Err(expected));
        }
        assert!(base.validate().is_ok());
    }
}
