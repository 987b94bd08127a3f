//! Generation error types.

/// Invalid generation parameters, detected before any work is done.
///
/// Generation is a pure function of its parameters, so retrying with the same
/// input always fails the same way.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigurationError {
    /// Width or height is zero.
    #[error("grid dimensions must be at least 1x1, got {width}x{height}")]
    InvalidDimensions {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },

    /// Noise scale is zero, negative, or not finite.
    #[error("noise scale must be positive and finite, got {0}")]
    InvalidScale(f64),

    /// Fewer than one octave requested.
    #[error("octave count must be at least 1, got {0}")]
    InvalidOctaves(u32),

    /// Persistence outside `(0, 1]`.
    #[error("persistence must lie in (0, 1], got {0}")]
    InvalidPersistence(f64),

    /// Lacunarity is zero, negative, or not finite.
    #[error("lacunarity must be positive and finite, got {0}")]
    InvalidLacunarity(f64),

    /// Island falloff exponent outside `[0, 1]`.
    #[error("island falloff exponent must lie in [0, 1], got {0}")]
    FalloffExponentOutOfRange(f64),

    /// Minimum quadtree leaf size is zero.
    #[error("minimum leaf size must be at least 1, got {0}")]
    InvalidMinLeafSize(usize),

    /// Threshold is NaN.
    #[error("land threshold must be a number, got {0}")]
    NanThreshold(f64),
}
