//! Land/water classification of a noise field.

use crate::grid::Grid;
use crate::noise_field::NoiseField;

/// A boolean land (`true`) / water (`false`) grid.
///
/// Invariant for masks built from a field: `is_land(x, y) == field(x, y) > threshold`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LandMask(Grid<bool>);

impl LandMask {
    /// Threshold a noise field. Cells exactly at `threshold` are water.
    pub fn from_field(field: &NoiseField, threshold: f64) -> Self {
        Self(field.grid().map(|_, _, &v| v > threshold))
    }

    /// Build a mask directly from rows of booleans (`rows[y][x]`).
    ///
    /// Returns `None` if there are no rows, the first row is empty, or the
    /// rows have differing lengths.
    pub fn from_rows(rows: &[Vec<bool>]) -> Option<Self> {
        let width = rows.first()?.len();
        if width == 0 || rows.iter().any(|row| row.len() != width) {
            return None;
        }
        Some(Self(Grid::from_fn(width, rows.len(), |x, y| rows[y][x])))
    }

    pub(crate) fn from_grid(grid: Grid<bool>) -> Self {
        Self(grid)
    }

    /// Mask width in cells.
    pub fn width(&self) -> usize {
        self.0.width()
    }

    /// Mask height in cells.
    pub fn height(&self) -> usize {
        self.0.height()
    }

    /// Whether `(x, y)` is land, or `None` when out of bounds.
    pub fn is_land(&self, x: usize, y: usize) -> Option<bool> {
        self.0.get(x, y).copied()
    }

    /// Number of land cells.
    pub fn land_count(&self) -> usize {
        self.0.as_slice().iter().filter(|&&land| land).count()
    }

    /// True iff `(x, y)` is land and at least one in-bounds 4-neighbour is water.
    ///
    /// Diagonals are ignored and the grid does not wrap, so land touching the
    /// map border is not an edge by that fact alone. Out-of-bounds cells are
    /// never edges.
    pub fn is_edge_tile(&self, x: usize, y: usize) -> bool {
        if self.is_land(x, y) != Some(true) {
            return false;
        }
        let water = |nx: usize, ny: usize| self.is_land(nx, ny) == Some(false);

        (x > 0 && water(x - 1, y))
            || water(x + 1, y)
            || (y > 0 && water(x, y - 1))
            || water(x, y + 1)
    }

    /// All edge tiles in row-major order.
    pub fn edge_tiles(&self) -> Vec<(usize, usize)> {
        self.0
            .iter()
            .filter(|&(x, y, _)| self.is_edge_tile(x, y))
            .map(|(x, y, _)| (x, y))
            .collect()
    }

    /// The underlying grid.
    pub fn grid(&self) -> &Grid<bool> {
        &self.0
    }
}

/// Threshold `field` into a [`LandMask`]; see [`LandMask::from_field`].
pub fn threshold(field: &NoiseField, threshold: f64) -> LandMask {
    LandMask::from_field(field, threshold)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(width: usize, height: usize, values: &[f64]) -> NoiseField {
        NoiseField::from_grid(Grid::from_fn(width, height, |x, y| values[y * width + x]))
    }

    fn mask(rows: &[&str]) -> LandMask {
        let rows: Vec<Vec<bool>> = rows
            .iter()
            .map(|r| r.chars().map(|c| c == '#').collect())
            .collect();
        LandMask::from_rows(&rows).unwrap()
    }

    #[test]
    fn test_threshold_is_strict() {
        let f = field(3, 1, &[0.3, 0.4, 0.5]);
        let m = threshold(&f, 0.4);
        assert_eq!(m.is_land(0, 0), Some(false));
        assert_eq!(m.is_land(1, 0), Some(false), "cell exactly at threshold is water");
        assert_eq!(m.is_land(2, 0), Some(true));
    }

    #[test]
    fn test_negative_threshold_makes_all_land() {
        let f = field(2, 2, &[0.0, 0.0, 0.0, 0.0]);
        let m = LandMask::from_field(&f, -1.0);
        assert_eq!(m.land_count(), 4);
    }

    #[test]
    fn test_from_rows_rejects_ragged_input() {
        assert!(LandMask::from_rows(&[]).is_none());
        assert!(LandMask::from_rows(&[vec![]]).is_none());
        assert!(LandMask::from_rows(&[vec![true, false], vec![true]]).is_none());
    }

    #[test]
    fn test_edge_tile_four_neighbours_only() {
        let m = mask(&[
            "~~~", //
            "~#~", //
            "~~~",
        ]);
        assert!(m.is_edge_tile(1, 1));
        assert!(!m.is_edge_tile(0, 0), "water is never an edge tile");

        let diag = mask(&[
            "~##", //
            "###", //
            "###",
        ]);
        assert!(!diag.is_edge_tile(1, 1), "diagonal water does not count");
        assert!(diag.is_edge_tile(1, 0));
        assert!(diag.is_edge_tile(0, 1));
    }

    #[test]
    fn test_edge_tile_no_wraparound() {
        let m = mask(&[
            "##", //
            "##",
        ]);
        assert!(!m.is_edge_tile(0, 0), "map border alone does not make an edge");
        assert!(m.edge_tiles().is_empty());
    }

    #[test]
    fn test_edge_tile_out_of_bounds() {
        let m = mask(&["#~"]);
        assert!(!m.is_edge_tile(5, 5));
        assert!(m.is_edge_tile(0, 0));
    }

    #[test]
    fn test_edge_tiles_row_major() {
        let m = mask(&[
            "~~~~", //
            "~##~", //
            "~##~", //
            "~~~~",
        ]);
        assert_eq!(m.edge_tiles(), vec![(1, 1), (2, 1), (1, 2), (2, 2)]);
    }
}
