//! Inclusive integer rectangles over grid cells.

use std::fmt;

/// An axis-aligned rectangle of grid cells, inclusive on both ends.
///
/// Invariant: `x1 <= x2` and `y1 <= y2`, so every rect covers at least one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rect {
    /// Left column.
    pub x1: usize,
    /// Top row.
    pub y1: usize,
    /// Right column (inclusive).
    pub x2: usize,
    /// Bottom row (inclusive).
    pub y2: usize,
}

impl Rect {
    /// Create a rect, or `None` if the corners are inverted.
    #[must_use]
    pub fn new(x1: usize, y1: usize, x2: usize, y2: usize) -> Option<Self> {
        (x1 <= x2 && y1 <= y2).then_some(Self { x1, y1, x2, y2 })
    }

    /// The rect covering a whole `width × height` grid.
    ///
    /// Returns `None` if either dimension is zero.
    #[must_use]
    pub fn covering(width: usize, height: usize) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        Self::new(0, 0, width - 1, height - 1)
    }

    /// Number of columns covered.
    pub fn width(&self) -> usize {
        self.x2 - self.x1 + 1
    }

    /// Number of rows covered.
    pub fn height(&self) -> usize {
        self.y2 - self.y1 + 1
    }

    /// Number of cells covered.
    pub fn area(&self) -> usize {
        self.width() * self.height()
    }

    /// Returns `true` if the cell `(x, y)` lies inside this rect.
    pub fn contains(&self, x: usize, y: usize) -> bool {
        (self.x1..=self.x2).contains(&x) && (self.y1..=self.y2).contains(&y)
    }

    /// Iterate every covered cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + use<> {
        let (x1, x2) = (self.x1, self.x2);
        (self.y1..=self.y2).flat_map(move |y| (x1..=x2).map(move |x| (x, y)))
    }

    /// Split at the floor midpoint into
    /// `[top-left, top-right, bottom-left, bottom-right]`.
    ///
    /// The top/left halves absorb the extra row/column on odd spans. Requires
    /// both dimensions to be at least 2; otherwise some quadrants would be empty.
    pub fn quadrants(&self) -> Option<[Rect; 4]> {
        if self.width() < 2 || self.height() < 2 {
            return None;
        }
        let mid_x = (self.x1 + self.x2) / 2;
        let mid_y = (self.y1 + self.y2) / 2;
        Some([
            Rect { x1: self.x1, y1: self.y1, x2: mid_x, y2: mid_y },
            Rect { x1: mid_x + 1, y1: self.y1, x2: self.x2, y2: mid_y },
            Rect { x1: self.x1, y1: mid_y + 1, x2: mid_x, y2: self.y2 },
            Rect { x1: mid_x + 1, y1: mid_y + 1, x2: self.x2, y2: self.y2 },
        ])
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rect({}, {}, {}, {})", self.x1, self.y1, self.x2, self.y2)
    }
}
