//! Quadtree compression of a land mask into uniform rectangles.

use std::fmt;

use tracing::debug;

use crate::error::ConfigurationError;
use crate::grid::Grid;
use crate::land_mask::LandMask;
use crate::rect::Rect;

/// Classification of a quadtree node's region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LandState {
    /// Every cell (or, below the leaf floor, the top-left cell) is land.
    Land,
    /// Every cell (or, below the leaf floor, the top-left cell) is water.
    Water,
    /// The region was subdivided; only branches are mixed.
    Mixed,
}

impl From<bool> for LandState {
    fn from(land: bool) -> Self {
        if land { Self::Land } else { Self::Water }
    }
}

impl fmt::Display for LandState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Land => "Land",
            Self::Water => "Water",
            Self::Mixed => "Mixed",
        })
    }
}

/// A node of the compressed mask.
///
/// Each child is owned by exactly one parent; the tree is read-only once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuadtreeNode {
    /// A region represented by a single land/water tag.
    Leaf {
        /// Region covered by this leaf.
        rect: Rect,
        /// `true` for land, `false` for water.
        land: bool,
    },
    /// A mixed region split into four children.
    /// Children are ordered: \[top-left, top-right, bottom-left, bottom-right\].
    Branch {
        /// Region covered by this branch.
        rect: Rect,
        /// The four child nodes, exactly tiling `rect`.
        children: Box<[QuadtreeNode; 4]>,
    },
}

impl QuadtreeNode {
    /// The region this node covers.
    #[must_use]
    pub fn rect(&self) -> Rect {
        match self {
            QuadtreeNode::Leaf { rect, .. } | QuadtreeNode::Branch { rect, .. } => *rect,
        }
    }

    /// `Land`/`Water` for leaves, `Mixed` for branches.
    #[must_use]
    pub fn land_state(&self) -> LandState {
        match self {
            QuadtreeNode::Leaf { land, .. } => LandState::from(*land),
            QuadtreeNode::Branch { .. } => LandState::Mixed,
        }
    }

    /// The four children of a branch, or `None` for a leaf.
    #[must_use]
    pub fn children(&self) -> Option<&[QuadtreeNode; 4]> {
        match self {
            QuadtreeNode::Leaf { .. } => None,
            QuadtreeNode::Branch { children, .. } => Some(&**children),
        }
    }

    /// Returns true if this node is a leaf.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        matches!(self, QuadtreeNode::Leaf { .. })
    }

    /// Number of levels below and including this node (a lone leaf has depth 1).
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            QuadtreeNode::Leaf { .. } => 1,
            QuadtreeNode::Branch { children, .. } => {
                1 + children.iter().map(QuadtreeNode::depth).max().unwrap_or(0)
            }
        }
    }

    /// Total number of nodes in this subtree.
    #[must_use]
    pub fn node_count(&self) -> usize {
        match self {
            QuadtreeNode::Leaf { .. } => 1,
            QuadtreeNode::Branch { children, .. } => {
                1 + children.iter().map(QuadtreeNode::node_count).sum::<usize>()
            }
        }
    }

    /// Number of leaves in this subtree.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        match self {
            QuadtreeNode::Leaf { .. } => 1,
            QuadtreeNode::Branch { children, .. } => {
                children.iter().map(QuadtreeNode::leaf_count).sum()
            }
        }
    }

    /// Collect all leaves as `(rect, land)` in pre-order.
    #[must_use]
    pub fn leaves(&self) -> Vec<(Rect, bool)> {
        let mut result = Vec::new();
        self.collect_leaves(&mut result);
        result
    }

    fn collect_leaves(&self, result: &mut Vec<(Rect, bool)>) {
        match self {
            QuadtreeNode::Leaf { rect, land } => result.push((*rect, *land)),
            QuadtreeNode::Branch { children, .. } => {
                for child in children.iter() {
                    child.collect_leaves(result);
                }
            }
        }
    }

    /// Find the leaf containing cell `(x, y)`, or `None` if the cell lies
    /// outside this node.
    #[must_use]
    pub fn find_leaf(&self, x: usize, y: usize) -> Option<&QuadtreeNode> {
        if !self.rect().contains(x, y) {
            return None;
        }
        match self {
            QuadtreeNode::Leaf { .. } => Some(self),
            QuadtreeNode::Branch { children, .. } => {
                children.iter().find_map(|child| child.find_leaf(x, y))
            }
        }
    }

    /// Paint every leaf tag over its rect, producing the mask this tree represents.
    ///
    /// Cells outside the tree's rect are water.
    #[must_use]
    pub fn rasterize(&self, width: usize, height: usize) -> LandMask {
        let grid = Grid::from_fn(width, height, |x, y| {
            self.find_leaf(x, y)
                .is_some_and(|leaf| leaf.land_state() == LandState::Land)
        });
        LandMask::from_grid(grid)
    }

    /// Render the full tree, one node per line, indented two spaces per level.
    #[must_use]
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.dump_into(0, &mut out);
        out
    }

    fn dump_into(&self, depth: usize, out: &mut String) {
        out.push_str(&" ".repeat(depth * 2));
        out.push_str(&self.to_string());
        out.push('\n');
        if let Some(children) = self.children() {
            for child in children {
                child.dump_into(depth + 1, out);
            }
        }
    }
}

impl fmt::Display for QuadtreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QuadtreeNode({}) - {}", self.rect(), self.land_state())
    }
}

/// Builds quadtrees over a [`LandMask`].
pub struct QuadtreeCompressor<'a> {
    mask: &'a LandMask,
    min_leaf_size: usize,
}

impl<'a> QuadtreeCompressor<'a> {
    /// Compress `mask` into a tree rooted at `(0, 0, width-1, height-1)`.
    ///
    /// Regions whose width or height is at most `min_leaf_size` are never
    /// split; if mixed, they become a leaf tagged with their top-left cell.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidMinLeafSize`] if `min_leaf_size` is 0
    /// and [`ConfigurationError::InvalidDimensions`] for an empty mask.
    pub fn build(
        mask: &'a LandMask,
        min_leaf_size: usize,
    ) -> Result<QuadtreeNode, ConfigurationError> {
        if min_leaf_size < 1 {
            return Err(ConfigurationError::InvalidMinLeafSize(min_leaf_size));
        }
        let root = Rect::covering(mask.width(), mask.height()).ok_or(
            ConfigurationError::InvalidDimensions {
                width: mask.width(),
                height: mask.height(),
            },
        )?;

        let compressor = Self {
            mask,
            min_leaf_size,
        };
        let tree = compressor.build_node(root);
        debug!(
            nodes = tree.node_count(),
            leaves = tree.leaf_count(),
            depth = tree.depth(),
            "built quadtree"
        );
        Ok(tree)
    }

    fn build_node(&self, rect: Rect) -> QuadtreeNode {
        let first = self.cell(rect.x1, rect.y1);

        if self.is_uniform(rect, first) {
            return QuadtreeNode::Leaf { rect, land: first };
        }
        if rect.width() <= self.min_leaf_size || rect.height() <= self.min_leaf_size {
            return QuadtreeNode::Leaf { rect, land: first };
        }

        match rect.quadrants() {
            Some(quads) => QuadtreeNode::Branch {
                rect,
                children: Box::new(quads.map(|q| self.build_node(q))),
            },
            // Unreachable while min_leaf_size >= 1: both sides exceed it here.
            None => QuadtreeNode::Leaf { rect, land: first },
        }
    }

    /// Scan `rect` row by row, stopping at the first cell that differs from `first`.
    fn is_uniform(&self, rect: Rect, first: bool) -> bool {
        rect.cells().all(|(x, y)| self.cell(x, y) == first)
    }

    fn cell(&self, x: usize, y: usize) -> bool {
        self.mask.grid()[(x, y)]
    }
}
