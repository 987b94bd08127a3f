//! Preview renderers for noise fields, land masks and quadtrees.

use super::image::DebugImage;
use crate::land_mask::LandMask;
use crate::noise_field::NoiseField;
use crate::quadtree::QuadtreeNode;

/// Land fill color.
pub const LAND_COLOR: [u8; 3] = [51, 204, 51];
/// Water fill color.
pub const WATER_COLOR: [u8; 3] = [25, 76, 204];

/// Paint land green and water blue, one pixel per cell.
///
/// With `flip_y`, row 0 of the mask lands on the bottom row of the image.
pub fn render_land_preview(mask: &LandMask, flip_y: bool) -> DebugImage {
    let (width, height) = (mask.width() as u32, mask.height() as u32);
    let mut image = DebugImage::new(width, height);

    for (x, y, &land) in mask.grid().iter() {
        let (px, py) = (x as u32, y as u32);
        let py = if flip_y { height - 1 - py } else { py };
        image.set_pixel(px, py, land_color(land));
    }

    image
}

/// Grayscale rendering of the field: 0 is black, 1 is white.
pub fn render_noise_preview(field: &NoiseField) -> DebugImage {
    let mut image = DebugImage::new(field.width() as u32, field.height() as u32);

    for (x, y, &value) in field.grid().iter() {
        let level = (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        image.set_pixel(x as u32, y as u32, [level; 3]);
    }

    image
}

/// Fill each leaf with its tag color and outline leaves large enough to
/// show a border (both sides at least 3 cells).
///
/// Mixed regions under the leaf floor show up as a single flat color, which
/// makes the approximation visible when compared with [`render_land_preview`].
pub fn render_quadtree_overlay(tree: &QuadtreeNode, mask: &LandMask) -> DebugImage {
    let mut image = DebugImage::new(mask.width() as u32, mask.height() as u32);

    for (rect, land) in tree.leaves() {
        let fill = land_color(land);
        let outline = rect.width() >= 3 && rect.height() >= 3;
        for (x, y) in rect.cells() {
            if x >= mask.width() || y >= mask.height() {
                continue;
            }
            let on_border = x == rect.x1 || x == rect.x2 || y == rect.y1 || y == rect.y2;
            let color = if outline && on_border {
                darken(fill)
            } else {
                fill
            };
            image.set_pixel(x as u32, y as u32, color);
        }
    }

    image
}

/// Text map: `#` inland, `*` edge tile, `~` water. One line per row.
pub fn render_ascii(mask: &LandMask) -> String {
    let mut out = String::with_capacity((mask.width() + 1) * mask.height());
    for y in 0..mask.height() {
        for x in 0..mask.width() {
            let c = match mask.is_land(x, y) {
                Some(true) if mask.is_edge_tile(x, y) => '*',
                Some(true) => '#',
                _ => '~',
            };
            out.push(c);
        }
        out.push('\n');
    }
    out
}

fn land_color(land: bool) -> [u8; 3] {
    if land { LAND_COLOR } else { WATER_COLOR }
}

fn darken([r, g, b]: [u8; 3]) -> [u8; 3] {
    [r / 3, g / 3, b / 3]
}
