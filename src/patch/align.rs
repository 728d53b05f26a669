// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Horizontal alignment of a glyph within its advance

use crate::fonts::Glyph;
use crate::{CELL_THRESHOLD, HALF_WIDTH, WIDTH};

/// Choose the cell for an advance: full width above `threshold`, else half
///
/// ```
/// # use saica::patch::cell_width;
/// assert_eq!(cell_width(1820.0, 1400.0), 2048.0);
/// assert_eq!(cell_width(1400.0, 1400.0), 1024.0);
/// ```
pub fn cell_width(width: f64, threshold: f64) -> f64 {
    if width > threshold {
        WIDTH
    } else {
        HALF_WIDTH
    }
}

/// Snap the advance to a cell and center the outline within it
///
/// The cell is full width if the current advance exceeds
/// [`CELL_THRESHOLD`], otherwise half width. Both side bearings are then set
/// to their mean. An empty glyph only has its advance snapped.
pub fn align_to_center(glyph: &mut Glyph) {
    let width = cell_width(glyph.width(), CELL_THRESHOLD);
    glyph.set_width(width);
    if glyph.is_empty() {
        return;
    }

    let bearing = (glyph.left_side_bearing() + glyph.right_side_bearing()) / 2.0;
    glyph.set_left_side_bearing(bearing);
    glyph.set_right_side_bearing(bearing);
}

/// Move the outline to the origin, keeping the advance
pub fn align_to_left(glyph: &mut Glyph) {
    let width = glyph.width();
    glyph.set_left_side_bearing(0.0);
    glyph.set_width(width);
}

/// Move the outline so its right edge touches the advance, keeping the advance
pub fn align_to_right(glyph: &mut Glyph) {
    let width = glyph.width();
    if let Some(bb) = glyph.bounding_box() {
        glyph.set_left_side_bearing(width - bb.width());
    }
    glyph.set_width(width);
}
