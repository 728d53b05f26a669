// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Editable glyph record

use kurbo::{Affine, BezPath, Rect, Shape, Vec2};

/// A glyph: outline plus horizontal metrics
///
/// Glyphs are owned by their [`SourceFont`](super::SourceFont) (or by the
/// output builder once merged) and edited in place. All coordinates are in
/// font units of the owning font; the y-axis points up.
///
/// Side bearings follow the usual font-editor conventions:
///
/// -   the *left side bearing* is the distance from the origin to the left
///     edge of the outline's bounding box
/// -   the *right side bearing* is the distance from the right edge of the
///     bounding box to the advance width
#[derive(Clone, Debug, PartialEq)]
pub struct Glyph {
    encoding: Option<u32>,
    path: BezPath,
    width: f64,
}

impl Glyph {
    /// Construct
    ///
    /// `encoding` is the Unicode code point, or `None` for an unencoded glyph
    /// such as `.notdef`. The advance `width` is rounded to whole units.
    pub fn new(encoding: Option<u32>, path: BezPath, width: f64) -> Self {
        Glyph {
            encoding,
            path,
            width: width.round(),
        }
    }

    /// Unicode code point, if encoded
    #[inline]
    pub fn encoding(&self) -> Option<u32> {
        self.encoding
    }

    /// Copy of this glyph under another code point
    pub fn with_encoding(&self, encoding: u32) -> Self {
        Glyph {
            encoding: Some(encoding),
            ..self.clone()
        }
    }

    /// The outline
    #[inline]
    pub fn outline(&self) -> &BezPath {
        &self.path
    }

    /// Replace the outline, keeping metrics
    pub fn set_outline(&mut self, path: BezPath) {
        self.path = path;
    }

    /// True if the glyph has no outline
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.path.elements().is_empty()
    }

    /// Advance width
    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Set the advance width (rounded to whole units)
    #[inline]
    pub fn set_width(&mut self, width: f64) {
        self.width = width.round();
    }

    /// Whether this glyph should appear in an output font
    ///
    /// A glyph is worth outputting if it has an outline or a non-zero advance
    /// (e.g. a space). Cleared glyphs are not.
    pub fn is_worth_outputting(&self) -> bool {
        !self.is_empty() || self.width != 0.0
    }

    /// Remove outline and advance
    pub fn clear(&mut self) {
        self.path = BezPath::new();
        self.width = 0.0;
    }

    /// Apply an affine transform to the outline
    ///
    /// When `affine` is a positive scale plus a translation (no skew or
    /// rotation), the advance width is transformed too. Otherwise the advance
    /// is unchanged.
    pub fn transform(&mut self, affine: Affine) {
        self.path.apply_affine(affine);

        let [a, b, c, d, e, _] = affine.as_coeffs();
        if b == 0.0 && c == 0.0 && a > 0.0 && d > 0.0 {
            self.width = (self.width * a + e).round();
        }
    }

    /// Move the outline without touching the advance
    pub fn translate_outline(&mut self, dx: f64, dy: f64) {
        self.path.apply_affine(Affine::translate(Vec2::new(dx, dy)));
    }

    /// Bounding box of the outline, or `None` if empty
    pub fn bounding_box(&self) -> Option<Rect> {
        if self.is_empty() {
            None
        } else {
            Some(self.path.bounding_box())
        }
    }

    /// Left side bearing
    ///
    /// This is zero for an empty glyph.
    pub fn left_side_bearing(&self) -> f64 {
        self.bounding_box().map(|r| r.x0).unwrap_or(0.0)
    }

    /// Set the left side bearing
    ///
    /// The outline moves horizontally by the difference and the advance grows
    /// (or shrinks) by the same amount, thus the right side bearing is kept.
    pub fn set_left_side_bearing(&mut self, lsb: f64) {
        let delta = lsb - self.left_side_bearing();
        self.translate_outline(delta, 0.0);
        self.width = (self.width + delta).round();
    }

    /// Right side bearing
    pub fn right_side_bearing(&self) -> f64 {
        let x_max = self.bounding_box().map(|r| r.x1).unwrap_or(0.0);
        self.width - x_max
    }

    /// Set the right side bearing by adjusting the advance width
    pub fn set_right_side_bearing(&mut self, rsb: f64) {
        let x_max = self.bounding_box().map(|r| r.x1).unwrap_or(0.0);
        self.width = (x_max + rsb).round();
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn square(x0: f64, x1: f64, width: f64) -> Glyph {
        let rect = Rect::new(x0, 0.0, x1, 100.0);
        Glyph::new(Some(0x41), rect.to_path(0.1), width)
    }

    #[test]
    fn bearings() {
        let g = square(10.0, 90.0, 120.0);
        assert_eq!(g.left_side_bearing(), 10.0);
        assert_eq!(g.right_side_bearing(), 30.0);
    }

    #[test]
    fn set_left_bearing_keeps_right() {
        let mut g = square(10.0, 90.0, 120.0);
        g.set_left_side_bearing(40.0);
        assert_eq!(g.left_side_bearing(), 40.0);
        assert_eq!(g.right_side_bearing(), 30.0);
        assert_eq!(g.width(), 150.0);
    }

    #[test]
    fn set_right_bearing_changes_width() {
        let mut g = square(10.0, 90.0, 120.0);
        g.set_right_side_bearing(0.0);
        assert_eq!(g.width(), 90.0);
        assert_eq!(g.left_side_bearing(), 10.0);
    }

    #[test]
    fn scale_transforms_width() {
        let mut g = square(0.0, 100.0, 100.0);
        g.transform(Affine::scale(2.0));
        assert_eq!(g.width(), 200.0);
        assert_eq!(g.bounding_box(), Some(Rect::new(0.0, 0.0, 200.0, 200.0)));

        g.transform(Affine::translate((10.0, 0.0)));
        assert_eq!(g.width(), 210.0);
    }

    #[test]
    fn skew_keeps_width() {
        let mut g = square(0.0, 100.0, 100.0);
        g.transform(Affine::skew(0.5, 0.0));
        assert_eq!(g.width(), 100.0);
        let bb = g.bounding_box().unwrap();
        assert_eq!(bb.x1, 150.0);
    }

    #[test]
    fn worth_outputting() {
        let mut g = square(0.0, 100.0, 100.0);
        assert!(g.is_worth_outputting());
        g.clear();
        assert!(!g.is_worth_outputting());

        let space = Glyph::new(Some(0x20), BezPath::new(), 500.0);
        assert!(space.is_worth_outputting());
        assert_eq!(space.bounding_box(), None);
    }

    #[test]
    fn reencode() {
        let g = square(0.0, 100.0, 100.0);
        let copy = g.with_encoding(0xf2500);
        assert_eq!(copy.encoding(), Some(0xf2500));
        assert_eq!(copy.outline(), g.outline());
    }
}
