// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Glyph outline extraction and conversion

use kurbo::{BezPath, CubicBez, PathEl, Point};

/// Maximum deviation, in font units, when approximating cubics by quadratics
const QUAD_ACCURACY: f64 = 0.5;

/// Collects a `ttf_parser` outline into a [`BezPath`]
#[derive(Debug, Default)]
pub(crate) struct PathSink(pub BezPath);

impl ttf_parser::OutlineBuilder for PathSink {
    fn move_to(&mut self, x: f32, y: f32) {
        self.0.move_to((f64::from(x), f64::from(y)));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.0.line_to((f64::from(x), f64::from(y)));
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.0
            .quad_to((f64::from(x1), f64::from(y1)), (f64::from(x), f64::from(y)));
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.0.curve_to(
            (f64::from(x1), f64::from(y1)),
            (f64::from(x2), f64::from(y2)),
            (f64::from(x), f64::from(y)),
        );
    }

    fn close(&mut self) {
        self.0.close_path();
    }
}

/// True if the path contains cubic segments
pub fn has_cubics(path: &BezPath) -> bool {
    path.elements()
        .iter()
        .any(|el| matches!(el, PathEl::CurveTo(..)))
}

/// Approximate all cubic segments by quadratic splines
///
/// TrueType `glyf` only supports quadratic curves; outlines taken from a CFF
/// donor must pass through here before encoding.
pub fn to_quadratic(path: &BezPath) -> BezPath {
    if !has_cubics(path) {
        return path.clone();
    }

    let mut out = BezPath::new();
    let mut start = Point::ZERO;
    let mut last = Point::ZERO;
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => {
                out.move_to(p);
                start = p;
                last = p;
            }
            PathEl::LineTo(p) => {
                out.line_to(p);
                last = p;
            }
            PathEl::QuadTo(p1, p2) => {
                out.quad_to(p1, p2);
                last = p2;
            }
            PathEl::CurveTo(p1, p2, p3) => {
                let cubic = CubicBez::new(last, p1, p2, p3);
                for (_, _, quad) in cubic.to_quads(QUAD_ACCURACY) {
                    out.quad_to(quad.p1, quad.p2);
                }
                last = p3;
            }
            PathEl::ClosePath => {
                out.close_path();
                last = start;
            }
        }
    }
    out
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn quadratic_paths_are_unchanged() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.quad_to((50.0, 100.0), (100.0, 0.0));
        path.close_path();
        assert!(!has_cubics(&path));
        assert_eq!(to_quadratic(&path), path);
    }

    #[test]
    fn cubics_become_quads() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.curve_to((0.0, 500.0), (500.0, 500.0), (500.0, 0.0));
        path.close_path();

        let quads = to_quadratic(&path);
        assert!(!has_cubics(&quads));
        let end = quads.elements().iter().rev().find_map(|el| match el {
            PathEl::QuadTo(_, p) => Some(*p),
            _ => None,
        });
        let end = end.unwrap();
        assert!((end.x - 500.0).abs() < 1e-9);
        assert!(end.y.abs() < 1e-9);
    }

    #[test]
    fn sink_collects_outline() {
        use ttf_parser::OutlineBuilder;

        let mut sink = PathSink::default();
        sink.move_to(0.0, 0.0);
        sink.line_to(10.0, 0.0);
        sink.line_to(10.0, 10.0);
        sink.close();
        assert_eq!(sink.0.elements().len(), 4);
    }
}
