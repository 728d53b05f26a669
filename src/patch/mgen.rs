// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Rounded Mgen+: the CJK donor

use super::{align_to_center, cell_width, italic_skew, Patch};
use crate::fonts::{FontStyle, SourceFont};
use crate::{FontError, CELL_THRESHOLD};
use kurbo::{Affine, Vec2};
use std::ops::RangeInclusive;
use std::path::Path;

/// Uniform scale applied to every glyph
pub const SCALE: f64 = 1.82;

/// Box drawing: stashed to [`STASH_OFFSET`], then removed in favour of Hack's
pub const BOX_DRAWING: RangeInclusive<u32> = 0x2500..=0x257f;

/// Offset added to stashed box drawing code points (into plane 15)
pub const STASH_OFFSET: u32 = 0xf0000;

/// Punctuation which keeps its position within the cell instead of centering
pub const IGNORING_CENTER: &[u32] = &[
    0x3001, 0x3002, 0x3008, 0x3009, 0x300a, 0x300b, 0x300c, 0x300d, //
    0x300e, 0x300f, 0x3010, 0x3011, 0x3014, 0x3015, 0x3016, 0x3017, //
    0x3018, 0x3019, 0x301a, 0x301b, 0x301d, 0x301e, 0x3099, 0x309a, //
    0x309b, 0x309c,
];

/// The Rounded Mgen+ donor
#[derive(Debug)]
pub struct MgenPlus {
    font: SourceFont,
    style: FontStyle,
}

impl MgenPlus {
    /// Open
    pub fn open(path: impl AsRef<Path>, style: FontStyle) -> Result<Self, FontError> {
        Ok(Self::new(SourceFont::open(path)?, style))
    }

    /// Wrap an already-loaded font
    pub fn new(font: SourceFont, style: FontStyle) -> Self {
        MgenPlus { font, style }
    }

    /// Extra advance given to italic glyphs so the slanted outline still fits
    fn skew_allowance(&self) -> f64 {
        f64::from(self.font.ascent()) * SCALE * 0.5
    }

    fn transform(&mut self) {
        let italic = self.style.is_italic();
        let allowance = self.skew_allowance();

        for g in self.font.glyphs_mut() {
            g.transform(Affine::scale(SCALE));

            let mut threshold = CELL_THRESHOLD;
            if italic {
                g.transform(italic_skew());
                g.set_width(g.width() + allowance);
                threshold += allowance;
            }

            let width = cell_width(g.width(), threshold);
            g.transform(Affine::translate(Vec2::new((width - g.width()) / 2.0, 0.0)));
            g.set_width(width);

            let keep_position = g.encoding().is_some_and(|cp| IGNORING_CENTER.contains(&cp));
            if !keep_position {
                align_to_center(g);
            }
        }
    }

    fn stash_box_drawing(&mut self) {
        for cp in BOX_DRAWING {
            self.font.copy_glyph(cp, cp + STASH_OFFSET);
        }
    }

    fn remove_glyphs(&mut self) {
        for cp in BOX_DRAWING {
            self.font.clear(cp);
        }
    }
}

impl Patch for MgenPlus {
    fn patch(&mut self) -> Result<(), FontError> {
        log::info!("patching {} ({})", self.font.name(), self.style);
        self.transform();
        self.stash_box_drawing();
        self.remove_glyphs();
        Ok(())
    }

    fn font(&self) -> &SourceFont {
        &self.font
    }

    fn into_font(self) -> SourceFont {
        self.font
    }
}
