// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Noto Emoji: the monochrome emoji donor

use super::{align_to_center, Patch};
use crate::fonts::SourceFont;
use crate::FontError;
use kurbo::Affine;
use std::path::Path;

/// Uniform scale applied to emoji
pub const SCALE: f64 = 0.84;

/// Code points up to and including this are left alone
///
/// Noto Emoji carries a few Latin and Cyrillic glyphs (digits, `#`, `*`, ...)
/// used by keycap sequences; those come from Hack instead.
pub const LAST_UNSCALED: u32 = 0x04f9;

/// The Noto Emoji donor
#[derive(Debug)]
pub struct NotoEmoji {
    font: SourceFont,
}

impl NotoEmoji {
    /// Open
    pub fn open(path: impl AsRef<Path>) -> Result<Self, FontError> {
        Ok(Self::new(SourceFont::open(path)?))
    }

    /// Wrap an already-loaded font
    pub fn new(font: SourceFont) -> Self {
        NotoEmoji { font }
    }

    fn transform(&mut self) {
        for g in self.font.glyphs_mut() {
            let emoji = g.encoding().is_some_and(|cp| cp > LAST_UNSCALED);
            if g.is_worth_outputting() && emoji {
                g.transform(Affine::scale(SCALE));
                align_to_center(g);
            }
        }
    }
}

impl Patch for NotoEmoji {
    fn patch(&mut self) -> Result<(), FontError> {
        log::info!("patching {}", self.font.name());
        self.transform();
        Ok(())
    }

    fn font(&self) -> &SourceFont {
        &self.font
    }

    fn into_font(self) -> SourceFont {
        self.font
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::fonts::Glyph;
    use crate::WIDTH;
    use kurbo::{Rect, Shape};

    #[test]
    fn only_emoji_are_scaled() {
        let glyph = |cp| {
            let path = Rect::new(0.0, -200.0, 2550.0, 1900.0).to_path(0.1);
            Glyph::new(Some(cp), path, 2550.0)
        };
        let font = SourceFont::from_glyphs(
            "NotoEmoji-Regular.ttf",
            2048,
            1900,
            -500,
            [glyph(0x23), glyph(0x1f600)],
        );
        let mut emoji = NotoEmoji::new(font);
        emoji.patch().unwrap();

        let hash = emoji.font().glyph(0x23).unwrap();
        assert_eq!(hash.width(), 2550.0);

        let smile = emoji.font().glyph(0x1f600).unwrap();
        assert_eq!(smile.width(), WIDTH);
        let bb = smile.bounding_box().unwrap();
        assert!((bb.width() - 2550.0 * SCALE).abs() < 1e-6);
        emoji.close();
    }
}
