// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Hack: the monospace Latin donor

use super::{align_to_center, italic_skew, Patch};
use crate::fonts::{FontStyle, SourceFont};
use crate::FontError;
use kurbo::{Affine, Vec2};
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

/// Glyphs taken from Rounded Mgen+ instead
pub const REMOVED: &[u32] = &[
    0x2026, // …
];

/// Uniform scale applied to every glyph
pub const SCALE: f64 = 0.84;

/// Box drawing and block elements
pub const BOX_DRAWING: RangeInclusive<u32> = 0x2500..=0x25af;

/// Extra scale applied to [`BOX_DRAWING`]
pub const BOX_SCALE: f64 = 2.048;

/// Vertical offset applied to [`BOX_DRAWING`] after scaling
pub const BOX_OFFSET: f64 = -60.0;

/// Code point of the replacement `m`
const LATIN_SMALL_M: u32 = 0x6d;

/// The Hack donor
#[derive(Debug)]
pub struct Hack {
    font: SourceFont,
    style: FontStyle,
    m_override: Option<PathBuf>,
}

impl Hack {
    /// Open
    ///
    /// `style` selects italic treatment; the weight is given by the file.
    pub fn open(path: impl AsRef<Path>, style: FontStyle) -> Result<Self, FontError> {
        Ok(Self::new(SourceFont::open(path)?, style))
    }

    /// Wrap an already-loaded font
    pub fn new(font: SourceFont, style: FontStyle) -> Self {
        Hack {
            font,
            style,
            m_override: None,
        }
    }

    /// Replace `m` with the glyph of the font at `path`
    ///
    /// The override is applied after scaling, so its outline must already be
    /// sized for the output. A missing file is skipped with a warning.
    ///
    /// The override must be a TrueType or OpenType font; FontForge `.sfd`
    /// sources (`m-Regular.sfd`, `m-Bold.sfd`) need converting first.
    pub fn with_m_override(mut self, path: impl Into<PathBuf>) -> Self {
        self.m_override = Some(path.into());
        self
    }

    fn remove_glyphs(&mut self) {
        for cp in REMOVED {
            self.font.clear(*cp);
        }
    }

    fn transform(&mut self) {
        // Removed glyphs must stay empty for the next donor to supply them
        for g in self.font.glyphs_mut().filter(|g| g.is_worth_outputting()) {
            g.transform(Affine::scale(SCALE));
            align_to_center(g);
        }
    }

    fn modify_m(&mut self) -> Result<(), FontError> {
        let Some(path) = self.m_override.as_ref() else {
            return Ok(());
        };
        if !path.exists() {
            log::warn!("m override {} not found; keeping Hack's m", path.display());
            return Ok(());
        }

        let m = SourceFont::open(path)?;
        if !self.font.replace_glyph(LATIN_SMALL_M, &m) {
            log::warn!("{} has no glyph for 'm'", m.name());
        }
        m.close();
        Ok(())
    }

    fn modify_border(&mut self) {
        let italic = self.style.is_italic();
        let box_transform = Affine::translate(Vec2::new(0.0, BOX_OFFSET)) * Affine::scale(BOX_SCALE);
        for g in self.font.glyphs_mut() {
            if !g.is_worth_outputting() {
                continue;
            }
            if italic {
                g.transform(italic_skew());
            }
            if g.encoding().is_some_and(|cp| BOX_DRAWING.contains(&cp)) {
                g.transform(box_transform);
                align_to_center(g);
            }
        }
    }
}

impl Patch for Hack {
    fn patch(&mut self) -> Result<(), FontError> {
        log::info!("patching {} ({})", self.font.name(), self.style);
        self.remove_glyphs();
        self.transform();
        self.modify_m()?;
        self.modify_border();
        Ok(())
    }

    fn font(&self) -> &SourceFont {
        &self.font
    }

    fn into_font(self) -> SourceFont {
        self.font
    }
}
