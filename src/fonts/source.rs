// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Donor font resources

use super::outline::PathSink;
use super::Glyph;
use crate::FontError;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use ttf_parser::{Face, GlyphId};

/// An opened donor font
///
/// All glyphs are extracted from the font file when opened; the file data is
/// not retained. The resource is then edited in place by a patch and finally
/// released with [`SourceFont::close`].
///
/// Glyphs are held in glyph order. The unencoded glyph 0 (`.notdef`) is kept
/// first; every other glyph appears once per Unicode code point which maps to
/// it, so that each code point may be edited independently.
#[derive(Debug)]
pub struct SourceFont {
    name: String,
    units_per_em: u16,
    ascent: i16,
    descent: i16,
    glyphs: Vec<Glyph>,
    index: HashMap<u32, usize>,
}

impl SourceFont {
    /// Open a font file
    ///
    /// Only the first face of a collection is used.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, FontError> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|err| FontError::read(path, err))?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::from_bytes(name, &data)
    }

    /// Load a font from memory
    pub fn from_bytes(name: impl Into<String>, data: &[u8]) -> Result<Self, FontError> {
        let name = name.into();
        let face = match Face::parse(data, 0) {
            Ok(face) => face,
            Err(source) => return Err(FontError::Parse { name, source }),
        };

        // Collect unicode mappings; the first subtable to map a code point wins.
        let mut mappings = BTreeMap::new();
        if let Some(cmap) = face.tables().cmap {
            for subtable in cmap.subtables.into_iter().filter(|st| st.is_unicode()) {
                subtable.codepoints(|cp| {
                    if let Some(id) = subtable.glyph_index(cp) {
                        mappings.entry(cp).or_insert(id);
                    }
                });
            }
        }

        let mut font = SourceFont {
            name,
            units_per_em: face.units_per_em(),
            ascent: face.ascender(),
            descent: face.descender(),
            glyphs: Vec::with_capacity(mappings.len() + 1),
            index: HashMap::with_capacity(mappings.len()),
        };

        font.glyphs.push(load_glyph(&face, GlyphId(0), None));
        for (cp, id) in mappings {
            if id.0 == 0 {
                continue;
            }
            font.index.insert(cp, font.glyphs.len());
            font.glyphs.push(load_glyph(&face, id, Some(cp)));
        }

        log::info!(
            "opened {}: {} glyphs, {} units/em",
            font.name,
            font.glyphs.len(),
            font.units_per_em
        );
        Ok(font)
    }

    /// Construct from glyph records
    ///
    /// The first glyph without an encoding is used as `.notdef`; if there is
    /// none an empty `.notdef` is inserted. Later glyphs take precedence over
    /// earlier ones for the same code point.
    pub fn from_glyphs(
        name: impl Into<String>,
        units_per_em: u16,
        ascent: i16,
        descent: i16,
        glyphs: impl IntoIterator<Item = Glyph>,
    ) -> Self {
        let mut notdef = None;
        let mut font = SourceFont {
            name: name.into(),
            units_per_em,
            ascent,
            descent,
            glyphs: vec![],
            index: HashMap::new(),
        };
        let mut encoded = vec![];
        for glyph in glyphs {
            match glyph.encoding() {
                None if notdef.is_none() => notdef = Some(glyph),
                None => (),
                Some(_) => encoded.push(glyph),
            }
        }
        let width = f64::from(units_per_em) / 2.0;
        let notdef = notdef.unwrap_or_else(|| Glyph::new(None, Default::default(), width));
        font.glyphs.push(notdef);
        for glyph in encoded {
            font.insert(glyph);
        }
        font
    }

    /// Name of the font, as given when opening
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Units per em
    pub fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    /// Ascender, in font units
    pub fn ascent(&self) -> i16 {
        self.ascent
    }

    /// Descender, in font units (typically negative)
    pub fn descent(&self) -> i16 {
        self.descent
    }

    /// Number of glyphs, including `.notdef`
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Iterate over all glyphs, in glyph order
    pub fn glyphs(&self) -> impl Iterator<Item = &Glyph> {
        self.glyphs.iter()
    }

    /// Iterate mutably over all glyphs, in glyph order
    pub fn glyphs_mut(&mut self) -> impl Iterator<Item = &mut Glyph> {
        self.glyphs.iter_mut()
    }

    /// The `.notdef` glyph
    pub fn notdef(&self) -> &Glyph {
        &self.glyphs[0]
    }

    /// Select a glyph by code point
    pub fn glyph(&self, cp: u32) -> Option<&Glyph> {
        self.index.get(&cp).map(|i| &self.glyphs[*i])
    }

    /// Select a glyph by code point, mutably
    pub fn glyph_mut(&mut self, cp: u32) -> Option<&mut Glyph> {
        self.index.get(&cp).map(|i| &mut self.glyphs[*i])
    }

    /// Clear the glyph at `cp`, if any
    ///
    /// The glyph keeps its slot but is no longer worth outputting.
    pub fn clear(&mut self, cp: u32) {
        if let Some(glyph) = self.glyph_mut(cp) {
            glyph.clear();
        }
    }

    /// Copy the glyph at `from` to code point `to`
    ///
    /// An existing glyph at `to` is replaced. Returns `false` (doing nothing)
    /// if there is no glyph at `from`.
    pub fn copy_glyph(&mut self, from: u32, to: u32) -> bool {
        let Some(glyph) = self.glyph(from) else {
            return false;
        };
        let copy = glyph.with_encoding(to);
        self.insert(copy);
        true
    }

    /// Replace the glyph at `cp` with `other`'s glyph at the same code point
    ///
    /// Returns `false` if `other` lacks the code point.
    pub fn replace_glyph(&mut self, cp: u32, other: &SourceFont) -> bool {
        match other.glyph(cp) {
            Some(glyph) => {
                self.insert(glyph.clone());
                true
            }
            None => false,
        }
    }

    /// Insert an encoded glyph, replacing any existing glyph at its code point
    ///
    /// Unencoded glyphs are ignored.
    pub fn insert(&mut self, glyph: Glyph) {
        let Some(cp) = glyph.encoding() else {
            return;
        };
        match self.index.get(&cp) {
            Some(i) => self.glyphs[*i] = glyph,
            None => {
                self.index.insert(cp, self.glyphs.len());
                self.glyphs.push(glyph);
            }
        }
    }

    /// Release the font
    pub fn close(self) {
        log::debug!("closed {}", self.name);
    }
}

fn load_glyph(face: &Face, id: GlyphId, encoding: Option<u32>) -> Glyph {
    let mut sink = PathSink::default();
    // An empty glyph (e.g. space) yields `None` with nothing drawn.
    let _ = face.outline_glyph(id, &mut sink);
    let width = face.glyph_hor_advance(id).unwrap_or(0);
    Glyph::new(encoding, sink.0, f64::from(width))
}
