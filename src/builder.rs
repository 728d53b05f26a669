// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! The composite font builder

use crate::fonts::{FontStyle, FontWeight, Glyph, SourceFont};
use crate::patch::ITALIC_SKEW;
use crate::sfnt::{self, FontInfo, NameTable, LANG_EN_US, LANG_JA_JP};
use crate::{FontError, Variant, ASCENT, DESCENT, EM, FAMILY, VERSION};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Name IDs
///
/// See <https://developer.apple.com/fonts/TrueType-Reference-Manual/RM06/Chap6name.html>
mod name_id {
    pub const COPYRIGHT: u16 = 0;
    pub const FAMILY: u16 = 1;
    pub const SUBFAMILY: u16 = 2;
    pub const UNIQUE_ID: u16 = 3;
    pub const FULL_NAME: u16 = 4;
    pub const VERSION: u16 = 5;
    pub const POSTSCRIPT_NAME: u16 = 6;
    pub const LICENSE: u16 = 13;
    pub const TYPOGRAPHIC_FAMILY: u16 = 16;
    pub const TYPOGRAPHIC_SUBFAMILY: u16 = 17;
}

/// Name records are written for both of these languages
const LANGUAGES: [u16; 2] = [LANG_EN_US, LANG_JA_JP];

/// Family-wide texts
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Metadata {
    pub family: String,
    pub version: String,
    pub copyright: String,
    pub license: String,
}

impl Metadata {
    /// Construct with the default family name and version
    pub fn new(copyright: impl Into<String>, license: impl Into<String>) -> Self {
        Metadata {
            family: FAMILY.to_string(),
            version: VERSION.to_string(),
            copyright: copyright.into(),
            license: license.into(),
        }
    }
}

/// Assembles one output font from patched donors
///
/// ```no_run
/// # fn main() -> Result<(), saica::FontError> {
/// use saica::patch::{Hack, Patch};
/// use saica::{Metadata, SaicaBuilder, VARIANTS};
///
/// let variant = &VARIANTS[0];
/// let mut hack = Hack::open(variant.hack, variant.style)?;
/// hack.patch()?;
///
/// let mut builder = SaicaBuilder::new(Metadata::new("(c) Saica", "OFL")).build(variant);
/// builder.add_font(hack.font());
/// builder.generate("dist")?;
/// hack.close();
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct SaicaBuilder {
    info: FontInfo,
    filename: Option<String>,
    notdef: Option<Glyph>,
    glyphs: BTreeMap<u32, Glyph>,
}

impl SaicaBuilder {
    /// Construct, setting all family-wide properties
    pub fn new(meta: Metadata) -> Self {
        let mut names = NameTable::default();
        for lang in LANGUAGES {
            names.append(lang, name_id::COPYRIGHT, meta.copyright.as_str());
            names.append(lang, name_id::FAMILY, meta.family.as_str());
            names.append(lang, name_id::VERSION, format!("Version {}", meta.version));
            names.append(lang, name_id::LICENSE, meta.license.as_str());
            names.append(lang, name_id::TYPOGRAPHIC_FAMILY, meta.family.as_str());
        }

        let info = FontInfo {
            version: meta.version,
            timestamp: FontInfo::current_timestamp(),
            units_per_em: EM,
            descent: DESCENT,
            weight: FontWeight::REGULAR,
            style: FontStyle::Regular,
            italic_skew: 0.0,
            os2_width: 5,
            os2_fstype: 0,
            os2_vendor: *b"KASH",
            // winAscent should be <= 1.16 em, winDescent <= 0.288 em
            os2_winascent: ASCENT as u16,
            os2_windescent: DESCENT as u16,
            // 0.88 em and 0.12 em
            os2_typoascent: 1802,
            os2_typodescent: 246,
            os2_typolinegap: 0,
            panose: [2, 11, 4, 9, 2, 2, 3, 2, 2, 7],
            hhea_ascent: ASCENT,
            hhea_descent: DESCENT,
            hhea_linegap: 0,
            names,
        };

        SaicaBuilder {
            info,
            filename: None,
            notdef: None,
            glyphs: BTreeMap::new(),
        }
    }

    /// Set the properties of one variant
    pub fn build(mut self, variant: &Variant) -> Self {
        let name = variant.name;
        let style_name = variant.style.name();
        let info = &mut self.info;

        info.weight = variant.weight;
        info.style = variant.style;
        info.italic_skew = if variant.style.is_italic() {
            ITALIC_SKEW
        } else {
            0.0
        };
        info.panose[2] = variant.weight.panose_digit();

        for lang in LANGUAGES {
            let names = &mut info.names;
            names.append(lang, name_id::SUBFAMILY, style_name);
            names.append(lang, name_id::UNIQUE_ID, format!("{name}; v{}", info.version));
            names.append(lang, name_id::FULL_NAME, name);
            names.append(lang, name_id::POSTSCRIPT_NAME, name);
            names.append(lang, name_id::TYPOGRAPHIC_SUBFAMILY, style_name);
        }

        log::debug!("building {name} ({}, {style_name})", variant.weight.name());
        self.filename = Some(variant.filename.to_string());
        self
    }

    /// Font properties
    pub fn info(&self) -> &FontInfo {
        &self.info
    }

    /// Output file name, once a variant is selected
    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    /// Merge glyphs from a (patched) donor
    ///
    /// Glyphs worth outputting are added by code point. Code points supplied
    /// by an earlier donor are kept; thus donors should be added in order of
    /// preference. The first donor also supplies `.notdef`.
    pub fn add_font(&mut self, font: &SourceFont) -> &mut Self {
        if self.notdef.is_none() {
            self.notdef = Some(font.notdef().clone());
        }

        let mut added = 0;
        for glyph in font.glyphs() {
            let Some(cp) = glyph.encoding() else {
                continue;
            };
            if !glyph.is_worth_outputting() {
                continue;
            }
            if char::from_u32(cp).is_none() {
                log::warn!("{}: skipping invalid code point U+{cp:04X}", font.name());
                continue;
            }
            if let std::collections::btree_map::Entry::Vacant(entry) = self.glyphs.entry(cp) {
                entry.insert(glyph.clone());
                added += 1;
            }
        }

        log::info!("{}: added {added} glyphs", font.name());
        self
    }

    /// Number of glyphs, including `.notdef`
    pub fn len(&self) -> usize {
        self.glyphs.len() + 1
    }

    /// Get the merged glyph for a code point
    pub fn glyph(&self, cp: u32) -> Option<&Glyph> {
        self.glyphs.get(&cp)
    }

    /// Encode as a TrueType font
    pub fn to_bytes(&self) -> Result<Vec<u8>, FontError> {
        let fallback;
        let notdef = match self.notdef.as_ref() {
            Some(glyph) => glyph,
            None => {
                fallback = Glyph::new(None, Default::default(), crate::HALF_WIDTH);
                &fallback
            }
        };
        let glyphs: Vec<&Glyph> = std::iter::once(notdef).chain(self.glyphs.values()).collect();
        sfnt::encode(&self.info, glyphs.into_iter())
    }

    /// Encode and write to `dist_dir`
    ///
    /// The directory is created if necessary. Returns the path written.
    pub fn generate(&self, dist_dir: impl AsRef<Path>) -> Result<PathBuf, FontError> {
        let filename = self.filename.as_ref().ok_or(FontError::MissingVariant)?;
        let dist_dir = dist_dir.as_ref();
        std::fs::create_dir_all(dist_dir).map_err(|err| FontError::write(dist_dir, err))?;

        let data = self.to_bytes()?;
        let path = dist_dir.join(filename);
        std::fs::write(&path, &data).map_err(|err| FontError::write(&path, err))?;
        log::info!(
            "generated {}: {} glyphs, {} KiB",
            path.display(),
            self.len(),
            data.len() / 1024
        );
        Ok(path)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::VARIANTS;
    use kurbo::{Rect, Shape};

    fn glyph(cp: u32, width: f64) -> Glyph {
        let path = Rect::new(0.0, 0.0, width / 2.0, 100.0).to_path(0.1);
        Glyph::new(Some(cp), path, width)
    }

    fn builder() -> SaicaBuilder {
        SaicaBuilder::new(Metadata::new("Copyright", "License"))
    }

    #[test]
    fn shared_names() {
        let b = builder();
        let names = &b.info().names;
        for lang in LANGUAGES {
            assert_eq!(names.get(lang, name_id::COPYRIGHT), Some("Copyright"));
            assert_eq!(names.get(lang, name_id::FAMILY), Some("Saica"));
            assert_eq!(names.get(lang, name_id::VERSION), Some("Version 0.1.0"));
            assert_eq!(names.get(lang, name_id::LICENSE), Some("License"));
            assert_eq!(names.get(lang, name_id::TYPOGRAPHIC_FAMILY), Some("Saica"));
        }
        assert_eq!(names.len(), 10);
        assert_eq!(b.filename(), None);
    }

    #[test]
    fn variant_names() {
        let b = builder().build(&VARIANTS[3]);
        let info = b.info();
        assert_eq!(info.names.get(LANG_EN_US, name_id::FULL_NAME), Some("Saica-BoldItalic"));
        assert_eq!(info.weight, FontWeight::BOLD);
        assert_eq!(info.panose, [2, 11, 7, 9, 2, 2, 3, 2, 2, 7]);
        assert_eq!(info.style.style_map().bits(), 33);
        assert!(info.italic_angle() < 0.0);

        let names = &info.names;
        assert_eq!(names.get(LANG_JA_JP, name_id::SUBFAMILY), Some("Bold Italic"));
        assert_eq!(
            names.get(LANG_EN_US, name_id::UNIQUE_ID),
            Some("Saica-BoldItalic; v0.1.0")
        );
        assert_eq!(
            names.get(LANG_EN_US, name_id::POSTSCRIPT_NAME),
            Some("Saica-BoldItalic")
        );
        assert_eq!(b.filename(), Some("Saica-BoldItalic.ttf"));
    }

    #[test]
    fn first_donor_wins() {
        let first = SourceFont::from_glyphs("first", EM, ASCENT, -DESCENT, [glyph(0x41, 1024.0)]);
        let mut cleared = glyph(0x42, 1024.0);
        cleared.clear();
        let second = SourceFont::from_glyphs(
            "second",
            EM,
            ASCENT,
            -DESCENT,
            [glyph(0x41, 2048.0), glyph(0x3042, 2048.0), cleared],
        );

        let mut b = builder().build(&VARIANTS[0]);
        b.add_font(&first).add_font(&second);
        assert_eq!(b.len(), 3);
        assert_eq!(b.glyph(0x41).map(|g| g.width()), Some(1024.0));
        assert_eq!(b.glyph(0x3042).map(|g| g.width()), Some(2048.0));
        assert!(b.glyph(0x42).is_none());
    }

    #[test]
    fn invalid_code_points_are_skipped() {
        let font = SourceFont::from_glyphs(
            "broken",
            EM,
            ASCENT,
            -DESCENT,
            [glyph(0x41, 1024.0), glyph(0xd800, 1024.0), glyph(0x110000, 1024.0)],
        );
        let mut b = builder().build(&VARIANTS[0]);
        b.add_font(&font);
        assert_eq!(b.len(), 2);
        assert!(b.glyph(0xd800).is_none());
        assert!(b.glyph(0x110000).is_none());
        assert!(b.to_bytes().is_ok());
    }

    #[test]
    fn generate_requires_variant() {
        let dir = tempfile::tempdir().unwrap();
        let err = builder().generate(dir.path()).unwrap_err();
        assert!(matches!(err, FontError::MissingVariant));
    }
}
