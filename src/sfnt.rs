// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! TrueType encoding of the merged font
//!
//! Table construction is delegated to `write-fonts`; this module only derives
//! the values (bounding boxes, metric extremes, OS/2 summaries) from the
//! glyph records and the font properties held in [`FontInfo`].

use crate::conv::{round_i16, round_u16, to_u32};
use crate::fonts::{outline, FontStyle, FontWeight, Glyph};
use crate::FontError;
use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};
use write_fonts::tables::cmap::Cmap;
use write_fonts::tables::glyf::{GlyfLocaBuilder, Glyph as TtGlyph, SimpleGlyph};
use write_fonts::tables::head::{Head, MacStyle as HeadMacStyle};
use write_fonts::tables::hhea::Hhea;
use write_fonts::tables::hmtx::{Hmtx, LongMetric};
use write_fonts::tables::loca::LocaFormat;
use write_fonts::tables::maxp::Maxp;
use write_fonts::tables::name::{Name, NameRecord};
use write_fonts::tables::os2::{Os2, SelectionFlags};
use write_fonts::tables::post::Post;
use write_fonts::types::{
    FWord, Fixed, GlyphId, LongDateTime, NameId, Tag, UfWord, Version16Dot16,
};
use write_fonts::FontBuilder;

/// Windows platform
const PLATFORM_WINDOWS: u16 = 3;
/// Windows Unicode BMP encoding
const ENCODING_UNICODE_BMP: u16 = 1;

/// English (United States)
pub const LANG_EN_US: u16 = 0x409;
/// Japanese
pub const LANG_JA_JP: u16 = 0x411;

/// Name table contents
///
/// Records are keyed by language and name ID; appending a record with an
/// existing key replaces the previous string.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NameTable(BTreeMap<(u16, u16), String>);

impl NameTable {
    /// Add or replace a Windows-platform record
    pub fn append(&mut self, lang: u16, name_id: u16, text: impl Into<String>) {
        self.0.insert((lang, name_id), text.into());
    }

    /// Look up a record
    pub fn get(&self, lang: u16, name_id: u16) -> Option<&str> {
        self.0.get(&(lang, name_id)).map(String::as_str)
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.0.len()
    }

    fn to_table(&self) -> Name {
        let mut records: Vec<NameRecord> = self
            .0
            .iter()
            .map(|((lang, name_id), text)| {
                NameRecord::new(
                    PLATFORM_WINDOWS,
                    ENCODING_UNICODE_BMP,
                    *lang,
                    NameId::new(*name_id),
                    text.clone().into(),
                )
            })
            .collect();
        records.sort();
        Name::new(records.into_iter().collect())
    }
}

/// Font-wide properties of the output
///
/// Vertical metrics follow the Google Fonts recommendation for CJK fonts:
/// <https://googlefonts.github.io/gf-guide/metrics.html#cjk-vertical-metrics>
#[derive(Clone, Debug, PartialEq)]
pub struct FontInfo {
    pub version: String,
    /// Creation time, in seconds since the Unix epoch
    pub timestamp: i64,
    pub units_per_em: u16,
    /// Positive distance below the baseline; sets the underline position
    pub descent: i16,
    pub weight: FontWeight,
    pub style: FontStyle,
    /// Slant of italic variants, in radians (zero when upright)
    pub italic_skew: f64,
    pub os2_width: u16,
    pub os2_fstype: u16,
    pub os2_vendor: [u8; 4],
    pub os2_winascent: u16,
    pub os2_windescent: u16,
    pub os2_typoascent: i16,
    /// Positive distance below the baseline
    pub os2_typodescent: i16,
    pub os2_typolinegap: i16,
    pub panose: [u8; 10],
    pub hhea_ascent: i16,
    /// Positive distance below the baseline
    pub hhea_descent: i16,
    pub hhea_linegap: i16,
    pub names: NameTable,
}

impl FontInfo {
    /// Font revision parsed from a `major.minor[.patch]` version string
    ///
    /// ```
    /// # use saica::sfnt::FontInfo;
    /// assert_eq!(FontInfo::revision("0.1.0"), 0.1);
    /// assert_eq!(FontInfo::revision("2.25"), 2.25);
    /// assert_eq!(FontInfo::revision("dev"), 0.0);
    /// ```
    pub fn revision(version: &str) -> f64 {
        let mut parts = version.split('.');
        let major = parts.next().and_then(|s| s.parse::<u16>().ok());
        let minor = parts.next().unwrap_or("0");
        match (major, minor.parse::<u16>()) {
            (Some(major), Ok(_)) => format!("{major}.{minor}").parse().unwrap_or(0.0),
            _ => 0.0,
        }
    }

    /// Italic angle in degrees, counter-clockwise from vertical
    pub fn italic_angle(&self) -> f64 {
        -self.italic_skew.to_degrees()
    }

    /// Build time: `SOURCE_DATE_EPOCH` if set, otherwise now
    pub fn current_timestamp() -> i64 {
        if let Some(epoch) = std::env::var("SOURCE_DATE_EPOCH")
            .ok()
            .and_then(|s| s.trim().parse().ok())
        {
            return epoch;
        }
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
            .unwrap_or(0)
    }
}

/// Seconds from 1904-01-01 (the SFNT epoch) to 1970-01-01
const SFNT_EPOCH_OFFSET: i64 = 2_082_844_800;

/// Per-glyph values after outline encoding
struct Encoded {
    glyph: TtGlyph,
    advance: u16,
    bbox: Option<[i16; 4]>,
    points: usize,
    contours: usize,
}

fn encode_glyph(glyph: &Glyph) -> Result<Encoded, FontError> {
    let advance = round_u16(glyph.width());
    if glyph.is_empty() {
        return Ok(Encoded {
            glyph: TtGlyph::Empty,
            advance,
            bbox: None,
            points: 0,
            contours: 0,
        });
    }

    let path = outline::to_quadratic(glyph.outline());
    let simple = SimpleGlyph::from_bezpath(&path).map_err(|reason| FontError::Outline {
        codepoint: glyph.encoding().unwrap_or(0),
        reason,
    })?;
    let bbox = simple.bbox;
    let (points, contours) = count_points(&path);
    Ok(Encoded {
        glyph: TtGlyph::Simple(simple),
        advance,
        bbox: Some([bbox.x_min, bbox.y_min, bbox.x_max, bbox.y_max]),
        points,
        contours,
    })
}

/// Upper bounds on (points, contours) of a quadratic outline, for `maxp`
fn count_points(path: &kurbo::BezPath) -> (usize, usize) {
    use kurbo::PathEl;

    let mut points = 0;
    let mut contours = 0;
    for el in path.elements() {
        match el {
            PathEl::MoveTo(_) => {
                contours += 1;
                points += 1;
            }
            PathEl::LineTo(_) => points += 1,
            PathEl::QuadTo(..) => points += 2,
            PathEl::CurveTo(..) => points += 3,
            PathEl::ClosePath => (),
        }
    }
    (points, contours)
}

/// Encode a TrueType font
///
/// `glyphs` are in glyph order: `.notdef` first, then encoded glyphs. Each
/// encoded glyph is mapped from its code point in `cmap`.
pub fn encode<'a>(
    info: &FontInfo,
    glyphs: impl ExactSizeIterator<Item = &'a Glyph>,
) -> Result<Vec<u8>, FontError> {
    let num_glyphs = glyphs.len();
    let Ok(num_glyphs) = u16::try_from(num_glyphs) else {
        return Err(FontError::TooManyGlyphs(num_glyphs));
    };

    let mut glyf_builder = GlyfLocaBuilder::new();
    let mut mappings = Vec::with_capacity(usize::from(num_glyphs));
    let mut h_metrics = Vec::with_capacity(usize::from(num_glyphs));
    let mut bounds: Option<[i16; 4]> = None;
    let mut extents = Extents::default();
    let mut max_points = 0;
    let mut max_contours = 0;
    let mut char_range: Option<(u32, u32)> = None;
    let mut heights = OutlineHeights::default();
    let mut ranges = UnicodeRanges::default();

    for (gid, glyph) in glyphs.enumerate() {
        let encoded = encode_glyph(glyph)?;
        glyf_builder.add_glyph(&encoded.glyph)?;

        let lsb = encoded.bbox.map(|b| b[0]).unwrap_or(0);
        h_metrics.push(LongMetric::new(encoded.advance, lsb));
        extents.add(encoded.advance, encoded.bbox);
        max_points = max_points.max(encoded.points);
        max_contours = max_contours.max(encoded.contours);

        if let Some(b) = encoded.bbox {
            bounds = Some(match bounds {
                None => b,
                Some(u) => [u[0].min(b[0]), u[1].min(b[1]), u[2].max(b[2]), u[3].max(b[3])],
            });
        }

        if let Some(cp) = glyph.encoding() {
            let c = char::from_u32(cp).ok_or(FontError::InvalidCodepoint(cp))?;
            mappings.push((c, GlyphId::new(to_u32(gid))));
            char_range = Some(match char_range {
                None => (cp, cp),
                Some((lo, hi)) => (lo.min(cp), hi.max(cp)),
            });
            heights.add(cp, encoded.bbox);
            ranges.add(cp);
        }
    }

    let (glyf, loca, loca_format) = glyf_builder.build();
    let [x_min, y_min, x_max, y_max] = bounds.unwrap_or_default();
    let timestamp = LongDateTime::new(info.timestamp.saturating_add(SFNT_EPOCH_OFFSET));

    let head = Head {
        font_revision: Fixed::from_f64(FontInfo::revision(&info.version)),
        units_per_em: info.units_per_em,
        created: timestamp,
        modified: timestamp,
        x_min,
        y_min,
        x_max,
        y_max,
        mac_style: HeadMacStyle::from_bits_truncate(info.style.mac_style().bits()),
        lowest_rec_ppem: 8,
        font_direction_hint: 2,
        index_to_loc_format: match loca_format {
            LocaFormat::Short => 0,
            LocaFormat::Long => 1,
        },
        ..Default::default()
    };

    let (caret_slope_rise, caret_slope_run) = if info.italic_skew != 0.0 {
        let rise = info.units_per_em;
        let run = round_i16(f64::from(rise) * info.italic_skew.tan());
        (round_i16(f64::from(rise)), run)
    } else {
        (1, 0)
    };
    let hhea = Hhea {
        ascender: FWord::new(info.hhea_ascent),
        descender: FWord::new(-info.hhea_descent),
        line_gap: FWord::new(info.hhea_linegap),
        advance_width_max: UfWord::new(extents.advance_max),
        min_left_side_bearing: FWord::new(extents.min_lsb()),
        min_right_side_bearing: FWord::new(extents.min_rsb()),
        x_max_extent: FWord::new(extents.x_max_extent()),
        caret_slope_rise,
        caret_slope_run,
        caret_offset: 0,
        number_of_h_metrics: num_glyphs,
        ..Default::default()
    };
    let hmtx = Hmtx::new(h_metrics, vec![]);

    let maxp = Maxp {
        num_glyphs,
        max_points: Some(u16::try_from(max_points).unwrap_or(u16::MAX)),
        max_contours: Some(u16::try_from(max_contours).unwrap_or(u16::MAX)),
        max_composite_points: Some(0),
        max_composite_contours: Some(0),
        max_zones: Some(1),
        max_twilight_points: Some(0),
        max_storage: Some(0),
        max_function_defs: Some(0),
        max_instruction_defs: Some(0),
        max_stack_elements: Some(0),
        max_size_of_instructions: Some(0),
        max_component_elements: Some(0),
        max_component_depth: Some(0),
        ..Default::default()
    };

    let (first_char, last_char) = char_range.unwrap_or_default();
    let os2 = Os2 {
        x_avg_char_width: extents.avg_advance(),
        us_weight_class: info.weight.value(),
        us_width_class: info.os2_width,
        fs_type: info.os2_fstype,
        panose_10: info.panose,
        ul_unicode_range_1: ranges.0[0],
        ul_unicode_range_2: ranges.0[1],
        ul_unicode_range_3: ranges.0[2],
        ul_unicode_range_4: ranges.0[3],
        ach_vend_id: Tag::new(&info.os2_vendor),
        fs_selection: SelectionFlags::from_bits_truncate(info.style.style_map().bits()),
        us_first_char_index: first_char.min(0xffff) as u16,
        us_last_char_index: last_char.min(0xffff) as u16,
        s_typo_ascender: info.os2_typoascent,
        s_typo_descender: -info.os2_typodescent,
        s_typo_line_gap: info.os2_typolinegap,
        us_win_ascent: info.os2_winascent,
        us_win_descent: info.os2_windescent,
        // Latin 1 and JIS/Japan
        ul_code_page_range_1: Some(1 | 1 << 17),
        ul_code_page_range_2: Some(0),
        sx_height: Some(heights.x_height),
        s_cap_height: Some(heights.cap_height),
        us_default_char: Some(0),
        us_break_char: Some(0x20),
        us_max_context: Some(0),
        ..Default::default()
    };
    let post = Post {
        version: Version16Dot16::VERSION_3_0,
        italic_angle: Fixed::from_f64(info.italic_angle()),
        underline_position: FWord::new(-info.descent / 2),
        underline_thickness: FWord::new(round_i16(f64::from(info.units_per_em) / 20.0)),
        is_fixed_pitch: 1,
        ..Default::default()
    };

    let cmap = Cmap::from_mappings(mappings).map_err(|err| FontError::Cmap(format!("{err:?}")))?;
    let name = info.names.to_table();

    let mut builder = FontBuilder::new();
    builder
        .add_table(&head)?
        .add_table(&hhea)?
        .add_table(&maxp)?
        .add_table(&os2)?
        .add_table(&hmtx)?
        .add_table(&cmap)?
        .add_table(&loca)?
        .add_table(&glyf)?
        .add_table(&name)?
        .add_table(&post)?;
    Ok(builder.build())
}

/// Horizontal extremes over all glyphs, for `hhea`
///
/// Bearing and extent extremes only cover glyphs with an outline; they are
/// zero when there are none.
#[derive(Debug, Default)]
struct Extents {
    advance_max: u16,
    min_lsb: Option<i16>,
    min_rsb: Option<i16>,
    x_max_extent: Option<i16>,
    advance_sum: u64,
    advance_count: u64,
}

impl Extents {
    fn add(&mut self, advance: u16, bbox: Option<[i16; 4]>) {
        self.advance_max = self.advance_max.max(advance);
        if advance > 0 {
            self.advance_sum += u64::from(advance);
            self.advance_count += 1;
        }
        if let Some([x_min, _, x_max, _]) = bbox {
            let rsb = i32::from(advance) - i32::from(x_max);
            let rsb = rsb.clamp(i16::MIN.into(), i16::MAX.into()) as i16;
            self.min_lsb = Some(self.min_lsb.map_or(x_min, |v| v.min(x_min)));
            self.min_rsb = Some(self.min_rsb.map_or(rsb, |v| v.min(rsb)));
            self.x_max_extent = Some(self.x_max_extent.map_or(x_max, |v| v.max(x_max)));
        }
    }

    fn min_lsb(&self) -> i16 {
        self.min_lsb.unwrap_or(0)
    }

    fn min_rsb(&self) -> i16 {
        self.min_rsb.unwrap_or(0)
    }

    fn x_max_extent(&self) -> i16 {
        self.x_max_extent.unwrap_or(0)
    }

    fn avg_advance(&self) -> i16 {
        if self.advance_count == 0 {
            return 0;
        }
        round_i16(self.advance_sum as f64 / self.advance_count as f64)
    }
}

/// `sxHeight` and `sCapHeight`, measured from `x` and `H`
#[derive(Debug, Default)]
struct OutlineHeights {
    x_height: i16,
    cap_height: i16,
}

impl OutlineHeights {
    fn add(&mut self, cp: u32, bbox: Option<[i16; 4]>) {
        let Some([_, _, _, y_max]) = bbox else {
            return;
        };
        match cp {
            0x78 => self.x_height = y_max,
            0x48 => self.cap_height = y_max,
            _ => (),
        }
    }
}

/// OS/2 `ulUnicodeRange` bits
///
/// See <https://learn.microsoft.com/en-us/typography/opentype/spec/os2#ulunicoderange1-bits-031ulunicoderange2-bits-3263ulunicoderange3-bits-6495ulunicoderange4-bits-96127>
const UNICODE_RANGES: &[(u32, u32, u8)] = &[
    (0x0000, 0x007f, 0),
    (0x0080, 0x00ff, 1),
    (0x0100, 0x017f, 2),
    (0x0180, 0x024f, 3),
    (0x0250, 0x02af, 4),
    (0x02b0, 0x02ff, 5),
    (0x0300, 0x036f, 6),
    (0x0370, 0x03ff, 7),
    (0x0400, 0x052f, 9),
    (0x1e00, 0x1eff, 29),
    (0x2000, 0x206f, 31),
    (0x2070, 0x209f, 32),
    (0x20a0, 0x20cf, 33),
    (0x2100, 0x214f, 35),
    (0x2150, 0x218f, 36),
    (0x2190, 0x21ff, 37),
    (0x2200, 0x22ff, 38),
    (0x2300, 0x23ff, 39),
    (0x2400, 0x243f, 40),
    (0x2440, 0x245f, 41),
    (0x2460, 0x24ff, 42),
    (0x2500, 0x257f, 43),
    (0x2580, 0x259f, 44),
    (0x25a0, 0x25ff, 45),
    (0x2600, 0x26ff, 46),
    (0x2700, 0x27bf, 47),
    (0x3000, 0x303f, 48),
    (0x3040, 0x309f, 49),
    (0x30a0, 0x30ff, 50),
    (0x3200, 0x32ff, 54),
    (0x3300, 0x33ff, 55),
    (0x4e00, 0x9fff, 59),
    (0xe000, 0xf8ff, 60),
    (0xf900, 0xfaff, 61),
    (0xfe30, 0xfe4f, 65),
    (0xff00, 0xffef, 68),
    (0xf0000, 0x10ffff, 90),
];

/// Bit 57: any code point beyond the BMP
const NON_PLANE_0: u8 = 57;

/// Accumulated `ulUnicodeRange1..=4`
#[derive(Debug, Default)]
struct UnicodeRanges([u32; 4]);

impl UnicodeRanges {
    fn set(&mut self, bit: u8) {
        self.0[usize::from(bit / 32)] |= 1 << (bit % 32);
    }

    fn add(&mut self, cp: u32) {
        if cp > 0xffff {
            self.set(NON_PLANE_0);
        }
        if let Some((_, _, bit)) = UNICODE_RANGES
            .iter()
            .find(|(lo, hi, _)| (*lo..=*hi).contains(&cp))
        {
            self.set(*bit);
        }
    }
}
