// Build a family from synthetic donor fonts and inspect the output

use kurbo::{BezPath, Circle, Rect, Shape};
use saica::fonts::{Glyph, SourceFont};
use saica::pipeline::{build_variant, metadata};
use saica::{BuildConfig, Metadata, SaicaBuilder, ASCENT, DESCENT, EM, VARIANTS};
use std::path::Path;
use ttf_parser::{Face, Tag};

fn rect(cp: u32, x0: f64, y0: f64, x1: f64, y1: f64, width: f64) -> Glyph {
    Glyph::new(Some(cp), Rect::new(x0, y0, x1, y1).to_path(0.1), width)
}

/// Encode glyphs as a font file, using the crate's own encoder
fn donor_bytes(name: &str, glyphs: Vec<Glyph>) -> Vec<u8> {
    let font = SourceFont::from_glyphs(name, EM, ASCENT, -DESCENT, glyphs);
    let mut builder = SaicaBuilder::new(Metadata::new("test", "test"));
    builder.add_font(&font);
    builder.to_bytes().unwrap()
}

fn hack_glyphs() -> Vec<Glyph> {
    vec![
        Glyph::new(None, Rect::new(100.0, 0.0, 1100.0, 1500.0).to_path(0.1), 1233.0),
        Glyph::new(Some(0x20), BezPath::new(), 1233.0),
        rect(0x41, 20.0, 0.0, 1213.0, 1493.0, 1233.0),
        rect(0x48, 150.0, 0.0, 1083.0, 1493.0, 1233.0),
        rect(0x6d, 100.0, 0.0, 1133.0, 1120.0, 1233.0),
        Glyph::new(
            Some(0x6f),
            Circle::new((616.0, 560.0), 500.0).to_path(0.1),
            1233.0,
        ),
        rect(0x78, 80.0, 0.0, 1153.0, 1120.0, 1233.0),
        rect(0x2026, 150.0, 0.0, 1083.0, 200.0, 1233.0),
        rect(0x2500, 0.0, 500.0, 1233.0, 700.0, 1233.0),
    ]
}

fn mgen_glyphs() -> Vec<Glyph> {
    vec![
        rect(0x41, 50.0, 0.0, 450.0, 730.0, 500.0),
        rect(0x2026, 100.0, 0.0, 900.0, 100.0, 1000.0),
        rect(0x2500, 0.0, 300.0, 1000.0, 400.0, 1000.0),
        rect(0x3001, 60.0, -50.0, 300.0, 200.0, 1000.0),
        rect(0x3042, 80.0, -60.0, 920.0, 800.0, 1000.0),
    ]
}

fn emoji_glyphs() -> Vec<Glyph> {
    vec![
        rect(0x23, 0.0, 0.0, 1000.0, 1500.0, 1275.0),
        rect(0x1f600, 0.0, -200.0, 2550.0, 1900.0, 2550.0),
    ]
}

fn write_sources(dir: &Path) -> BuildConfig {
    let hack = donor_bytes("hack", hack_glyphs());
    let mgen = donor_bytes("mgen", mgen_glyphs());
    let emoji = donor_bytes("emoji", emoji_glyphs());
    for name in ["Hack-Regular.ttf", "Hack-Bold.ttf"] {
        std::fs::write(dir.join(name), &hack).unwrap();
    }
    for name in [
        "rounded-mgenplus-1m-regular.ttf",
        "rounded-mgenplus-1m-bold.ttf",
    ] {
        std::fs::write(dir.join(name), &mgen).unwrap();
    }
    std::fs::write(dir.join("NotoEmoji-Regular.ttf"), &emoji).unwrap();
    std::fs::write(dir.join("COPYRIGHT"), "Copyright 2024 Saica\n").unwrap();
    std::fs::write(dir.join("LICENSE"), "SIL Open Font License 1.1\n").unwrap();

    BuildConfig {
        source_dir: dir.to_path_buf(),
        dist_dir: dir.join("dist"),
        copyright: dir.join("COPYRIGHT"),
        license: dir.join("LICENSE"),
        ..BuildConfig::default()
    }
}

fn advance(face: &Face, c: char) -> Option<u16> {
    face.glyph_index(c).and_then(|id| face.glyph_hor_advance(id))
}

fn name(face: &Face, name_id: u16, lang: u16) -> Option<String> {
    face.names()
        .into_iter()
        .find(|n| n.name_id == name_id && n.language_id == lang)
        .and_then(|n| n.to_string())
}

/// Read a big-endian `i16` from a raw table
fn table_i16(face: &Face, tag: &[u8; 4], offset: usize) -> i16 {
    let data = face.raw_face().table(Tag::from_bytes(tag)).unwrap();
    i16::from_be_bytes([data[offset], data[offset + 1]])
}

/// Read a big-endian `i64` from a raw table
fn table_i64(face: &Face, tag: &[u8; 4], offset: usize) -> i64 {
    let data = face.raw_face().table(Tag::from_bytes(tag)).unwrap();
    let mut bytes = [0; 8];
    bytes.copy_from_slice(&data[offset..offset + 8]);
    i64::from_be_bytes(bytes)
}

#[test]
fn donor_round_trip() {
    let bytes = donor_bytes("hack", hack_glyphs());
    let font = SourceFont::from_bytes("hack", &bytes).unwrap();
    assert_eq!(font.units_per_em(), EM);
    assert_eq!(font.ascent(), ASCENT);
    assert_eq!(font.len(), hack_glyphs().len());
    assert_eq!(font.glyph(0x41).map(|g| g.width()), Some(1233.0));
    assert_eq!(font.glyph(0x20).map(|g| g.is_empty()), Some(true));

    let bb = font.glyph(0x41).and_then(|g| g.bounding_box()).unwrap();
    assert_eq!(bb, Rect::new(20.0, 0.0, 1213.0, 1493.0));
    assert!(!font.notdef().is_empty());
}

#[test]
fn regular() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_sources(dir.path());
    let meta = metadata(&config).unwrap();

    let path = build_variant(&config, &meta, &VARIANTS[0]).unwrap();
    assert_eq!(path, config.dist_dir.join("Saica-Regular.ttf"));

    let data = std::fs::read(&path).unwrap();
    let face = Face::parse(&data, 0).unwrap();
    assert_eq!(face.units_per_em(), EM);
    assert_eq!(face.ascender(), ASCENT);
    assert_eq!(face.descender(), -DESCENT);
    assert!(face.is_monospaced());
    assert!(!face.is_bold());
    assert!(!face.is_italic());
    assert_eq!(face.italic_angle(), 0.0);
    assert_eq!(table_i16(&face, b"hhea", 18), 1);
    assert_eq!(table_i16(&face, b"hhea", 20), 0);
    // head.created and head.modified, no earlier than the Unix epoch
    assert!(table_i64(&face, b"head", 20) >= 2_082_844_800);
    assert_eq!(table_i64(&face, b"head", 20), table_i64(&face, b"head", 28));

    // Latin from Hack, half width
    assert_eq!(advance(&face, 'A'), Some(1024));
    assert_eq!(advance(&face, ' '), Some(1024));
    assert_eq!(advance(&face, 'o'), Some(1024));
    // removed from Hack, supplied by Mgen+ at full width
    assert_eq!(advance(&face, '…'), Some(2048));
    // CJK from Mgen+
    assert_eq!(advance(&face, 'あ'), Some(2048));
    assert_eq!(advance(&face, '、'), Some(2048));
    // box drawing from Hack, Mgen+'s stashed in plane 15
    assert!(face.glyph_index('\u{2500}').is_some());
    assert!(face.glyph_index('\u{f2500}').is_some());
    // emoji scaled to a full cell; '#' is below the emoji range and unscaled
    assert_eq!(advance(&face, '😀'), Some(2048));
    assert_eq!(advance(&face, '#'), Some(1275));

    assert_eq!(name(&face, 1, 0x409).as_deref(), Some("Saica"));
    assert_eq!(name(&face, 1, 0x411).as_deref(), Some("Saica"));
    assert_eq!(name(&face, 0, 0x409).as_deref(), Some("Copyright 2024 Saica\n"));
    assert_eq!(name(&face, 2, 0x409).as_deref(), Some("Regular"));
    assert_eq!(name(&face, 4, 0x409).as_deref(), Some("Saica-Regular"));
    assert_eq!(name(&face, 5, 0x409).as_deref(), Some("Version 0.1.0"));
    assert_eq!(name(&face, 13, 0x411).as_deref(), Some("SIL Open Font License 1.1"));
}

#[test]
fn bold_italic() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_sources(dir.path());
    let meta = metadata(&config).unwrap();

    let path = build_variant(&config, &meta, &VARIANTS[3]).unwrap();
    let data = std::fs::read(&path).unwrap();
    let face = Face::parse(&data, 0).unwrap();
    assert!(face.is_bold());
    assert!(face.is_italic());
    assert_eq!(
        face.tables().os2.map(|os2| os2.weight().to_number()),
        Some(700)
    );

    // slant of 0.25 rad
    let angle = face.italic_angle();
    assert!((angle + 14.3239).abs() < 0.01, "italic angle {angle}");
    assert_eq!(table_i16(&face, b"hhea", 18), 2048);
    assert_eq!(table_i16(&face, b"hhea", 20), 523);

    assert_eq!(advance(&face, 'A'), Some(1024));
    assert_eq!(advance(&face, 'あ'), Some(2048));
    assert_eq!(name(&face, 2, 0x409).as_deref(), Some("Bold Italic"));
    assert_eq!(name(&face, 17, 0x411).as_deref(), Some("Bold Italic"));
    assert_eq!(
        name(&face, 3, 0x409).as_deref(),
        Some("Saica-BoldItalic; v0.1.0")
    );
}

#[test]
fn missing_donor() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = write_sources(dir.path());
    config.source_dir = dir.path().join("nowhere");
    let meta = metadata(&config).unwrap();
    let err = build_variant(&config, &meta, &VARIANTS[0]).unwrap_err();
    assert!(matches!(err, saica::FontError::Read { .. }));
}

#[test]
fn empty_font_metrics() {
    let builder = SaicaBuilder::new(Metadata::new("", "")).build(&VARIANTS[0]);
    let data = builder.to_bytes().unwrap();
    let face = Face::parse(&data, 0).unwrap();
    assert_eq!(face.number_of_glyphs(), 1);
    // hhea minLeftSideBearing, minRightSideBearing, xMaxExtent
    assert_eq!(table_i16(&face, b"hhea", 12), 0);
    assert_eq!(table_i16(&face, b"hhea", 14), 0);
    assert_eq!(table_i16(&face, b"hhea", 16), 0);
}
