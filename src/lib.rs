// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Saica font builder
//!
//! Saica is a composite programming typeface: Latin glyphs from Hack, CJK
//! glyphs from Rounded Mgen+, icons from Nerd Fonts and emoji from Noto Emoji.
//! This library opens each donor font, fits its glyphs to a common em and
//! cell grid (see [`patch`]) and merges the result into one TrueType font per
//! variant (see [`SaicaBuilder`]).

#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod config;
pub mod conv;
mod error;
pub mod fonts;
pub mod patch;
pub mod pipeline;
pub mod sfnt;

pub use builder::{Metadata, SaicaBuilder};
pub use config::{BuildConfig, Variant, VARIANTS};
pub use error::FontError;

/// Family name
pub const FAMILY: &str = "Saica";

/// Family version, written to the name table and `head.fontRevision`
pub const VERSION: &str = "0.1.0";

/// Units per em of the output
pub const EM: u16 = 2048;

/// Ascender of the output (0.80 em)
pub const ASCENT: i16 = 1640;

/// Descender of the output, as a positive distance (0.20 em)
pub const DESCENT: i16 = 408;

/// Full-width cell
pub const WIDTH: f64 = 2048.0;

/// Half-width cell
pub const HALF_WIDTH: f64 = 1024.0;

/// Advances above this snap to a full-width cell, others to half width
pub const CELL_THRESHOLD: f64 = 1400.0;
