// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Error types

use std::path::PathBuf;
use thiserror::Error;
use write_fonts::tables::glyf::MalformedPath;

/// Font building errors
#[derive(Error, Debug)]
pub enum FontError {
    #[error("failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("font load error: {name}")]
    Parse {
        name: String,
        #[source]
        source: ttf_parser::FaceParsingError,
    },
    #[error("glyph U+{codepoint:04X} has a malformed outline: {reason:?}")]
    Outline {
        codepoint: u32,
        reason: MalformedPath,
    },
    #[error("too many glyphs for a TrueType font: {0}")]
    TooManyGlyphs(usize),
    #[error("invalid code point U+{0:04X}")]
    InvalidCodepoint(u32),
    #[error("cmap encoding failed: {0}")]
    Cmap(String),
    #[error("no variant selected: call `build` before `generate`")]
    MissingVariant,
    #[error("glyph encoding failed")]
    Glyf(#[from] write_fonts::error::Error),
    #[error("table encoding failed")]
    Builder(#[from] write_fonts::BuilderError),
}

impl FontError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FontError::Read {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FontError::Write {
            path: path.into(),
            source,
        }
    }
}
