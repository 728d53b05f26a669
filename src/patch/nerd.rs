// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Nerd Fonts symbols: the icon donor

use super::Patch;
use crate::fonts::SourceFont;
use crate::FontError;
use std::path::Path;

/// The symbol donor
///
/// Symbols are merged unchanged.
#[derive(Debug)]
pub struct Nerd {
    font: SourceFont,
}

impl Nerd {
    /// Open
    pub fn open(path: impl AsRef<Path>) -> Result<Self, FontError> {
        Ok(Self::new(SourceFont::open(path)?))
    }

    /// Wrap an already-loaded font
    pub fn new(font: SourceFont) -> Self {
        Nerd { font }
    }
}

impl Patch for Nerd {
    fn patch(&mut self) -> Result<(), FontError> {
        log::debug!("{}: no edits", self.font.name());
        Ok(())
    }

    fn font(&self) -> &SourceFont {
        &self.font
    }

    fn into_font(self) -> SourceFont {
        self.font
    }
}
