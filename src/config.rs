// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Build configuration and the table of output variants

use crate::fonts::{FontStyle, FontWeight};
use crate::{FontError, FAMILY};
use std::path::{Path, PathBuf};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One output font of the family
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Variant {
    /// Full name and PostScript name, e.g. `Saica-BoldItalic`
    pub name: &'static str,
    /// Output file name
    pub filename: &'static str,
    /// OS/2 weight class
    pub weight: FontWeight,
    /// Style (italic and bold flags, style names)
    pub style: FontStyle,
    /// Hack donor file name
    pub hack: &'static str,
    /// Rounded Mgen+ donor file name
    pub mgen_plus: &'static str,
}

impl Variant {
    /// Find a variant by (case-insensitive) name, file name or style name
    ///
    /// ```
    /// # use saica::Variant;
    /// assert_eq!(Variant::find("Saica-Bold").map(|v| v.filename), Some("Saica-Bold.ttf"));
    /// assert_eq!(Variant::find("bold italic").map(|v| v.name), Some("Saica-BoldItalic"));
    /// assert!(Variant::find("Saica-Light").is_none());
    /// ```
    pub fn find(key: &str) -> Option<&'static Variant> {
        let style = FontStyle::parse(key);
        VARIANTS.iter().find(|v| {
            v.name.eq_ignore_ascii_case(key)
                || v.filename.eq_ignore_ascii_case(key)
                || Some(v.style) == style
        })
    }

    /// Name of the `m` override file in the source directory
    ///
    /// A TrueType conversion of the `m-Regular.sfd` / `m-Bold.sfd` sources.
    pub fn m_override(&self) -> &'static str {
        if self.style.is_bold() {
            "m-Bold.ttf"
        } else {
            "m-Regular.ttf"
        }
    }
}

/// All output variants
pub const VARIANTS: [Variant; 4] = [
    Variant {
        name: "Saica-Regular",
        filename: "Saica-Regular.ttf",
        weight: FontWeight::REGULAR,
        style: FontStyle::Regular,
        hack: "Hack-Regular.ttf",
        mgen_plus: "rounded-mgenplus-1m-regular.ttf",
    },
    Variant {
        name: "Saica-RegularItalic",
        filename: "Saica-RegularItalic.ttf",
        weight: FontWeight::REGULAR,
        style: FontStyle::Italic,
        hack: "Hack-Regular.ttf",
        mgen_plus: "rounded-mgenplus-1m-regular.ttf",
    },
    Variant {
        name: "Saica-Bold",
        filename: "Saica-Bold.ttf",
        weight: FontWeight::BOLD,
        style: FontStyle::Bold,
        hack: "Hack-Bold.ttf",
        mgen_plus: "rounded-mgenplus-1m-bold.ttf",
    },
    Variant {
        name: "Saica-BoldItalic",
        filename: "Saica-BoldItalic.ttf",
        weight: FontWeight::BOLD,
        style: FontStyle::BoldItalic,
        hack: "Hack-Bold.ttf",
        mgen_plus: "rounded-mgenplus-1m-bold.ttf",
    },
];

/// Where inputs are read from and outputs written to
///
/// The default matches a checkout of the font repository: donor fonts in the
/// working directory, `COPYRIGHT` and `LICENSE` texts alongside, and output
/// to `./dist`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct BuildConfig {
    /// Directory holding donor fonts and `m` overrides
    pub source_dir: PathBuf,
    /// Output directory
    pub dist_dir: PathBuf,
    /// Copyright notice, written to name ID 0
    pub copyright: PathBuf,
    /// License text, written to name ID 13
    pub license: PathBuf,
    /// Symbol donor file name, relative to `source_dir`
    pub nerd: String,
    /// Emoji donor file name, relative to `source_dir`
    pub emoji: String,
    /// Family name
    pub family: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        BuildConfig {
            source_dir: PathBuf::from("."),
            dist_dir: PathBuf::from("dist"),
            copyright: PathBuf::from("COPYRIGHT"),
            license: PathBuf::from("LICENSE"),
            nerd: "SymbolsNerdFontMono-Regular.ttf".to_string(),
            emoji: "NotoEmoji-Regular.ttf".to_string(),
            family: FAMILY.to_string(),
        }
    }
}

impl BuildConfig {
    /// Alternative default constructor
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a file name against the source directory
    pub fn source(&self, name: impl AsRef<Path>) -> PathBuf {
        self.source_dir.join(name)
    }

    /// Read the copyright notice
    pub fn read_copyright(&self) -> Result<String, FontError> {
        read_text(&self.copyright)
    }

    /// Read the license text
    pub fn read_license(&self) -> Result<String, FontError> {
        read_text(&self.license)
    }
}

/// Read a text file verbatim
fn read_text(path: &Path) -> Result<String, FontError> {
    std::fs::read_to_string(path).map_err(|err| FontError::read(path, err))
}
