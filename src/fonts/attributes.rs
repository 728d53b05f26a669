// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Properties for specifying the weight and style of an output font.

use bitflags::bitflags;
use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Visual weight class of a font, on a scale from 1 to 1000.
///
/// The default value is [`FontWeight::REGULAR`] or `400`.
///
/// This is written to the OS/2 `usWeightClass` field and, divided by 100, to
/// the PANOSE weight digit.
///
/// See <https://fonts.google.com/knowledge/glossary/weight>
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct FontWeight(u16);

impl FontWeight {
    /// Weight value of 300.
    pub const LIGHT: Self = Self(300);

    /// Weight value of 400. This is the default value.
    pub const REGULAR: Self = Self(400);

    /// Weight value of 500.
    pub const MEDIUM: Self = Self(500);

    /// Weight value of 700.
    pub const BOLD: Self = Self(700);

    /// Weight value of 900.
    pub const BLACK: Self = Self(900);
}

impl FontWeight {
    /// Creates a new weight attribute with the given value.
    pub const fn new(weight: u16) -> Self {
        Self(weight)
    }

    /// Returns the underlying weight value.
    pub fn value(self) -> u16 {
        self.0
    }

    /// The PANOSE `bWeight` digit
    ///
    /// ```
    /// # use saica::fonts::FontWeight;
    /// assert_eq!(FontWeight::BOLD.panose_digit(), 7);
    /// ```
    pub fn panose_digit(self) -> u8 {
        (self.0 / 100).min(u16::from(u8::MAX)) as u8
    }

    /// Conventional name of this weight
    pub fn name(self) -> &'static str {
        match self.0 {
            300 => "Light",
            500 => "Medium",
            700 => "Bold",
            900 => "Black",
            _ => "Regular",
        }
    }

    /// Parses a weight name or number.
    ///
    /// # Examples
    ///
    /// ```
    /// # use saica::fonts::FontWeight;
    /// assert_eq!(FontWeight::parse("regular"), Some(FontWeight::REGULAR));
    /// assert_eq!(FontWeight::parse("Bold"), Some(FontWeight::BOLD));
    /// assert_eq!(FontWeight::parse("850"), Some(FontWeight::new(850)));
    /// assert_eq!(FontWeight::parse("invalid"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Some(match s.to_ascii_lowercase().as_str() {
            "light" => Self::LIGHT,
            "regular" | "normal" => Self::REGULAR,
            "medium" => Self::MEDIUM,
            "bold" => Self::BOLD,
            "black" => Self::BLACK,
            _ => Self(s.parse::<u16>().ok()?),
        })
    }
}

impl Default for FontWeight {
    fn default() -> Self {
        Self::REGULAR
    }
}

impl fmt::Display for FontWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

bitflags! {
    /// OS/2 `fsSelection` bits ("stylemap")
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct StyleMap: u16 {
        const ITALIC = 1;
        const BOLD = 1 << 5;
        const REGULAR = 1 << 6;
    }
}

bitflags! {
    /// `head.macStyle` bits
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct MacStyle: u16 {
        const BOLD = 1;
        const ITALIC = 1 << 1;
    }
}

/// Style of an output font: one of the four members of a style-linked family.
///
/// The default value is [`FontStyle::Regular`].
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FontStyle {
    #[default]
    Regular,
    Italic,
    Bold,
    BoldItalic,
}

impl FontStyle {
    /// Construct from bold and italic flags
    pub fn new(bold: bool, italic: bool) -> Self {
        match (bold, italic) {
            (false, false) => FontStyle::Regular,
            (false, true) => FontStyle::Italic,
            (true, false) => FontStyle::Bold,
            (true, true) => FontStyle::BoldItalic,
        }
    }

    /// True for `Bold` and `BoldItalic`
    pub fn is_bold(self) -> bool {
        matches!(self, FontStyle::Bold | FontStyle::BoldItalic)
    }

    /// True for `Italic` and `BoldItalic`
    pub fn is_italic(self) -> bool {
        matches!(self, FontStyle::Italic | FontStyle::BoldItalic)
    }

    /// Style name, as written to name IDs 2 and 17
    pub fn name(self) -> &'static str {
        match self {
            FontStyle::Regular => "Regular",
            FontStyle::Italic => "Italic",
            FontStyle::Bold => "Bold",
            FontStyle::BoldItalic => "Bold Italic",
        }
    }

    /// OS/2 `fsSelection` value
    ///
    /// ```
    /// # use saica::fonts::{FontStyle, StyleMap};
    /// assert_eq!(FontStyle::Regular.style_map().bits(), 64);
    /// assert_eq!(FontStyle::BoldItalic.style_map().bits(), 33);
    /// ```
    pub fn style_map(self) -> StyleMap {
        match self {
            FontStyle::Regular => StyleMap::REGULAR,
            FontStyle::Italic => StyleMap::ITALIC,
            FontStyle::Bold => StyleMap::BOLD,
            FontStyle::BoldItalic => StyleMap::BOLD | StyleMap::ITALIC,
        }
    }

    /// `head.macStyle` value
    pub fn mac_style(self) -> MacStyle {
        let mut style = MacStyle::empty();
        style.set(MacStyle::BOLD, self.is_bold());
        style.set(MacStyle::ITALIC, self.is_italic());
        style
    }

    /// Parses a style name (case-insensitive, as produced by [`Self::name`]).
    ///
    /// ```
    /// # use saica::fonts::FontStyle;
    /// assert_eq!(FontStyle::parse("bold italic"), Some(FontStyle::BoldItalic));
    /// assert_eq!(FontStyle::parse("BoldItalic"), Some(FontStyle::BoldItalic));
    /// assert_eq!(FontStyle::parse("oblique"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        let s: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-')
            .collect();
        Some(match s.to_ascii_lowercase().as_str() {
            "regular" | "normal" => FontStyle::Regular,
            "italic" => FontStyle::Italic,
            "bold" => FontStyle::Bold,
            "bolditalic" => FontStyle::BoldItalic,
            _ => return None,
        })
    }
}

impl fmt::Display for FontStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
