// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Donor font patches
//!
//! Each donor font is wrapped by a type implementing [`Patch`]. A patch is a
//! fixed sequence of per-glyph edits (scale, skew, translate, width and side
//! bearing adjustments) which fits the donor's glyphs to the output em and
//! cell grid. Glyphs are selected by Unicode code point or code point range.
//!
//! The usual life-cycle is:
//!
//! 1.  open the donor (e.g. [`Hack::open`])
//! 2.  [`Patch::patch`]
//! 3.  merge into the output via [`crate::SaicaBuilder::add_font`]
//! 4.  [`Patch::close`]

mod align;
mod emoji;
mod hack;
mod mgen;
mod nerd;

pub use align::{align_to_center, align_to_left, align_to_right, cell_width};
pub use emoji::NotoEmoji;
pub use hack::Hack;
pub use mgen::MgenPlus;
pub use nerd::Nerd;

use crate::fonts::SourceFont;
use crate::FontError;
use kurbo::Affine;

/// Slant applied to italic variants, in radians
pub const ITALIC_SKEW: f64 = 0.25;

/// The italic shear: `x' = x + y * tan(ITALIC_SKEW)`
pub fn italic_skew() -> Affine {
    Affine::skew(ITALIC_SKEW.tan(), 0.0)
}

/// A donor font together with the edits it needs
pub trait Patch {
    /// Apply all edits
    ///
    /// This should be called once, after opening.
    fn patch(&mut self) -> Result<(), FontError>;

    /// Access the (possibly patched) font resource
    fn font(&self) -> &SourceFont;

    /// Unwrap the font resource
    fn into_font(self) -> SourceFont;

    /// Release the font resource
    fn close(self)
    where
        Self: Sized,
    {
        self.into_font().close();
    }
}
