// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Font resources and glyph records
//!
//! A donor font is opened as a [`SourceFont`]: every glyph reachable from the
//! font's Unicode `cmap` is extracted into an editable [`Glyph`] record (plus
//! `.notdef`). Outlines are held as [`kurbo::BezPath`] in the donor's own font
//! units; patches scale them into the output em.
//!
//! ### Units
//!
//! The output em is [`crate::EM`] (2048) units. Glyphs are snapped to one of
//! two advance widths (*cells*):
//!
//! -   half width: [`crate::HALF_WIDTH`] (1024), used by Latin glyphs
//! -   full width: [`crate::WIDTH`] (2048), used by most CJK glyphs
//!
//! Thus two half-width glyphs occupy exactly the space of one full-width
//! glyph, which is what a terminal grid expects.

mod attributes;
mod glyph;
pub mod outline;
mod source;

pub use attributes::{FontStyle, FontWeight, MacStyle, StyleMap};
pub use glyph::Glyph;
pub use source::SourceFont;
