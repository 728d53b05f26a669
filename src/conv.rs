// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Type conversion utilities
//!
//! Glyph geometry is edited in `f64` design units (as used by `kurbo`) while
//! the SFNT tables store `i16` / `u16` values. Conversions here round to the
//! nearest unit and saturate instead of wrapping, since a donor outline which
//! has been scaled up may exceed the representable range.

use easy_cast::{Cast, ConvFloat};

/// Convert `usize` → `u32`
///
/// This is a "safer" wrapper around `as` ensuring (on debug builds) that the
/// input value may be represented correctly by `u32`.
#[inline]
pub fn to_u32(x: usize) -> u32 {
    x.cast()
}

/// Round a design-unit value to `i16`, saturating at the type bounds
#[inline]
pub fn round_i16(x: f64) -> i16 {
    let x = x.clamp(f64::from(i16::MIN), f64::from(i16::MAX));
    i16::conv_nearest(x)
}

/// Round a design-unit value to `u16`, saturating at the type bounds
///
/// Negative input (e.g. an advance width shrunk below zero) yields `0`.
#[inline]
pub fn round_u16(x: f64) -> u16 {
    let x = x.clamp(0.0, f64::from(u16::MAX));
    u16::conv_nearest(x)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn rounding() {
        assert_eq!(round_i16(1.5), 2);
        assert_eq!(round_i16(-1.4), -1);
        assert_eq!(round_u16(1023.6), 1024);
    }

    #[test]
    fn saturation() {
        assert_eq!(round_i16(1e9), i16::MAX);
        assert_eq!(round_i16(-1e9), i16::MIN);
        assert_eq!(round_u16(-5.0), 0);
        assert_eq!(round_u16(70000.0), u16::MAX);
    }
}
