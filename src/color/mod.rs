//! Colors used by the strip renderer

use smart_leds::RGB8;

use crate::math8::scale8;

pub type Rgb = RGB8;

/// Reddish reference color of the low band
pub const LOW_BAND_COLOR: Rgb = Rgb { r: 255, g: 32, b: 0 };
/// Blue reference color of the high band
pub const HIGH_BAND_COLOR: Rgb = Rgb { r: 0, g: 64, b: 255 };
/// Yellow reference color of the tail marker
pub const TAIL_COLOR: Rgb = Rgb { r: 255, g: 180, b: 0 };

/// Reference colors for every layer drawn on the strip.
///
/// Each color is the full-scale value and gets dimmed by the layer level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub low: Rgb,
    pub high: Rgb,
    pub tail: Rgb,
}

impl Palette {
    pub const fn new() -> Self {
        Self {
            low: LOW_BAND_COLOR,
            high: HIGH_BAND_COLOR,
            tail: TAIL_COLOR,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new()
    }
}

/// Scale every channel of `color` by `level` (0-255 = 0.0-1.0)
#[inline]
pub const fn scale_color(color: Rgb, level: u8) -> Rgb {
    Rgb {
        r: scale8(color.r, level),
        g: scale8(color.g, level),
        b: scale8(color.b, level),
    }
}
