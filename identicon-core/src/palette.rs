//! Foreground color derivation
//!
//! The last 28 bits of the nibble budget encode an HSL color:
//! 12 bits of hue, 8 bits of saturation offset, 8 bits of luminance offset.

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::hsl::Hsl;
use crate::nibbles::NibbleArray;

pub const COLOR_NIBBLES: usize = 7;

const BASE_SATURATION: f64 = 65.0;
const BASE_LUMINANCE: f64 = 75.0;
const MAX_OFFSET: f64 = 20.0;

/// Where the foreground of a sprite came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForegroundSource {
    /// Derived from the digest tail
    Digest,
    /// Fixed by configuration
    Override,
}

/// Map `value` from `[src_min, src_max]` towards `[dst_min, dst_max]`.
///
/// `dst_min` sits in the denominator, not added to the result. Every
/// call site uses `dst_min == 0`, where this equals plain interpolation;
/// the form is kept so published identicons never change.
pub fn map_range(value: f64, src_min: f64, src_max: f64, dst_min: f64, dst_max: f64) -> f64 {
    (value - src_min) * (dst_max - dst_min) / (src_max - src_min + dst_min)
}

/// HSL encoded by seven nibbles.
pub fn hsl_from_nibbles(nib: &[u8; COLOR_NIBBLES]) -> Hsl {
    let [n0, n1, n2, n3, n4, n5, n6] = nib.map(u32::from);
    let h = (n0 << 8) | (n1 << 4) | n2;
    let s = (n3 << 4) | n4;
    let l = (n5 << 4) | n6;

    let hue = map_range(h as f64, 0.0, 4095.0, 0.0, 360.0);
    let sat_offset = map_range(s as f64, 0.0, 255.0, 0.0, MAX_OFFSET);
    let lum_offset = map_range(l as f64, 0.0, 255.0, 0.0, MAX_OFFSET);

    Hsl::new(hue, BASE_SATURATION - sat_offset, BASE_LUMINANCE - lum_offset)
}

/// Shortest nibble array the color read can wrap around.
pub const MIN_COLOR_NIBBLES: usize = COLOR_NIBBLES.div_ceil(2);

/// Foreground from the last seven nibbles.
///
/// With fewer than seven, indices before the start wrap once to the end,
/// so six nibbles read `[5, 0, 1, 2, 3, 4, 5]`. `None` below `MIN_COLOR_NIBBLES`.
pub fn derive_foreground(nibbles: &NibbleArray) -> Option<Rgb> {
    let start = nibbles.len() as isize - COLOR_NIBBLES as isize;
    let mut tail = [0u8; COLOR_NIBBLES];
    for (offset, nib) in tail.iter_mut().enumerate() {
        *nib = nibbles.get_wrapped(start + offset as isize)?;
    }
    Some(hsl_from_nibbles(&tail).to_rgb())
}
