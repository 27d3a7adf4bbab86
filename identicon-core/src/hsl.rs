//! HSL to RGB conversion
//!
//! Hue in `[0, 360]`, saturation and luminance in `[0, 100]`.

use serde::{Deserialize, Serialize};

use crate::color::Rgb;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub hue: f64,
    pub sat: f64,
    pub lum: f64,
}

impl Hsl {
    pub fn new(hue: f64, sat: f64, lum: f64) -> Self {
        Self { hue, sat, lum }
    }

    /// Convert to 8-bit RGB, rounding each channel half-to-even.
    ///
    /// Red samples the hue at `h + 1/3` and blue at `h - 1/3`. Existing
    /// identicons depend on this channel order, do not swap it.
    pub fn to_rgb(&self) -> Rgb {
        let hue = self.hue / 360.0;
        let sat = self.sat / 100.0;
        let lum = self.lum / 100.0;

        let b = if lum <= 0.5 {
            lum * (sat + 1.0)
        } else {
            lum + sat - lum * sat
        };
        let a = lum * 2.0 - b;

        let red = hue_to_channel(a, b, hue + 1.0 / 3.0);
        let green = hue_to_channel(a, b, hue);
        let blue = hue_to_channel(a, b, hue - 1.0 / 3.0);

        Rgb::new(to_byte(red), to_byte(green), to_byte(blue))
    }
}

fn hue_to_channel(a: f64, b: f64, hue: f64) -> f64 {
    let h = if hue < 0.0 {
        hue + 1.0
    } else if hue > 1.0 {
        hue - 1.0
    } else {
        hue
    };

    if h < 1.0 / 6.0 {
        a + (b - a) * 6.0 * h
    } else if h < 1.0 / 2.0 {
        b
    } else if h < 2.0 / 3.0 {
        a + (b - a) * (2.0 / 3.0 - h) * 6.0
    } else {
        a
    }
}

fn to_byte(channel: f64) -> u8 {
    (channel * 255.0).round_ties_even().clamp(0.0, 255.0) as u8
}
