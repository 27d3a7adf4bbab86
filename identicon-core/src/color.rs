//! RGB color triples

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::generator::IdenticonError;

/// 8-bit RGB triple. Serializes as `[r, g, b]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    pub fn r(&self) -> u8 { self.0[0] }
    pub fn g(&self) -> u8 { self.0[1] }
    pub fn b(&self) -> u8 { self.0[2] }
}

impl From<Rgb> for image::Rgb<u8> {
    fn from(color: Rgb) -> Self {
        image::Rgb(color.0)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{},{})", self.r(), self.g(), self.b())
    }
}

/// Accepts `(R,G,B)`, `[R,G,B]`, `R,G,B` and `#rrggbb`.
impl FromStr for Rgb {
    type Err = IdenticonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || IdenticonError::InvalidColor(s.to_string());
        let trimmed = s.trim();

        if let Some(hex_part) = trimmed.strip_prefix('#') {
            let bytes = hex::decode(hex_part).map_err(|_| invalid())?;
            let channels: [u8; 3] = bytes.try_into().map_err(|_| invalid())?;
            return Ok(Self(channels));
        }

        let inner = trimmed
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .or_else(|| trimmed.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')))
            .unwrap_or(trimmed);

        let channels: Vec<u8> = inner
            .split(',')
            .map(|part| part.trim().parse::<u8>())
            .collect::<Result<_, _>>()
            .map_err(|_| invalid())?;
        let channels: [u8; 3] = channels.try_into().map_err(|_| invalid())?;
        Ok(Self(channels))
    }
}
