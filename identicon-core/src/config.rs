//! Generator configuration

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::generator::IdenticonError;
use crate::hashing::HashAlgorithm;

pub const DEFAULT_SIZE: u32 = 500;
pub const DEFAULT_DIM: u32 = 5;
pub const DEFAULT_BACKGROUND: Rgb = Rgb::new(240, 240, 240);

/// The default dimension keeps the historical 32-nibble budget.
const LEGACY_DIM: u32 = 5;
const LEGACY_NIB_COUNT: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdenticonConfig {
    /// Width and height of the image in pixels
    pub size: u32,
    /// Side length of the sprite grid
    pub dim: u32,
    pub hash: HashAlgorithm,
    /// Fixed foreground; derived from the digest when absent
    pub foreground: Option<Rgb>,
    pub background: Rgb,
}

impl Default for IdenticonConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            dim: DEFAULT_DIM,
            hash: HashAlgorithm::default(),
            foreground: None,
            background: DEFAULT_BACKGROUND,
        }
    }
}

impl IdenticonConfig {
    pub fn load_from_file(path: &Path) -> Result<Self, IdenticonError> {
        let content = fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Columns that carry independent data: `ceil(dim / 2)`.
    pub fn half_width(&self) -> usize {
        (self.dim as usize).div_ceil(2)
    }

    /// Nibbles consumed by the pixel grid.
    pub fn pixel_nibbles(&self) -> usize {
        self.half_width().saturating_mul(self.dim as usize)
    }

    /// Nibbles taken from the head of the digest.
    pub fn nib_count(&self) -> usize {
        if self.dim == LEGACY_DIM {
            LEGACY_NIB_COUNT
        } else {
            self.pixel_nibbles()
        }
    }

    /// Digest bytes needed to supply `nib_count` nibbles.
    pub fn required_bytes(&self) -> f64 {
        self.nib_count() as f64 / 2.0
    }
}
