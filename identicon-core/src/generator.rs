//! Identicon Generator - Single Entry Point
//!
//! Every generation validates the configuration first. A call either
//! returns a complete image or an error, never a partial buffer.

use base64::Engine;
use image::RgbImage;
use serde::Serialize;
use thiserror::Error;

use crate::color::Rgb;
use crate::config::IdenticonConfig;
use crate::grid::PixelGrid;
use crate::hashing::{compute_manifest_hash, sha256_hex, DigestTable, HashAlgorithm, HashProvider};
use crate::nibbles::NibbleArray;
use crate::palette::{derive_foreground, ForegroundSource};
use crate::render::{encode_png, rasterize};
use crate::validation::Validator;
use crate::ENGINE_VERSION;

#[derive(Debug, Error)]
pub enum IdenticonError {
    #[error("Unsupported hash algorithm '{0}', pick from [md5, sha256, sha512]")]
    UnsupportedHashKind(String),

    #[error(
        "'{algorithm}' digest too small to support {required_bytes:.1} bytes required to generate identicon; \
         select a larger hash or smaller identicon dimension"
    )]
    DigestTooShort {
        algorithm: HashAlgorithm,
        required_bytes: f64,
    },

    #[error("Digest is not hexadecimal: {0}")]
    InvalidDigest(String),

    #[error("Invalid color '{0}', expected (R,G,B) with channels 0-255 or #rrggbb")]
    InvalidColor(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Everything derived from one input, before rasterization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    /// Leading `nib_count` hex characters of the digest
    pub digest: String,
    pub nibbles: NibbleArray,
    pub grid: PixelGrid,
    pub foreground: Rgb,
    pub foreground_source: ForegroundSource,
}

#[derive(Debug, Clone, Serialize)]
pub struct IdenticonManifest {
    pub input: String,
    pub engine_version: String,
    pub hash: HashAlgorithm,
    pub digest: String,
    pub nib_count: usize,
    pub size: u32,
    pub dim: u32,
    pub foreground: Rgb,
    pub foreground_source: ForegroundSource,
    pub background: Rgb,
    pub grid: Vec<String>,
    pub png_base64: String,
    pub png_sha256: String,
    pub manifest_hash: String,
}

/// The identicon generator. Immutable after construction and safe to share
/// between threads.
pub struct Identicon {
    config: IdenticonConfig,
    provider: Box<dyn HashProvider>,
    validator: Validator,
}

impl Identicon {
    pub fn new(config: IdenticonConfig) -> Self {
        Self::with_provider(config, DigestTable::standard())
    }

    pub fn with_provider(config: IdenticonConfig, provider: impl HashProvider + 'static) -> Self {
        Self {
            config,
            provider: Box::new(provider),
            validator: Validator::new(),
        }
    }

    pub fn config(&self) -> &IdenticonConfig {
        &self.config
    }

    /// Leading `nib_count` hex characters of the digest of `input`.
    pub fn digest(&self, input: &str) -> Result<String, IdenticonError> {
        let algorithm = self.config.hash;
        let full = self
            .provider
            .hex_digest(algorithm, input.as_bytes())
            .ok_or_else(|| IdenticonError::UnsupportedHashKind(algorithm.to_string()))?;

        let nibs = self.config.nib_count();
        let slice = full.get(..nibs).ok_or(IdenticonError::DigestTooShort {
            algorithm,
            required_bytes: self.config.required_bytes(),
        })?;

        log::debug!("{} digest of {:?}: using {} of {} nibbles", algorithm, input, nibs, full.len());
        Ok(slice.to_string())
    }

    /// Derive grid and foreground without rasterizing.
    pub fn derive(&self, input: &str) -> Result<Sprite, IdenticonError> {
        self.check_config()?;

        let digest = self.digest(input)?;
        let nibbles = NibbleArray::from_hex(&digest)?;
        let grid = PixelGrid::derive(&nibbles, self.config.dim as usize).ok_or(IdenticonError::DigestTooShort {
            algorithm: self.config.hash,
            required_bytes: self.config.required_bytes(),
        })?;

        let (foreground, foreground_source) = match self.config.foreground {
            Some(color) => (color, ForegroundSource::Override),
            None => {
                // ColorBudgetRule guarantees enough nibbles to wrap
                let color = derive_foreground(&nibbles).ok_or_else(|| {
                    IdenticonError::InvalidConfig("too few nibbles to derive a foreground color".to_string())
                })?;
                (color, ForegroundSource::Digest)
            }
        };

        Ok(Sprite { digest, nibbles, grid, foreground, foreground_source })
    }

    /// Generate the identicon image for `input`.
    pub fn generate(&self, input: &str) -> Result<RgbImage, IdenticonError> {
        let sprite = self.derive(input)?;
        Ok(self.render(&sprite))
    }

    pub fn render(&self, sprite: &Sprite) -> RgbImage {
        rasterize(&sprite.grid, sprite.foreground, self.config.background, self.config.size)
    }

    /// Generate and describe the identicon, PNG included.
    pub fn manifest(&self, input: &str) -> Result<IdenticonManifest, IdenticonError> {
        let sprite = self.derive(input)?;
        let png = encode_png(&self.render(&sprite))?;

        let mut manifest = IdenticonManifest {
            input: input.to_string(),
            engine_version: ENGINE_VERSION.to_string(),
            hash: self.config.hash,
            digest: sprite.digest,
            nib_count: self.config.nib_count(),
            size: self.config.size,
            dim: self.config.dim,
            foreground: sprite.foreground,
            foreground_source: sprite.foreground_source,
            background: self.config.background,
            grid: sprite.grid.to_strings(),
            png_base64: base64::engine::general_purpose::STANDARD.encode(&png),
            png_sha256: sha256_hex(&png),
            manifest_hash: String::new(), // Computed after
        };

        manifest.manifest_hash = compute_manifest_hash(&manifest)?;
        Ok(manifest)
    }

    fn check_config(&self) -> Result<(), IdenticonError> {
        let result = self.validator.validate(&self.config);
        for warning in result.warnings() {
            log::warn!("{}: {}", warning.rule, warning.message);
        }
        if result.has_errors() {
            return Err(IdenticonError::InvalidConfig(result.error_summary()));
        }
        Ok(())
    }
}

impl Default for Identicon {
    fn default() -> Self {
        Self::new(IdenticonConfig::default())
    }
}
