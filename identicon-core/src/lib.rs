//! Identicon Core - deterministic avatar generator
//!
//! # Guarantees
//! 1. Same input and configuration, byte-identical image
//! 2. Every sprite is mirror-symmetric about its vertical axis
//! 3. Generation fails before any buffer is produced

pub mod color;
pub mod hsl;
pub mod hashing;
pub mod config;
pub mod nibbles;
pub mod palette;
pub mod grid;
pub mod render;
pub mod validation;
pub mod generator;

pub use color::Rgb;
pub use hsl::Hsl;
pub use hashing::{DigestTable, HashAlgorithm, HashProvider};
pub use config::IdenticonConfig;
pub use nibbles::NibbleArray;
pub use grid::PixelGrid;
pub use palette::ForegroundSource;
pub use validation::{ValidationResult, ValidationViolation, Validator, ViolationSeverity};
pub use generator::{Identicon, IdenticonError, IdenticonManifest, Sprite};

pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
