//! Nibble decoding
//!
//! The decoded array is immutable. Pixel data is read from its head and
//! color data from its tail, each by explicit index.

use serde::Serialize;

use crate::generator::IdenticonError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NibbleArray(Vec<u8>);

impl NibbleArray {
    /// Decode hex characters into values in `0..=15`, most significant first.
    pub fn from_hex(slice: &str) -> Result<Self, IdenticonError> {
        slice
            .chars()
            .map(|c| c.to_digit(16).map(|value| value as u8))
            .collect::<Option<Vec<u8>>>()
            .map(Self)
            .ok_or_else(|| IdenticonError::InvalidDigest(slice.to_string()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// First `count` nibbles.
    pub fn head(&self, count: usize) -> Option<&[u8]> {
        self.0.get(..count)
    }

    /// Nibble at `index`, where a negative index counts back from the end.
    ///
    /// Wraps at most once: `-len` is the first nibble, anything lower is `None`.
    pub fn get_wrapped(&self, index: isize) -> Option<u8> {
        let ix = if index < 0 { index + self.0.len() as isize } else { index };
        self.0.get(usize::try_from(ix).ok()?).copied()
    }
}
