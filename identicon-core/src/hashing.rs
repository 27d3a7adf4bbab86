//! Hashing System - digest providers and manifest hashing
//!
//! Digests are consumed as lowercase hex strings. Which algorithms are
//! available is decided by the `HashProvider` handed to the generator.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use md5::Md5;
use serde::{Deserialize, Serialize};
use serde_json::{to_string, Value};
use sha2::{Digest, Sha256, Sha512};

use crate::generator::IdenticonError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    #[default]
    Md5,
    Sha256,
    Sha512,
}

impl HashAlgorithm {
    pub const ALL: [HashAlgorithm; 3] = [Self::Md5, Self::Sha256, Self::Sha512];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha256 => "sha256",
            Self::Sha512 => "sha512",
        }
    }

    /// Number of hex characters in a digest.
    pub fn hex_len(&self) -> usize {
        match self {
            Self::Md5 => 32,
            Self::Sha256 => 64,
            Self::Sha512 => 128,
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = IdenticonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|algorithm| algorithm.name() == s)
            .ok_or_else(|| IdenticonError::UnsupportedHashKind(s.to_string()))
    }
}

/// Source of hex digests, injected into the generator.
pub trait HashProvider: Send + Sync {
    /// Lowercase hex digest of `data`, or `None` if the algorithm is not offered.
    fn hex_digest(&self, algorithm: HashAlgorithm, data: &[u8]) -> Option<String>;
}

pub type DigestFn = fn(&[u8]) -> String;

/// Table of digest functions keyed by algorithm.
pub struct DigestTable {
    entries: HashMap<HashAlgorithm, DigestFn>,
}

impl DigestTable {
    /// Table with no algorithms registered.
    pub fn empty() -> Self {
        Self { entries: HashMap::new() }
    }

    /// Table with md5, sha256 and sha512.
    pub fn standard() -> Self {
        let mut table = Self::empty();
        table.register(HashAlgorithm::Md5, md5_hex);
        table.register(HashAlgorithm::Sha256, sha256_hex);
        table.register(HashAlgorithm::Sha512, sha512_hex);
        table
    }

    pub fn register(&mut self, algorithm: HashAlgorithm, digest: DigestFn) {
        self.entries.insert(algorithm, digest);
    }

    pub fn supports(&self, algorithm: HashAlgorithm) -> bool {
        self.entries.contains_key(&algorithm)
    }
}

impl Default for DigestTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl HashProvider for DigestTable {
    fn hex_digest(&self, algorithm: HashAlgorithm, data: &[u8]) -> Option<String> {
        self.entries.get(&algorithm).map(|digest| digest(data))
    }
}

fn digest_hex<D: Digest>(data: &[u8]) -> String {
    hex::encode(D::digest(data))
}

pub fn md5_hex(data: &[u8]) -> String {
    digest_hex::<Md5>(data)
}

/// Compute SHA-256 hash of bytes, return hex string
pub fn sha256_hex(data: &[u8]) -> String {
    digest_hex::<Sha256>(data)
}

pub fn sha512_hex(data: &[u8]) -> String {
    digest_hex::<Sha512>(data)
}

/// Convert to canonical JSON (sorted keys, no whitespace)
pub fn canonical_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let v: Value = serde_json::to_value(value)?;
    let sorted = sort_value(&v);
    to_string(&sorted)
}

fn sort_value(v: &Value) -> Value {
    match v {
        Value::Object(map) => {
            let mut sorted: Vec<_> = map.iter().collect();
            sorted.sort_by(|a, b| a.0.cmp(b.0));
            let sorted_map: serde_json::Map<String, Value> = sorted
                .into_iter()
                .map(|(k, v)| (k.clone(), sort_value(v)))
                .collect();
            Value::Object(sorted_map)
        }
        Value::Array(arr) => Value::Array(arr.iter().map(sort_value).collect()),
        _ => v.clone(),
    }
}

/// Compute manifest hash over canonical JSON
pub fn compute_manifest_hash<T: Serialize>(manifest: &T) -> Result<String, serde_json::Error> {
    let canonical = canonical_json(manifest)?;
    Ok(sha256_hex(canonical.as_bytes()))
}
