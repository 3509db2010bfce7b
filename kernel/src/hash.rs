//! Canonical hashing with domain separation.
//!
//! Exactly one place defines how kernel values are hashed. Every digest is
//! SHA-256 over `domain || data`, where `domain` is a null-terminated prefix.

use sha2::{Digest, Sha256};

/// Domain prefix for Sudoku state fingerprints.
pub const DOMAIN_SUDOKU_STATE: &[u8] = b"ARBOR::SUDOKU_STATE::V1\0";

/// Domain prefix for solved-board digests in reports.
pub const DOMAIN_SUDOKU_BOARD: &[u8] = b"ARBOR::SUDOKU_BOARD::V1\0";

/// Digest rendered as `"sha256:<hex>"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentHash(String);

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Compute the canonical hash of `data` under `domain`.
#[must_use]
pub fn canonical_hash(domain: &[u8], data: &[u8]) -> ContentHash {
    let digest = raw_digest(domain, data);
    ContentHash(format!("sha256:{}", hex::encode(digest)))
}

/// 64-bit fingerprint of `data` under `domain`: the first eight digest bytes,
/// little-endian.
#[must_use]
pub fn fingerprint64(domain: &[u8], data: &[u8]) -> u64 {
    let digest = raw_digest(domain, data);
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(head)
}

fn raw_digest(domain: &[u8], data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(domain);
    hasher.update(data);
    hasher.finalize().into()
}
