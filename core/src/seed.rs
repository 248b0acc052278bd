//! Labelled seed derivation for independent random streams.

use sha2::{Digest, Sha256};

/// Derives the seed of a labelled stream from a base seed and a use counter.
///
/// Each `(base, label, counter)` triple maps to an independent seed, so a
/// stream can be recreated from plain counters without storing generator
/// state.
#[must_use]
pub fn derive_stream_seed(base: u64, label: &str, counter: u64) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(base.to_le_bytes());
    hasher.update(label.as_bytes());
    hasher.update(counter.to_le_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0_u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(bytes)
}
