//! Key fingerprinting for access records.
//!
//! Keys are reduced to a 64-bit identity token at feed time; nothing else
//! about the key is retained. Many cache workloads use decimal object ids as
//! keys, so those parse directly to their numeric value and avoid hashing
//! entirely. Everything else goes through a deterministic 64-bit hash.
//! Collisions are tolerated: the token only identifies a key within the
//! current window.

#[cfg(not(any(feature = "hash-xxh3", feature = "hash-xxh64")))]
compile_error!("Enable a hash feature: `hash-xxh3` (default) or `hash-xxh64`.");

/// Reduce key bytes to a 64-bit fingerprint.
///
/// Keys that are entirely a decimal `u64` map to that value; all other keys
/// are hashed with the configured backend.
#[inline]
pub fn fingerprint(key: &[u8]) -> u64 {
    match parse_decimal(key) {
        Some(value) => value,
        None => hash64(key),
    }
}

/// Hash key bytes into a 64-bit value (deterministic across runs).
#[inline]
pub fn hash64(bytes: &[u8]) -> u64 {
    #[cfg(feature = "hash-xxh3")]
    {
        xxhash_rust::xxh3::xxh3_64(bytes)
    }

    #[cfg(all(not(feature = "hash-xxh3"), feature = "hash-xxh64"))]
    {
        xxhash_rust::xxh64::xxh64(bytes, 0)
    }
}

#[inline]
fn parse_decimal(key: &[u8]) -> Option<u64> {
    let text = std::str::from_utf8(key).ok()?;
    text.parse::<u64>().ok()
}
