//! 32-bit MurmurHash2 used to bucket n-grams into embedding rows.

/// Seed shared with the trained model; changing it invalidates every n-gram table.
pub const HASH_SEED: u32 = 0xBEEF;

const M: u32 = 0x5bd1_e995;
const R: u32 = 24;

/// MurmurHash2 of `bytes` with the model seed.
pub fn hash32(bytes: &[u8]) -> u32 {
    hash32_with_seed(bytes, HASH_SEED)
}

/// MurmurHash2 of `bytes` with an explicit seed.
pub fn hash32_with_seed(bytes: &[u8], seed: u32) -> u32 {
    // Length is mixed in as a 32-bit value.
    let mut h = seed ^ (bytes.len() as u32);

    let mut chunks = bytes.chunks_exact(4);
    for chunk in &mut chunks {
        let mut k = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        k = k.wrapping_mul(M);
        k ^= k >> R;
        k = k.wrapping_mul(M);
        h = h.wrapping_mul(M);
        h ^= k;
    }

    let tail = chunks.remainder();
    if tail.len() >= 3 {
        h ^= u32::from(tail[2]) << 16;
    }
    if tail.len() >= 2 {
        h ^= u32::from(tail[1]) << 8;
    }
    if !tail.is_empty() {
        h ^= u32::from(tail[0]);
        h = h.wrapping_mul(M);
    }

    h ^= h >> 13;
    h = h.wrapping_mul(M);
    h ^= h >> 15;
    h
}

/// Bucket of an n-gram in a table with `dimension` rows.
#[inline]
pub fn bucket(ngram: &str, dimension: u32) -> u32 {
    hash32(ngram.as_bytes()) % dimension
}
