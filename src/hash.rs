use fnv::FnvHasher;
use murmur3::murmur3_x64_128;
use std::hash::Hasher;
use std::io::Cursor;

/// Number of digest bytes consumed by the bit-index generator.
pub const DIGEST_LEN: usize = 8;

/// A type alias for the digest function used by every filter in this crate.
///
/// The function maps an item to a fixed-size digest. It must be pure and
/// deterministic: the same bytes always produce the same digest, otherwise
/// previously inserted items could no longer be found.
///
/// **Parameters:**
///
/// - `item: &[u8]`
///   - A byte slice representing the item to be hashed.
///
/// **Returns:**
///
/// - `[u8; DIGEST_LEN]`
///   - The first eight bytes of the digest. Wider digests (128-bit,
///     cryptographic) should be truncated to their leading bytes.
///
/// **Usage:**
///
/// Only one digest is computed per item regardless of the number of hash
/// values the filter needs; see [`BitIndices`] for how the digest is
/// expanded into `k` bit positions.
pub type HashFunction = fn(&[u8]) -> [u8; DIGEST_LEN];

/// 64-bit Murmur3 digest (low half of x64-128), big-endian.
pub fn murmur3_digest(item: &[u8]) -> [u8; DIGEST_LEN] {
    let mut cursor = Cursor::new(item);
    let hash = murmur3_x64_128(&mut cursor, 0)
        .expect("Reading from an in-memory cursor cannot fail");
    (hash as u64).to_be_bytes()
}

/// 64-bit FNV-1a digest, big-endian.
pub fn fnv64_digest(item: &[u8]) -> [u8; DIGEST_LEN] {
    let mut hasher = FnvHasher::default();
    hasher.write(item);
    hasher.finish().to_be_bytes()
}

pub fn default_hash_function(item: &[u8]) -> [u8; DIGEST_LEN] {
    murmur3_digest(item)
}

/// Double-hashing index generator.
///
/// Splits a digest into two 32-bit big-endian halves, `b = D[0..4]` and
/// `a = D[4..8]`, and yields `(a + i * b) mod modulus` for `i` in
/// `0..count`. Arithmetic is carried out in 64 bits so the sum never wraps.
///
/// Reference: Kirsch & Mitzenmacher, "Less Hashing, Same Performance:
/// Building a Better Bloom Filter".
#[derive(Debug, Clone)]
pub struct BitIndices {
    a: u64,
    b: u64,
    modulus: u64,
    current: u64,
    count: u64,
}

impl BitIndices {
    pub fn new(digest: &[u8; DIGEST_LEN], count: usize, modulus: usize) -> Self {
        debug_assert!(modulus > 0, "modulus must be positive");

        let b = u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]);
        let a = u32::from_be_bytes([digest[4], digest[5], digest[6], digest[7]]);

        Self {
            a: u64::from(a),
            b: u64::from(b),
            modulus: modulus as u64,
            current: 0,
            count: count as u64,
        }
    }

    /// Hashes `item` once and returns the generator over its indices.
    pub fn for_item(
        hash_function: HashFunction,
        item: &[u8],
        count: usize,
        modulus: usize,
    ) -> Self {
        Self::new(&hash_function(item), count, modulus)
    }
}

impl Iterator for BitIndices {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.current >= self.count {
            return None;
        }
        let idx = (self.a + self.current * self.b) % self.modulus;
        self.current += 1;
        Some(idx as usize)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.count - self.current) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BitIndices {}
