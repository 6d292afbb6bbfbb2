//! BLAKE3 keyed digests over public parameters.

use blake3::Hasher;

use super::deterministic::{Hash, DIGEST_SIZE};

/// Key separating parameter digests from every other BLAKE3 use.
pub const PARAMETER_DIGEST_KEY: [u8; DIGEST_SIZE] = {
    let seed = *b"FIBSQ-PARAMS/V1";
    let mut key = [0u8; DIGEST_SIZE];
    let mut i = 0;
    while i < seed.len() {
        key[i] = seed[i];
        i += 1;
    }
    key
};

/// Incremental keyed digest over little-endian integers and raw bytes.
#[derive(Clone)]
pub struct ParameterDigest {
    hasher: Hasher,
}

impl ParameterDigest {
    /// Starts a digest under [`PARAMETER_DIGEST_KEY`].
    pub fn new() -> Self {
        Self {
            hasher: Hasher::new_keyed(&PARAMETER_DIGEST_KEY),
        }
    }

    /// Absorbs a `u64` in little-endian order.
    pub fn absorb_u64(&mut self, value: u64) -> &mut Self {
        self.hasher.update(&value.to_le_bytes());
        self
    }

    /// Absorbs a length-prefixed byte string.
    pub fn absorb_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.hasher.update(&(bytes.len() as u64).to_le_bytes());
        self.hasher.update(bytes);
        self
    }

    /// Finishes the digest.
    pub fn finalize(&self) -> Hash {
        Hash::from_bytes(*self.hasher.finalize().as_bytes())
    }
}

impl Default for ParameterDigest {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_depends_on_order_and_framing() {
        let mut ab = ParameterDigest::new();
        ab.absorb_u64(1).absorb_u64(2);
        let mut ba = ParameterDigest::new();
        ba.absorb_u64(2).absorb_u64(1);
        assert_ne!(ab.finalize(), ba.finalize());

        let mut split = ParameterDigest::new();
        split.absorb_bytes(b"ab").absorb_bytes(b"c");
        let mut joined = ParameterDigest::new();
        joined.absorb_bytes(b"a").absorb_bytes(b"bc");
        assert_ne!(split.finalize(), joined.finalize());
    }

    #[test]
    fn keyed_digest_differs_from_plain_blake3() {
        let mut digest = ParameterDigest::new();
        digest.absorb_u64(7);
        let plain = blake3::hash(&7u64.to_le_bytes());
        assert_ne!(digest.finalize().as_bytes(), plain.as_bytes());
    }
}
