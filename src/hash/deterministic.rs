use core::fmt;

use blake2::{Blake2s256, Digest};

/// Size in bytes of every digest produced by this module.
pub const DIGEST_SIZE: usize = 32;

/// Blake2s digest value.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Hash {
    bytes: [u8; DIGEST_SIZE],
}

impl Hash {
    /// Constructs a hash value from raw bytes.
    pub const fn from_bytes(bytes: [u8; DIGEST_SIZE]) -> Self {
        Self { bytes }
    }

    /// Returns the canonical byte representation of the digest.
    pub const fn as_bytes(&self) -> &[u8; DIGEST_SIZE] {
        &self.bytes
    }

    /// Consumes the hash and returns the underlying byte array.
    pub const fn into_bytes(self) -> [u8; DIGEST_SIZE] {
        self.bytes
    }

    /// Returns a helper that formats the digest as lowercase hexadecimal.
    pub fn to_hex(&self) -> HexOutput {
        HexOutput(self.bytes)
    }
}

impl From<[u8; DIGEST_SIZE]> for Hash {
    fn from(bytes: [u8; DIGEST_SIZE]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<Hash> for [u8; DIGEST_SIZE] {
    fn from(hash: Hash) -> Self {
        hash.into_bytes()
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash(0x{})", self.to_hex())
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_hex(), f)
    }
}

/// Lowercase hexadecimal rendering of a digest.
#[derive(Clone, Copy)]
pub struct HexOutput([u8; DIGEST_SIZE]);

impl fmt::Display for HexOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0.iter() {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl fmt::Debug for HexOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Streaming Blake2s hasher.
#[derive(Clone, Default)]
pub struct Hasher {
    state: Blake2s256,
}

impl Hasher {
    /// Creates an empty hasher.
    pub fn new() -> Self {
        Self {
            state: Blake2s256::new(),
        }
    }

    /// Absorbs additional bytes into the hasher state.
    pub fn update(&mut self, bytes: &[u8]) -> &mut Self {
        Digest::update(&mut self.state, bytes);
        self
    }

    /// Finalises the hasher and returns a 32-byte digest.
    pub fn finalize(self) -> Hash {
        Hash::from_bytes(self.state.finalize().into())
    }
}

/// One-shot Blake2s digest of `input`.
pub fn hash(input: &[u8]) -> Hash {
    let mut hasher = Hasher::new();
    hasher.update(input);
    hasher.finalize()
}

/// Digest of the concatenation `left || right`.
pub fn hash_pair(left: &[u8; DIGEST_SIZE], right: &[u8; DIGEST_SIZE]) -> Hash {
    let mut hasher = Hasher::new();
    hasher.update(left).update(right);
    hasher.finalize()
}

/// Counter-mode extendable output built from Blake2s.
///
/// Block `i` is `Blake2s(state_i || i_le)` and becomes `state_{i+1}`.
#[derive(Debug, Clone)]
pub struct Blake2sXof {
    state: [u8; DIGEST_SIZE],
    counter: u64,
}

impl Blake2sXof {
    /// Creates a new XOF instance from an arbitrary seed.
    pub fn new(seed: &[u8]) -> Self {
        let mut hasher = Hasher::new();
        hasher.update(seed).update(b"/XOF");
        Self::from_state(hasher.finalize().into_bytes())
    }

    /// Creates a new XOF starting from an existing 32-byte state.
    pub fn from_state(state: [u8; DIGEST_SIZE]) -> Self {
        Self { state, counter: 0 }
    }

    /// Fills `output` with bytes from the stream.
    pub fn squeeze(&mut self, output: &mut [u8]) {
        for chunk in output.chunks_mut(DIGEST_SIZE) {
            let block = self.squeeze_block();
            chunk.copy_from_slice(&block[..chunk.len()]);
        }
    }

    fn squeeze_block(&mut self) -> [u8; DIGEST_SIZE] {
        let mut hasher = Hasher::new();
        hasher.update(&self.state).update(&self.counter.to_le_bytes());
        let block = hasher.finalize().into_bytes();
        self.state = block;
        self.counter = self.counter.wrapping_add(1);
        block
    }
}
